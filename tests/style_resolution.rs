//! Whole-registry style workflow: load a configured style set over the
//! predefined one, resolve inheritance and attach shared styles to feature
//! sets.

mod common;

use annotree::prelude::*;
use anyhow::Result;
use common::{
    basic_feature,
    context_with,
    init_logging,
};
use rstest::rstest;

fn configured_registry() -> Result<StyleRegistry> {
    let mut registry = StyleRegistry::with_predefined();

    let mut align_base = FeatureStyle::new("align-base", "alignment defaults")?;
    align_base.set_mode(StyleMode::Alignment);
    align_base.set_width(30.0);
    align_base.set_colours(
        ColourTarget::Normal,
        ColourState::Normal,
        ColourSpec {
            fill: Some("#4682b4".parse()?),
            ..ColourSpec::default()
        },
    );
    registry.add(align_base);

    let mut blast = FeatureStyle::new("wublast", "blast hits")?;
    blast.set_parent("align-base");
    blast.set_bump_mode(BumpMode::Overlap);
    registry.add(blast);

    Ok(registry)
}

#[rstest]
fn configured_styles_resolve_over_predefined() -> Result<()> {
    init_logging();

    let mut registry = configured_registry()?;
    let resolution = registry.resolve();
    assert!(resolution.success());

    let blast = registry.find("wublast").unwrap();
    assert_eq!(blast.mode(), StyleMode::Alignment);
    assert_eq!(blast.width(), 30.0);
    assert_eq!(blast.bump_mode(), BumpMode::Overlap);
    // Resolved styles carry no dangling parent link.
    assert!(blast.parent_id().is_none());

    // Predefined styles are untouched by resolution.
    let dna = registry.find("dna").unwrap();
    assert_eq!(dna.mode(), StyleMode::RawSequence);
    Ok(())
}

#[rstest]
fn broken_styles_do_not_block_attachment() -> Result<()> {
    init_logging();

    let mut registry = configured_registry()?;
    let mut broken = FeatureStyle::new("broken", "")?;
    broken.set_parent("missing-base");
    registry.add(broken);

    let resolution = registry.resolve();
    assert!(!resolution.success());
    assert_eq!(resolution.warnings().len(), 1);
    assert_eq!(resolution.warnings()[0].style().as_str(), "broken");

    // The healthy styles still resolve and attach.
    let mut context =
        context_with("chr4", "wublast", vec![basic_feature("hitA", 10, 50)]);
    context.add_style_name("wublast");

    let shared = registry.share("wublast").unwrap();
    assert_eq!(shared.width(), 30.0);
    Ok(())
}

#[rstest]
fn second_style_source_augments_the_first() -> Result<()> {
    init_logging();

    let mut registry = configured_registry()?;

    // A per-source style file overrides one field and adds one style.
    let mut overlay = StyleRegistry::new();
    let mut blast = FeatureStyle::new("wublast", "")?;
    blast.set_width(12.0);
    overlay.add(blast);
    let mut est = FeatureStyle::new("est2genome", "EST alignments")?;
    est.set_mode(StyleMode::Alignment);
    overlay.add(est);

    registry.merge_from(overlay);
    registry.resolve();

    let blast = registry.find("wublast").unwrap();
    assert_eq!(blast.width(), 12.0);
    assert_eq!(blast.bump_mode(), BumpMode::Overlap);
    assert!(registry.find("est2genome").is_some());
    Ok(())
}
