use rstest::rstest;

use super::*;
use crate::data_structs::typedef::SmallStr;
use crate::data_structs::{
    BumpMode,
    ColourState,
    ColourTarget,
    StyleMode,
};
use crate::error::StyleWarning;

fn colour(hex: &str) -> Colour {
    hex.parse().unwrap()
}

fn fill_spec(hex: &str) -> ColourSpec {
    ColourSpec {
        fill: Some(colour(hex)),
        ..ColourSpec::default()
    }
}

fn id(s: &str) -> SmallStr {
    SmallStr::from(s)
}

#[rstest]
#[case("#ff0000", Colour { r: 255, g: 0, b: 0 })]
#[case("#00a1Ff", Colour { r: 0, g: 161, b: 255 })]
fn colour_parsing(
    #[case] input: &str,
    #[case] expected: Colour,
) {
    assert_eq!(colour(input), expected);
}

#[rstest]
#[case("ff0000")]
#[case("#ff00")]
#[case("#gg0000")]
fn colour_parsing_rejects(#[case] input: &str) {
    assert!(input.parse::<Colour>().is_err());
}

#[rstest]
fn colour_roundtrips_through_display() {
    let c = colour("#12ab34");
    assert_eq!(c.to_string().parse::<Colour>().unwrap(), c);
}

#[rstest]
fn new_style_has_documented_defaults() {
    let style = FeatureStyle::new("WuBlast", "blast hits").unwrap();
    assert_eq!(style.unique_id(), &id("wublast"));
    assert_eq!(style.name(), &id("WuBlast"));
    assert_eq!(style.mode(), StyleMode::Invalid);
    assert_eq!(style.bump_mode(), BumpMode::Complete);
    assert!(style.parse_gaps());
    assert_eq!(style.mag_range(), (0.0, 0.0));
    assert!(style.fields_set().is_empty());
}

#[rstest]
fn setters_flip_the_matching_bit() {
    let mut style = FeatureStyle::new("s", "").unwrap();
    style.set_width(7.0);
    style.set_strand_specific(true);
    assert!(style.is_set(StyleFields::WIDTH));
    assert!(style.is_set(StyleFields::STRAND_SPECIFIC));
    assert!(!style.is_set(StyleFields::MODE));
}

#[rstest]
fn invalid_width_is_skipped() {
    let mut style = FeatureStyle::new("s", "").unwrap();
    style.set_width(0.0);
    assert_eq!(style.width(), 0.0);
    assert!(!style.is_set(StyleFields::WIDTH));

    style.set_mag(Some(-1.0), Some(10.0));
    assert!(!style.is_set(StyleFields::MIN_MAG));
    assert!(style.is_set(StyleFields::MAX_MAG));
    assert_eq!(style.mag_range(), (0.0, 10.0));
}

#[rstest]
fn merge_overwrites_only_set_fields() {
    let mut current = FeatureStyle::new("base", "").unwrap();
    current.set_width(5.0);
    current.set_bump_mode(BumpMode::Overlap);

    let mut incoming = FeatureStyle::new("override", "").unwrap();
    incoming.set_width(9.0);

    current.merge_from(&incoming);
    assert_eq!(current.width(), 9.0);
    // Not set on incoming, untouched.
    assert_eq!(current.bump_mode(), BumpMode::Overlap);
    // Identity always wins.
    assert_eq!(current.unique_id(), &id("override"));
    assert!(current.is_set(StyleFields::WIDTH));
    assert!(current.is_set(StyleFields::BUMP_MODE));
}

#[rstest]
fn colour_merge_is_per_slot_and_per_subfield() {
    let mut current = FeatureStyle::new("s", "").unwrap();
    current.set_colours(
        ColourTarget::Normal,
        ColourState::Normal,
        ColourSpec {
            fill:       Some(colour("#ff0000")),
            outline:    Some(colour("#000000")),
            background: None,
        },
    );

    let mut incoming = FeatureStyle::new("s", "").unwrap();
    incoming.set_colours(
        ColourTarget::Normal,
        ColourState::Normal,
        fill_spec("#00ff00"),
    );
    incoming.set_colours(
        ColourTarget::Cds,
        ColourState::Selected,
        fill_spec("#0000ff"),
    );

    current.merge_from(&incoming);
    let normal = current
        .colour(ColourTarget::Normal, ColourState::Normal)
        .unwrap();
    assert_eq!(normal.fill, Some(colour("#00ff00")));
    // Sub-field absent on incoming stays.
    assert_eq!(normal.outline, Some(colour("#000000")));
    assert!(current
        .colour(ColourTarget::Cds, ColourState::Selected)
        .is_some());
}

#[rstest]
fn inheritance_flattens_without_mutating_ancestors() {
    let mut registry = StyleRegistry::new();

    let mut a = FeatureStyle::new("A", "root").unwrap();
    a.set_colours(
        ColourTarget::Normal,
        ColourState::Normal,
        fill_spec("#ff0000"),
    );
    let mut b = FeatureStyle::new("B", "").unwrap();
    b.set_parent("A");
    let mut c = FeatureStyle::new("C", "").unwrap();
    c.set_parent("B");
    c.set_width(3.0);
    registry.add(a);
    registry.add(b);
    registry.add(c);

    let resolution = registry.resolve();
    assert!(resolution.success());

    let c = registry.find("C").unwrap();
    assert_eq!(c.width(), 3.0);
    assert_eq!(
        c.colour(ColourTarget::Normal, ColourState::Normal)
            .unwrap()
            .fill,
        Some(colour("#ff0000"))
    );
    assert_eq!(c.unique_id(), &id("c"));

    // Ancestors keep their own values.
    let a = registry.find("A").unwrap();
    assert!(!a.is_set(StyleFields::WIDTH));
    let b = registry.find("B").unwrap();
    assert_eq!(
        b.colour(ColourTarget::Normal, ColourState::Normal)
            .unwrap()
            .fill,
        Some(colour("#ff0000"))
    );
    assert!(!b.is_set(StyleFields::WIDTH));
}

#[rstest]
fn cycle_is_contained_to_its_chain() {
    let mut registry = StyleRegistry::new();

    let mut x = FeatureStyle::new("X", "").unwrap();
    x.set_parent("Y");
    let mut y = FeatureStyle::new("Y", "").unwrap();
    y.set_parent("X");
    registry.add(x);
    registry.add(y);

    for i in 0..9 {
        let name = format!("plain{}", i);
        registry.add(FeatureStyle::new(&name, "").unwrap());
    }

    let resolution = registry.resolve();
    assert!(!resolution.success());
    assert_eq!(resolution.warnings().len(), 1);
    assert!(matches!(
        resolution.warnings()[0],
        StyleWarning::InheritanceCycle { .. }
    ));
    assert_eq!(registry.len(), 11);
}

#[rstest]
fn inheriting_from_a_cycle_member_is_flagged_not_merged() {
    let mut registry = StyleRegistry::new();

    let mut x = FeatureStyle::new("X", "").unwrap();
    x.set_parent("Y");
    let mut y = FeatureStyle::new("Y", "").unwrap();
    y.set_parent("X");
    y.set_width(30.0);
    registry.add(x);
    registry.add(y);

    // A healthy-looking style whose parent sits inside the cycle.
    let mut w = FeatureStyle::new("W", "").unwrap();
    w.set_parent("Y");
    registry.add(w);

    let resolution = registry.resolve();
    // One warning for the cycle itself, one for the style that inherits
    // into it.
    assert_eq!(resolution.warnings().len(), 2);
    assert!(resolution
        .warnings()
        .iter()
        .any(|warning| warning.style() == &id("w")));

    // W keeps its as-authored state: nothing inherited from the
    // unresolvable ancestor.
    let w = registry.find("W").unwrap();
    assert!(!w.is_set(StyleFields::WIDTH));
    assert_eq!(w.width(), 0.0);
}

#[rstest]
fn missing_parent_is_a_single_warning() {
    let mut registry = StyleRegistry::new();
    let mut orphan = FeatureStyle::new("orphan", "").unwrap();
    orphan.set_parent("nowhere");
    registry.add(orphan);
    registry.add(FeatureStyle::new("plain", "").unwrap());

    let resolution = registry.resolve();
    assert_eq!(resolution.warnings().len(), 1);
    match &resolution.warnings()[0] {
        StyleWarning::MissingParent { style, parent } => {
            assert_eq!(style, &id("orphan"));
            assert_eq!(parent, &id("nowhere"));
        },
        other => panic!("unexpected warning {:?}", other),
    }
}

#[rstest]
fn registry_merge_upserts() {
    let mut current = StyleRegistry::new();
    let mut base = FeatureStyle::new("shared", "").unwrap();
    base.set_bump_mode(BumpMode::Alternating);
    current.add(base);

    let mut incoming = StyleRegistry::new();
    let mut update = FeatureStyle::new("shared", "").unwrap();
    update.set_width(2.0);
    incoming.add(update);
    incoming.add(FeatureStyle::new("fresh", "").unwrap());

    current.merge_from(incoming);
    assert_eq!(current.len(), 2);
    let shared = current.find("shared").unwrap();
    assert_eq!(shared.width(), 2.0);
    assert_eq!(shared.bump_mode(), BumpMode::Alternating);
    assert!(current.find("fresh").is_some());
}

#[rstest]
fn lookup_normalises_names() {
    let mut registry = StyleRegistry::new();
    registry.add(FeatureStyle::new("WuBlast", "").unwrap());
    assert!(registry.find(" WUBLAST ").is_some());
    assert!(registry.find("no-such").is_none());
}

#[rstest]
fn predefined_styles_are_fresh_copies() {
    let registry = StyleRegistry::with_predefined();
    assert_eq!(registry.len(), 5);

    let mut first = predefined("dna").unwrap();
    first.set_hidden(true);
    let second = predefined("dna").unwrap();
    assert!(!second.is_set(StyleFields::HIDDEN));
    assert_eq!(second.mode(), StyleMode::RawSequence);
}

#[rstest]
fn names_are_sorted() {
    let mut registry = StyleRegistry::new();
    registry.add(FeatureStyle::new("zulu", "").unwrap());
    registry.add(FeatureStyle::new("alpha", "").unwrap());
    assert_eq!(registry.names(), vec![id("alpha"), id("zulu")]);
}
