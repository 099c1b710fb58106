#![allow(dead_code)]

use annotree::prelude::*;

pub fn init_logging() {
    let _ = pretty_env_logger::try_init();
}

pub fn span(
    start: PosType,
    end: PosType,
) -> Span {
    Span::new(start, end).unwrap()
}

pub fn basic_feature(
    name: &str,
    start: PosType,
    end: PosType,
) -> Feature {
    Feature::new(name, FeatureKind::Basic, span(start, end), Strand::Forward)
        .unwrap()
}

/// Builds a single-alignment context: one 1:1 block over `1..10000` and one
/// feature set named `source` holding `features`.
pub fn context_with(
    sequence: &str,
    source: &str,
    features: Vec<Feature>,
) -> FeatureContext {
    let mut set = FeatureSet::new(source).unwrap();
    for feature in features {
        set.add_feature(feature);
    }

    let mut block = FeatureBlock::new(
        span(1, 10000),
        Strand::Forward,
        span(1, 10000),
        Strand::Forward,
    );
    block.add_feature_set(set);

    let mut alignment = FeatureAlignment::new(sequence).unwrap();
    alignment.add_block(block);

    let mut context = FeatureContext::new(sequence).unwrap();
    context.add_alignment(alignment, true).unwrap();
    context
}
