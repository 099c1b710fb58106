//! End-to-end ingestion scenario: repeated parses of the same region merged
//! into one context, with the diff driving what a renderer would redraw.

mod common;

use annotree::prelude::*;
use anyhow::Result;
use common::{
    basic_feature,
    context_with,
    init_logging,
    span,
};
use rstest::rstest;

#[rstest]
fn incremental_ingestion_reports_only_additions() -> Result<()> {
    init_logging();

    // First parse: alignment "A", block 1-1000, set "genes", geneX.
    let mut current = None;
    let first = context_with("A", "genes", vec![basic_feature(
        "geneX", 100, 200,
    )]);
    let outcome = merge_context(&mut current, first);

    let diff = outcome.diff().expect("first merge adds everything");
    assert_eq!(diff.feature_count(), 1);
    {
        let merged = current.as_ref().unwrap();
        assert_eq!(merged.feature_count(), 1);
        let new = diff.new_features(merged);
        assert_eq!(new[0].original_id().as_str(), "geneX");
    }

    // Second parse: same path, geneY added plus a duplicate geneX carrying
    // a different score.
    let second = context_with("A", "genes", vec![
        basic_feature("geneX", 100, 200).with_score(Some(55.0)),
        basic_feature("geneY", 300, 400),
    ]);
    let outcome = merge_context(&mut current, second);

    let diff = outcome.diff().expect("geneY is new");
    assert_eq!(diff.feature_count(), 1);

    let merged = current.as_ref().unwrap();
    assert_eq!(merged.feature_count(), 2);
    let new = diff.new_features(merged);
    assert_eq!(new.len(), 1);
    assert_eq!(new[0].original_id().as_str(), "geneY");

    // The duplicate geneX was discarded, the incumbent keeps its (absent)
    // score.
    let set = merged
        .master_alignment()
        .unwrap()
        .blocks()
        .values()
        .next()
        .unwrap()
        .feature_sets()
        .values()
        .next()
        .unwrap();
    let gene_x = set
        .feature(&make_unique_name(
            FeatureKind::Basic,
            "geneX",
            Strand::Forward,
            100,
            200,
            None,
        )?)
        .unwrap();
    assert_eq!(gene_x.score(), None);

    // Third parse repeats the second exactly: nothing left to add.
    let third = context_with("A", "genes", vec![
        basic_feature("geneX", 100, 200),
        basic_feature("geneY", 300, 400),
    ]);
    assert_eq!(merge_context(&mut current, third), MergeOutcome::Unchanged);
    Ok(())
}

#[rstest]
fn merged_subtrees_stay_navigable() -> Result<()> {
    init_logging();

    let mut current = None;
    merge_context(
        &mut current,
        context_with("chr4", "genes", vec![basic_feature(
            "geneX", 100, 200,
        )]),
    );

    // A second source arrives for the same block.
    let mut est = FeatureSet::new("est2genome")?;
    est.add_feature(basic_feature("estA", 700, 800));
    let mut block = FeatureBlock::new(
        span(1, 10000),
        Strand::Forward,
        span(1, 10000),
        Strand::Forward,
    );
    block.add_feature_set(est);
    let mut alignment = FeatureAlignment::new("chr4")?;
    alignment.add_block(block);
    let mut incoming = FeatureContext::new("chr4")?;
    incoming.add_alignment(alignment, false)?;

    let outcome = merge_context(&mut current, incoming);
    let diff = outcome.diff().unwrap();

    let merged = current.as_ref().unwrap();
    for feature in diff.new_features(merged) {
        // Every transferred feature resolves its ancestry in the merged
        // tree.
        let set = merged
            .ancestor_of(EntityView::Feature(feature), FeatureLevel::FeatureSet)
            .unwrap();
        assert_eq!(set.unique_id().as_str(), "est2genome");
        let context = merged
            .ancestor_of(EntityView::Feature(feature), FeatureLevel::Context)
            .unwrap();
        assert_eq!(context.unique_id().as_str(), "chr4");
    }

    // Both sources hang off the one block now.
    let block = merged
        .master_alignment()
        .unwrap()
        .blocks()
        .values()
        .next()
        .unwrap();
    assert_eq!(block.feature_sets().len(), 2);
    Ok(())
}

#[rstest]
fn transcript_assembly_survives_merge() -> Result<()> {
    init_logging();

    let mut tx = Feature::new(
        "tx1",
        FeatureKind::Transcript,
        span(100, 900),
        Strand::Reverse,
    )?;
    tx.add_exon(span(100, 300))?;
    tx.add_exon(span(600, 900))?;
    tx.add_intron(span(301, 599))?;
    tx.set_cds(span(150, 850))?;

    let mut current = None;
    merge_context(&mut current, context_with("chr1", "genes", vec![tx]));

    let merged = current.as_ref().unwrap();
    let set = merged
        .master_alignment()
        .unwrap()
        .blocks()
        .values()
        .next()
        .unwrap()
        .feature_sets()
        .values()
        .next()
        .unwrap();
    let tx = set.features().values().next().unwrap();
    let data = tx.transcript().unwrap();
    assert_eq!(data.exons.len(), 2);
    assert_eq!(data.cds, Some(span(150, 850)));
    Ok(())
}
