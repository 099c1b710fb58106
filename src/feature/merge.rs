//! Context merge: folds an incoming context into the current one and
//! reports which parts of the tree are newly present.
//!
//! The diff is an id skeleton over the merged tree, not a second copy of
//! the data. Each node records whether the entity it names was added by
//! this merge; a node with `added == false` exists only because something
//! below it was added. Resolve skeleton ids against the merged context to
//! reach the entities themselves.

use std::fmt;

use indexmap::map::Entry;
use indexmap::{
    IndexMap,
    IndexSet,
};
use serde::Serialize;

use crate::data_structs::typedef::SmallStr;
use crate::feature::{
    Feature,
    FeatureAlignment,
    FeatureBlock,
    FeatureContext,
    FeatureSet,
};

/// Result of [`merge_context`].
#[derive(Debug, Clone, PartialEq)]
pub enum MergeOutcome {
    /// The incoming context contributed nothing new.
    Unchanged,
    /// At least one entity was added; the diff names every one of them.
    Merged(ContextDiff),
}

impl MergeOutcome {
    pub fn diff(&self) -> Option<&ContextDiff> {
        match self {
            MergeOutcome::Merged(diff) => Some(diff),
            MergeOutcome::Unchanged => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FeatureSetDiff {
    pub added:    bool,
    pub features: IndexSet<SmallStr>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BlockDiff {
    pub added:        bool,
    pub feature_sets: IndexMap<SmallStr, FeatureSetDiff>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AlignmentDiff {
    pub added:  bool,
    pub blocks: IndexMap<SmallStr, BlockDiff>,
}

/// Id skeleton of everything one merge added to a context.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ContextDiff {
    pub alignments: IndexMap<SmallStr, AlignmentDiff>,
}

impl FeatureSetDiff {
    fn skeleton_of(set: &FeatureSet) -> Self {
        Self {
            added:    true,
            features: set.features.keys().cloned().collect(),
        }
    }

    fn is_empty(&self) -> bool {
        !self.added && self.features.is_empty()
    }
}

impl BlockDiff {
    fn skeleton_of(block: &FeatureBlock) -> Self {
        Self {
            added:        true,
            feature_sets: block
                .feature_sets
                .iter()
                .map(|(id, set)| {
                    (id.clone(), FeatureSetDiff::skeleton_of(set))
                })
                .collect(),
        }
    }

    fn is_empty(&self) -> bool {
        !self.added && self.feature_sets.is_empty()
    }
}

impl AlignmentDiff {
    fn skeleton_of(alignment: &FeatureAlignment) -> Self {
        Self {
            added:  true,
            blocks: alignment
                .blocks
                .iter()
                .map(|(id, block)| (id.clone(), BlockDiff::skeleton_of(block)))
                .collect(),
        }
    }

    fn is_empty(&self) -> bool {
        !self.added && self.blocks.is_empty()
    }
}

impl ContextDiff {
    fn skeleton_of(context: &FeatureContext) -> Self {
        Self {
            alignments: context
                .alignments
                .iter()
                .map(|(id, alignment)| {
                    (id.clone(), AlignmentDiff::skeleton_of(alignment))
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.alignments.is_empty()
    }

    /// Number of individual features named by this diff.
    pub fn feature_count(&self) -> usize {
        self.alignments
            .values()
            .flat_map(|a| a.blocks.values())
            .flat_map(|b| b.feature_sets.values())
            .map(|s| s.features.len())
            .sum()
    }

    /// Resolves the diff's feature ids against the merged context.
    ///
    /// Skeleton ids always resolve directly after the merge that produced
    /// the diff; features removed from the context since then are silently
    /// skipped.
    pub fn new_features<'a>(
        &self,
        context: &'a FeatureContext,
    ) -> Vec<&'a Feature> {
        let mut out = Vec::with_capacity(self.feature_count());
        for (align_id, align_diff) in &self.alignments {
            let Some(alignment) = context.alignments.get(align_id)
            else {
                continue;
            };
            for (block_id, block_diff) in &align_diff.blocks {
                let Some(block) = alignment.blocks.get(block_id)
                else {
                    continue;
                };
                for (set_id, set_diff) in &block_diff.feature_sets {
                    let Some(set) = block.feature_sets.get(set_id)
                    else {
                        continue;
                    };
                    out.extend(
                        set_diff
                            .features
                            .iter()
                            .filter_map(|id| set.features.get(id)),
                    );
                }
            }
        }
        out
    }
}

impl fmt::Display for ContextDiff {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let repr = serde_json::to_string_pretty(self)
            .map_err(|_| fmt::Error)?;
        write!(f, "{}", repr)
    }
}

/// Folds `incoming` into `current`.
///
/// When `current` is empty the incoming context is adopted wholesale and
/// the diff names every entity it carries. Otherwise entities are matched
/// by unique id level by level; unmatched subtrees move across (and are
/// re-anchored under their new ancestry), matched interior entities
/// recurse, and duplicate leaf features are discarded in favour of the
/// incumbent. The incoming context is consumed either way, so every
/// feature ends up owned by exactly one tree.
pub fn merge_context(
    current: &mut Option<FeatureContext>,
    incoming: FeatureContext,
) -> MergeOutcome {
    let Some(context) = current
    else {
        let diff = ContextDiff::skeleton_of(&incoming);
        *current = Some(incoming);
        if diff.is_empty() {
            return MergeOutcome::Unchanged;
        }
        return MergeOutcome::Merged(diff);
    };

    let mut diff = ContextDiff::default();

    // Metadata reconciles adopt-if-absent; the master flag is
    // first-writer-wins.
    if context.display_span.is_none() {
        context.display_span = incoming.display_span;
    }
    context
        .style_names
        .extend(incoming.style_names);
    let incoming_master = incoming.master_alignment;

    for (align_id, incoming_align) in incoming.alignments {
        match context.alignments.entry(align_id.clone()) {
            Entry::Vacant(slot) => {
                let alignment = slot.insert(incoming_align);
                alignment.reparent();
                diff.alignments
                    .insert(align_id, AlignmentDiff::skeleton_of(alignment));
            },
            Entry::Occupied(mut slot) => {
                let align_diff =
                    merge_alignment(slot.get_mut(), incoming_align);
                if !align_diff.is_empty() {
                    diff.alignments.insert(align_id, align_diff);
                }
            },
        }
    }

    if context.master_alignment.is_none() {
        if let Some(master) = incoming_master {
            if context.alignments.contains_key(&master) {
                context.master_alignment = Some(master);
            }
        }
    }

    if diff.is_empty() {
        MergeOutcome::Unchanged
    }
    else {
        MergeOutcome::Merged(diff)
    }
}

fn merge_alignment(
    current: &mut FeatureAlignment,
    incoming: FeatureAlignment,
) -> AlignmentDiff {
    let mut diff = AlignmentDiff::default();
    let child_base = current.child_base();

    for (block_id, incoming_block) in incoming.blocks {
        match current.blocks.entry(block_id.clone()) {
            Entry::Vacant(slot) => {
                let block = slot.insert(incoming_block);
                block.reparent(&child_base);
                diff.blocks
                    .insert(block_id, BlockDiff::skeleton_of(block));
            },
            Entry::Occupied(mut slot) => {
                let block_diff =
                    merge_block(slot.get_mut(), incoming_block);
                if !block_diff.is_empty() {
                    diff.blocks.insert(block_id, block_diff);
                }
            },
        }
    }

    diff
}

fn merge_block(
    current: &mut FeatureBlock,
    incoming: FeatureBlock,
) -> BlockDiff {
    let mut diff = BlockDiff::default();
    let child_base = current.child_base();

    if current.dna.is_none() {
        current.dna = incoming.dna;
    }

    for (set_id, incoming_set) in incoming.feature_sets {
        match current.feature_sets.entry(set_id.clone()) {
            Entry::Vacant(slot) => {
                let set = slot.insert(incoming_set);
                set.reparent(&child_base);
                diff.feature_sets
                    .insert(set_id, FeatureSetDiff::skeleton_of(set));
            },
            Entry::Occupied(mut slot) => {
                let set_diff =
                    merge_feature_set(slot.get_mut(), incoming_set);
                if !set_diff.is_empty() {
                    diff.feature_sets.insert(set_id, set_diff);
                }
            },
        }
    }

    diff
}

fn merge_feature_set(
    current: &mut FeatureSet,
    incoming: FeatureSet,
) -> FeatureSetDiff {
    let mut diff = FeatureSetDiff::default();
    let child_base = current.child_base();

    if current.style.is_none() {
        current.style = incoming.style;
    }

    for (feature_id, mut incoming_feature) in incoming.features {
        match current.features.entry(feature_id.clone()) {
            Entry::Vacant(slot) => {
                incoming_feature.parent = Some(child_base.clone());
                slot.insert(incoming_feature);
                diff.features.insert(feature_id);
            },
            Entry::Occupied(_) => {
                log::debug!(
                    "merge: duplicate feature '{}' in set '{}' discarded",
                    feature_id,
                    current.unique_id
                );
            },
        }
    }

    diff
}
