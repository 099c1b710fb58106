//! The five-level feature tree.
//!
//! A [`FeatureContext`] owns [`FeatureAlignment`]s, which own
//! [`FeatureBlock`]s, which own [`FeatureSet`]s, which own [`Feature`]s.
//! Every entity is keyed by a content-derived unique id, so the same
//! annotation loaded twice lands on the same key and insertion becomes a
//! no-op. [`merge_context`] exploits that to fold independently built
//! trees together.

mod alignment;
mod block;
mod context;
#[allow(clippy::module_inception)]
mod feature;
mod feature_set;
mod ident;
mod merge;

pub use alignment::FeatureAlignment;
pub use block::FeatureBlock;
pub use context::FeatureContext;
pub use feature::{
    AlignBlock,
    Feature,
    FeaturePayload,
    HomologyData,
    TranscriptData,
};
pub use feature_set::FeatureSet;
pub use ident::{
    make_block_id,
    make_feature_set_id,
    make_unique_name,
    name_of,
    validate,
    EntityView,
    FeatureAny,
    ParentPath,
};
pub use merge::{
    merge_context,
    AlignmentDiff,
    BlockDiff,
    ContextDiff,
    FeatureSetDiff,
    MergeOutcome,
};
