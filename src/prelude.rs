//! Convenient re-exports of the commonly used types and operations.

pub use crate::data_structs::typedef::{
    PhaseType,
    PosType,
    ScoreType,
    SmallStr,
};
pub use crate::data_structs::{
    BumpMode,
    ColourState,
    ColourTarget,
    FeatureKind,
    FeatureLevel,
    GraphMode,
    Span,
    Strand,
    StyleMode,
};
pub use crate::error::{
    AnnotreeError,
    Result,
    StyleWarning,
};
pub use crate::feature::{
    make_block_id,
    make_feature_set_id,
    make_unique_name,
    merge_context,
    name_of,
    validate,
    AlignBlock,
    AlignmentDiff,
    BlockDiff,
    ContextDiff,
    EntityView,
    Feature,
    FeatureAlignment,
    FeatureAny,
    FeatureBlock,
    FeatureContext,
    FeaturePayload,
    FeatureSet,
    FeatureSetDiff,
    HomologyData,
    MergeOutcome,
    ParentPath,
    TranscriptData,
};
pub use crate::style::{
    predefined,
    resolve_styles,
    Colour,
    ColourEntry,
    ColourSpec,
    FeatureStyle,
    Resolution,
    StyleFields,
    StyleRegistry,
};
pub use crate::utils::normalize_name;
