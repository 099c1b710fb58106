//! Typed error model.
//!
//! Precondition violations are returned to the caller as [`AnnotreeError`]
//! values instead of aborting, so they stay testable.
//! Style resolution problems are deliberately *not* errors: they are
//! [`StyleWarning`]s scoped to a single style, because one broken style must
//! not block the rest of a style set from rendering.

use thiserror::Error;

use crate::data_structs::typedef::{
    PhaseType,
    PosType,
    SmallStr,
};
use crate::data_structs::{
    FeatureKind,
    FeatureLevel,
};

pub type Result<T, E = AnnotreeError> = std::result::Result<T, E>;

/// Invalid-argument class failures raised by entity construction and
/// structural operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnnotreeError {
    #[error("invalid span: start {start} is greater than end {end}")]
    InvalidSpan { start: PosType, end: PosType },

    #[error("coordinates are 1-based, zero is not a valid position")]
    ZeroCoordinate,

    #[error("entity name must not be empty")]
    EmptyName,

    #[error("operation requires a {expected} feature, found {found}")]
    KindMismatch {
        expected: FeatureKind,
        found:    FeatureKind,
    },

    #[error("phase must be 0, 1 or 2, got {0}")]
    InvalidPhase(PhaseType),

    #[error("invalid colour specification '{0}'")]
    InvalidColour(String),

    #[error("context already has master alignment '{0}'")]
    MasterAlreadySet(SmallStr),

    #[error("entity at level {level} cannot be attached here")]
    InvalidLevel { level: FeatureLevel },
}

/// Per-style, non-fatal problems reported by the cascade resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleWarning {
    #[error("style '{style}' inherits from unknown parent style '{parent}'")]
    MissingParent { style: SmallStr, parent: SmallStr },

    #[error("style '{style}' is part of an inheritance cycle")]
    InheritanceCycle { style: SmallStr },
}

impl StyleWarning {
    /// The style the warning is reported against.
    pub fn style(&self) -> &SmallStr {
        match self {
            StyleWarning::MissingParent { style, .. } => style,
            StyleWarning::InheritanceCycle { style } => style,
        }
    }
}
