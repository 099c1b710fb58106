//! Shared primitives for the feature store: identifier and coordinate type
//! aliases ([`typedef`]), the common enumerations used across the crate
//! ([`Strand`], [`FeatureLevel`], [`FeatureKind`], style enums), and the
//! validated 1-based inclusive coordinate range [`Span`].

pub mod enums;
pub mod span;
pub mod typedef;

pub use enums::{
    BumpMode,
    ColourState,
    ColourTarget,
    FeatureKind,
    FeatureLevel,
    GraphMode,
    Strand,
    StyleMode,
};
pub use span::Span;
