use std::fmt::Display;

use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::typedef::PosType;
use crate::error::{
    AnnotreeError,
    Result,
};

/// A 1-based, inclusive coordinate range on the reference sequence.
///
/// Coordinates are always stored in forward orientation regardless of the
/// display strand; `start <= end` is enforced at construction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct Span {
    start: PosType,
    end:   PosType,
}

impl Span {
    pub fn new(
        start: PosType,
        end: PosType,
    ) -> Result<Self> {
        if start == 0 || end == 0 {
            return Err(AnnotreeError::ZeroCoordinate);
        }
        if start > end {
            return Err(AnnotreeError::InvalidSpan { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> PosType {
        self.start
    }

    pub fn end(&self) -> PosType {
        self.end
    }

    /// Number of bases covered (inclusive range, never zero).
    pub fn length(&self) -> PosType {
        self.end - self.start + 1
    }

    pub fn contains(
        &self,
        position: PosType,
    ) -> bool {
        position >= self.start && position <= self.end
    }

    pub fn overlaps(
        &self,
        other: &Span,
    ) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// True when `other` directly continues this span with no gap.
    pub fn abuts(
        &self,
        other: &Span,
    ) -> bool {
        other.start == self.end.saturating_add(1)
    }
}

impl Display for Span {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
