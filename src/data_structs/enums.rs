use std::convert::Infallible;
use std::fmt::Display;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug, PartialOrd, Ord, Default)]
pub enum Strand {
    /// Forward strand.
    Forward,
    /// Reverse strand.
    Reverse,
    /// No strand.
    #[default]
    None,
}

impl FromStr for Strand {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            _ => Ok(Strand::None),
        }
    }
}

impl From<Strand> for char {
    fn from(value: Strand) -> Self {
        match value {
            Strand::Forward => '+',
            Strand::Reverse => '-',
            Strand::None => '.',
        }
    }
}

impl From<bio_types::strand::Strand> for Strand {
    fn from(value: bio_types::strand::Strand) -> Self {
        match value {
            bio_types::strand::Strand::Forward => Strand::Forward,
            bio_types::strand::Strand::Reverse => Strand::Reverse,
            bio_types::strand::Strand::Unknown => Strand::None,
        }
    }
}

impl From<Strand> for bio_types::strand::Strand {
    fn from(value: Strand) -> Self {
        match value {
            Strand::Forward => bio_types::strand::Strand::Forward,
            Strand::Reverse => bio_types::strand::Strand::Reverse,
            Strand::None => bio_types::strand::Strand::Unknown,
        }
    }
}

impl Display for Strand {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

impl Serialize for Strand {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer, {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Strand {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>, {
        let s = String::deserialize(deserializer)?;
        std::str::FromStr::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Structural level of an entity in the feature tree, ordered root-first.
#[derive(
    Eq, Hash, PartialEq, Copy, Clone, Debug, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum FeatureLevel {
    Context,
    Alignment,
    Block,
    FeatureSet,
    Feature,
}

impl FeatureLevel {
    /// Distance from the context root (`Context` is 0, `Feature` is 4).
    pub fn depth(&self) -> usize {
        match self {
            FeatureLevel::Context => 0,
            FeatureLevel::Alignment => 1,
            FeatureLevel::Block => 2,
            FeatureLevel::FeatureSet => 3,
            FeatureLevel::Feature => 4,
        }
    }
}

impl Display for FeatureLevel {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let name = match self {
            FeatureLevel::Context => "context",
            FeatureLevel::Alignment => "alignment",
            FeatureLevel::Block => "block",
            FeatureLevel::FeatureSet => "featureset",
            FeatureLevel::Feature => "feature",
        };
        write!(f, "{}", name)
    }
}

/// Discriminator for the type-specific payload a feature carries.
#[derive(
    Eq, Hash, PartialEq, Copy, Clone, Debug, Default, Serialize, Deserialize,
)]
pub enum FeatureKind {
    #[default]
    Basic,
    Transcript,
    /// Gapped alignment of an external query sequence (homology hit).
    Alignment,
    RawSequence,
    PeptideSequence,
    Text,
    Graph,
    Glyph,
    Meta,
}

impl Display for FeatureKind {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let name = match self {
            FeatureKind::Basic => "basic",
            FeatureKind::Transcript => "transcript",
            FeatureKind::Alignment => "alignment",
            FeatureKind::RawSequence => "raw_sequence",
            FeatureKind::PeptideSequence => "peptide_sequence",
            FeatureKind::Text => "text",
            FeatureKind::Graph => "graph",
            FeatureKind::Glyph => "glyph",
            FeatureKind::Meta => "meta",
        };
        write!(f, "{}", name)
    }
}

/// Rendering mode of a style. Mirrors [`FeatureKind`] plus `Invalid` for
/// styles that have not been assigned a mode yet.
#[derive(
    Eq, Hash, PartialEq, Copy, Clone, Debug, Default, Serialize, Deserialize,
)]
pub enum StyleMode {
    #[default]
    Invalid,
    Basic,
    Transcript,
    Alignment,
    RawSequence,
    PeptideSequence,
    Text,
    Graph,
    Glyph,
    Meta,
}

impl From<FeatureKind> for StyleMode {
    fn from(value: FeatureKind) -> Self {
        match value {
            FeatureKind::Basic => StyleMode::Basic,
            FeatureKind::Transcript => StyleMode::Transcript,
            FeatureKind::Alignment => StyleMode::Alignment,
            FeatureKind::RawSequence => StyleMode::RawSequence,
            FeatureKind::PeptideSequence => StyleMode::PeptideSequence,
            FeatureKind::Text => StyleMode::Text,
            FeatureKind::Graph => StyleMode::Graph,
            FeatureKind::Glyph => StyleMode::Glyph,
            FeatureKind::Meta => StyleMode::Meta,
        }
    }
}

/// How overlapping features in a column are laid out.
#[derive(
    Eq, Hash, PartialEq, Copy, Clone, Debug, Default, Serialize, Deserialize,
)]
pub enum BumpMode {
    /// Draw features on top of each other, no bumping.
    #[default]
    Complete,
    /// Bump overlapping features into separate sub-columns.
    Overlap,
    /// Alternate overlapping features between two sub-columns.
    Alternating,
}

/// Drawing mode for graph-type feature sets.
#[derive(
    Eq, Hash, PartialEq, Copy, Clone, Debug, Default, Serialize, Deserialize,
)]
pub enum GraphMode {
    #[default]
    Histogram,
    Line,
    Heatmap,
}

/// Logical drawing target a colour specification applies to.
#[derive(
    Eq, Hash, PartialEq, Copy, Clone, Debug, Default, Serialize, Deserialize,
)]
pub enum ColourTarget {
    #[default]
    Normal,
    Frame0,
    Frame1,
    Frame2,
    Cds,
}

/// Selection state a colour specification applies to.
#[derive(
    Eq, Hash, PartialEq, Copy, Clone, Debug, Default, Serialize, Deserialize,
)]
pub enum ColourState {
    #[default]
    Normal,
    Selected,
}
