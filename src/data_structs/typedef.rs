use smallstr::SmallString;

pub const SMALLSTR_SIZE: usize = 24;

/// Inline-allocated string used for entity identifiers and names.
pub type SmallStr = SmallString<[u8; SMALLSTR_SIZE]>;
/// 1-based genomic coordinate.
pub type PosType = u32;
/// Feature score.
pub type ScoreType = f64;
/// Reading-frame phase (0..=2).
pub type PhaseType = u8;
