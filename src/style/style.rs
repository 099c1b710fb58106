use std::fmt::Display;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::typedef::SmallStr;
use crate::data_structs::{
    BumpMode,
    ColourState,
    ColourTarget,
    GraphMode,
    StyleMode,
};
use crate::error::{
    AnnotreeError,
    Result,
};
use crate::utils::normalize_name;

/// An opaque RGB colour, parsed from and printed as `#rrggbb`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl FromStr for Colour {
    type Err = AnnotreeError;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s
            .strip_prefix('#')
            .filter(|hex| hex.len() == 6)
            .ok_or_else(|| AnnotreeError::InvalidColour(s.to_string()))?;
        let parse = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| AnnotreeError::InvalidColour(s.to_string()))
        };
        Ok(Self {
            r: parse(0..2)?,
            g: parse(2..4)?,
            b: parse(4..6)?,
        })
    }
}

impl Display for Colour {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Paint parameters for one (target, state) slot. Absent sub-fields fall
/// back to whatever the renderer defaults to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub struct ColourSpec {
    pub fill:       Option<Colour>,
    pub outline:    Option<Colour>,
    pub background: Option<Colour>,
}

impl ColourSpec {
    /// Overlays the present sub-fields of `incoming` onto `self`.
    fn merge_from(
        &mut self,
        incoming: &ColourSpec,
    ) {
        if incoming.fill.is_some() {
            self.fill = incoming.fill;
        }
        if incoming.outline.is_some() {
            self.outline = incoming.outline;
        }
        if incoming.background.is_some() {
            self.background = incoming.background;
        }
    }
}

/// One assigned colour slot of a style.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub struct ColourEntry {
    pub target: ColourTarget,
    pub state:  ColourState,
    pub spec:   ColourSpec,
}

bitflags! {
    /// Explicit-assignment bits, one per overridable style field.
    ///
    /// A bit is set iff the field was assigned through a setter, as opposed
    /// to inherited or left at construction default. Override merge and
    /// inheritance resolution consult these bits, never the raw values.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct StyleFields: u32 {
        const MODE             = 1 << 0;
        const DESCRIPTION      = 1 << 1;
        const COLOURS          = 1 << 2;
        const BUMP_MODE        = 1 << 3;
        const BUMP_WIDTH       = 1 << 4;
        const WIDTH            = 1 << 5;
        const MIN_MAG          = 1 << 6;
        const MAX_MAG          = 1 << 7;
        const MIN_SCORE        = 1 << 8;
        const MAX_SCORE        = 1 << 9;
        const GRAPH_MODE       = 1 << 10;
        const GRAPH_BASELINE   = 1 << 11;
        const STRAND_SPECIFIC  = 1 << 12;
        const FRAME_SPECIFIC   = 1 << 13;
        const SHOW_REVERSE     = 1 << 14;
        const PARSE_GAPS       = 1 << 15;
        const ALIGN_GAPS       = 1 << 16;
        const JOIN_ALIGNS      = 1 << 17;
        const DIRECTIONAL_ENDS = 1 << 18;
        const HIDDEN           = 1 << 19;
        const ALWAYS_HIDDEN    = 1 << 20;
        const SHOW_WHEN_EMPTY  = 1 << 21;
    }
}

impl Default for StyleFields {
    fn default() -> Self {
        StyleFields::empty()
    }
}

impl Serialize for StyleFields {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer, {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for StyleFields {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>, {
        let bits = u32::deserialize(deserializer)?;
        Ok(StyleFields::from_bits_retain(bits))
    }
}

macro_rules! flag_setter {
    ($field:ident, $bit:ident) => {
        paste::paste! {
            pub fn [<set_ $field>](
                &mut self,
                value: bool,
            ) {
                self.$field = value;
                self.fields_set.insert(StyleFields::$bit);
            }
        }
    };
}

/// A named rendering/behaviour descriptor for feature sets.
///
/// Styles have value semantics: duplication is a deep copy and callers
/// needing a mutable variant of a shared registry style copy first. The
/// `fields_set` bitset makes override merge well-defined, see
/// [`FeatureStyle::merge_from`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureStyle {
    pub(crate) unique_id:        SmallStr,
    pub(crate) original_id:      SmallStr,
    pub(crate) description:      String,
    pub(crate) parent_id:        Option<SmallStr>,
    pub(crate) mode:             StyleMode,
    pub(crate) colours:          Vec<ColourEntry>,
    pub(crate) bump_mode:        BumpMode,
    pub(crate) bump_width:       f64,
    pub(crate) width:            f64,
    pub(crate) min_mag:          f64,
    pub(crate) max_mag:          f64,
    pub(crate) min_score:        f64,
    pub(crate) max_score:        f64,
    pub(crate) graph_mode:       GraphMode,
    pub(crate) graph_baseline:   f64,
    pub(crate) strand_specific:  bool,
    pub(crate) frame_specific:   bool,
    pub(crate) show_reverse:     bool,
    pub(crate) parse_gaps:       bool,
    pub(crate) align_gaps:       bool,
    pub(crate) join_aligns:      bool,
    pub(crate) directional_ends: bool,
    pub(crate) hidden:           bool,
    pub(crate) always_hidden:    bool,
    pub(crate) show_when_empty:  bool,
    pub(crate) fields_set:       StyleFields,
}

impl FeatureStyle {
    /// Creates a style with every override bit clear. Mode starts
    /// `Invalid`, overlap handling at no-bump, gap parsing on, and both
    /// magnification bounds at zero meaning unset.
    pub fn new(
        name: &str,
        description: &str,
    ) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(AnnotreeError::EmptyName);
        }
        Ok(Self {
            unique_id:        normalize_name(name),
            original_id:      SmallStr::from(name.trim()),
            description:      description.to_string(),
            parent_id:        None,
            mode:             StyleMode::Invalid,
            colours:          Vec::new(),
            bump_mode:        BumpMode::Complete,
            bump_width:       0.0,
            width:            0.0,
            min_mag:          0.0,
            max_mag:          0.0,
            min_score:        0.0,
            max_score:        0.0,
            graph_mode:       GraphMode::Histogram,
            graph_baseline:   0.0,
            strand_specific:  false,
            frame_specific:   false,
            show_reverse:     false,
            parse_gaps:       true,
            align_gaps:       false,
            join_aligns:      false,
            directional_ends: false,
            hidden:           false,
            always_hidden:    false,
            show_when_empty:  false,
            fields_set:       StyleFields::empty(),
        })
    }

    pub fn unique_id(&self) -> &SmallStr {
        &self.unique_id
    }

    pub fn name(&self) -> &SmallStr {
        &self.original_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parent_id(&self) -> Option<&SmallStr> {
        self.parent_id.as_ref()
    }

    /// Declares the named parent this style inherits from. The name is
    /// resolved later by the cascade pass.
    pub fn set_parent(
        &mut self,
        name: &str,
    ) {
        self.parent_id = Some(normalize_name(name));
    }

    pub fn mode(&self) -> StyleMode {
        self.mode
    }

    pub fn colours(&self) -> &[ColourEntry] {
        &self.colours
    }

    pub fn colour(
        &self,
        target: ColourTarget,
        state: ColourState,
    ) -> Option<&ColourSpec> {
        self.colours
            .iter()
            .find(|entry| entry.target == target && entry.state == state)
            .map(|entry| &entry.spec)
    }

    pub fn bump_mode(&self) -> BumpMode {
        self.bump_mode
    }

    pub fn bump_width(&self) -> f64 {
        self.bump_width
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn mag_range(&self) -> (f64, f64) {
        (self.min_mag, self.max_mag)
    }

    pub fn score_range(&self) -> (f64, f64) {
        (self.min_score, self.max_score)
    }

    pub fn graph_mode(&self) -> GraphMode {
        self.graph_mode
    }

    pub fn graph_baseline(&self) -> f64 {
        self.graph_baseline
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden || self.always_hidden
    }

    pub fn parse_gaps(&self) -> bool {
        self.parse_gaps
    }

    pub fn fields_set(&self) -> StyleFields {
        self.fields_set
    }

    pub fn is_set(
        &self,
        field: StyleFields,
    ) -> bool {
        self.fields_set.contains(field)
    }

    pub fn set_mode(
        &mut self,
        mode: StyleMode,
    ) {
        self.mode = mode;
        self.fields_set.insert(StyleFields::MODE);
    }

    pub fn set_description(
        &mut self,
        description: &str,
    ) {
        self.description = description.to_string();
        self.fields_set
            .insert(StyleFields::DESCRIPTION);
    }

    /// Upserts the colour slot for `(target, state)`. Present sub-fields of
    /// `spec` overwrite the slot, absent ones leave it untouched.
    pub fn set_colours(
        &mut self,
        target: ColourTarget,
        state: ColourState,
        spec: ColourSpec,
    ) {
        match self
            .colours
            .iter_mut()
            .find(|entry| entry.target == target && entry.state == state)
        {
            Some(entry) => entry.spec.merge_from(&spec),
            None => {
                self.colours
                    .push(ColourEntry { target, state, spec })
            },
        }
        self.fields_set.insert(StyleFields::COLOURS);
    }

    pub fn set_bump_mode(
        &mut self,
        mode: BumpMode,
    ) {
        self.bump_mode = mode;
        self.fields_set.insert(StyleFields::BUMP_MODE);
    }

    pub fn set_bump_width(
        &mut self,
        width: f64,
    ) {
        if width <= 0.0 {
            log::warn!("style '{}': bump width {} skipped", self.original_id, width);
            return;
        }
        self.bump_width = width;
        self.fields_set.insert(StyleFields::BUMP_WIDTH);
    }

    pub fn set_width(
        &mut self,
        width: f64,
    ) {
        if width <= 0.0 {
            log::warn!("style '{}': width {} skipped", self.original_id, width);
            return;
        }
        self.width = width;
        self.fields_set.insert(StyleFields::WIDTH);
    }

    /// Sets the magnification window. Either bound may be absent; a
    /// non-positive bound is silently skipped.
    pub fn set_mag(
        &mut self,
        min: Option<f64>,
        max: Option<f64>,
    ) {
        if let Some(min) = min.filter(|v| *v > 0.0) {
            self.min_mag = min;
            self.fields_set.insert(StyleFields::MIN_MAG);
        }
        if let Some(max) = max.filter(|v| *v > 0.0) {
            self.max_mag = max;
            self.fields_set.insert(StyleFields::MAX_MAG);
        }
    }

    pub fn set_score_range(
        &mut self,
        min: Option<f64>,
        max: Option<f64>,
    ) {
        if let Some(min) = min {
            self.min_score = min;
            self.fields_set.insert(StyleFields::MIN_SCORE);
        }
        if let Some(max) = max {
            self.max_score = max;
            self.fields_set.insert(StyleFields::MAX_SCORE);
        }
    }

    pub fn set_graph_mode(
        &mut self,
        mode: GraphMode,
    ) {
        self.graph_mode = mode;
        self.fields_set.insert(StyleFields::GRAPH_MODE);
    }

    pub fn set_graph_baseline(
        &mut self,
        baseline: f64,
    ) {
        self.graph_baseline = baseline;
        self.fields_set
            .insert(StyleFields::GRAPH_BASELINE);
    }

    flag_setter!(strand_specific, STRAND_SPECIFIC);

    flag_setter!(frame_specific, FRAME_SPECIFIC);

    flag_setter!(show_reverse, SHOW_REVERSE);

    flag_setter!(parse_gaps, PARSE_GAPS);

    flag_setter!(align_gaps, ALIGN_GAPS);

    flag_setter!(join_aligns, JOIN_ALIGNS);

    flag_setter!(directional_ends, DIRECTIONAL_ENDS);

    flag_setter!(hidden, HIDDEN);

    flag_setter!(always_hidden, ALWAYS_HIDDEN);

    flag_setter!(show_when_empty, SHOW_WHEN_EMPTY);

    /// Field-selective override: every field whose bit is set on `incoming`
    /// overwrites the corresponding field here and sets the bit; unset
    /// fields are left untouched. Identity always wins, so after the merge
    /// this style carries the incoming style's ids.
    pub fn merge_from(
        &mut self,
        incoming: &FeatureStyle,
    ) {
        self.unique_id = incoming.unique_id.clone();
        self.original_id = incoming.original_id.clone();

        let set = incoming.fields_set;
        if set.contains(StyleFields::MODE) {
            self.mode = incoming.mode;
        }
        if set.contains(StyleFields::DESCRIPTION) {
            self.description = incoming.description.clone();
        }
        if set.contains(StyleFields::COLOURS) {
            for entry in &incoming.colours {
                self.set_colours(entry.target, entry.state, entry.spec);
            }
        }
        if set.contains(StyleFields::BUMP_MODE) {
            self.bump_mode = incoming.bump_mode;
        }
        if set.contains(StyleFields::BUMP_WIDTH) {
            self.bump_width = incoming.bump_width;
        }
        if set.contains(StyleFields::WIDTH) {
            self.width = incoming.width;
        }
        if set.contains(StyleFields::MIN_MAG) {
            self.min_mag = incoming.min_mag;
        }
        if set.contains(StyleFields::MAX_MAG) {
            self.max_mag = incoming.max_mag;
        }
        if set.contains(StyleFields::MIN_SCORE) {
            self.min_score = incoming.min_score;
        }
        if set.contains(StyleFields::MAX_SCORE) {
            self.max_score = incoming.max_score;
        }
        if set.contains(StyleFields::GRAPH_MODE) {
            self.graph_mode = incoming.graph_mode;
        }
        if set.contains(StyleFields::GRAPH_BASELINE) {
            self.graph_baseline = incoming.graph_baseline;
        }
        if set.contains(StyleFields::STRAND_SPECIFIC) {
            self.strand_specific = incoming.strand_specific;
        }
        if set.contains(StyleFields::FRAME_SPECIFIC) {
            self.frame_specific = incoming.frame_specific;
        }
        if set.contains(StyleFields::SHOW_REVERSE) {
            self.show_reverse = incoming.show_reverse;
        }
        if set.contains(StyleFields::PARSE_GAPS) {
            self.parse_gaps = incoming.parse_gaps;
        }
        if set.contains(StyleFields::ALIGN_GAPS) {
            self.align_gaps = incoming.align_gaps;
        }
        if set.contains(StyleFields::JOIN_ALIGNS) {
            self.join_aligns = incoming.join_aligns;
        }
        if set.contains(StyleFields::DIRECTIONAL_ENDS) {
            self.directional_ends = incoming.directional_ends;
        }
        if set.contains(StyleFields::HIDDEN) {
            self.hidden = incoming.hidden;
        }
        if set.contains(StyleFields::ALWAYS_HIDDEN) {
            self.always_hidden = incoming.always_hidden;
        }
        if set.contains(StyleFields::SHOW_WHEN_EMPTY) {
            self.show_when_empty = incoming.show_when_empty;
        }
        self.fields_set.insert(set);
    }
}
