use std::sync::Arc;

use indexmap::IndexMap;
use itertools::Itertools;
use once_cell::sync::Lazy;
use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::typedef::SmallStr;
use crate::data_structs::StyleMode;
use crate::style::cascade::{
    resolve_styles,
    Resolution,
};
use crate::style::FeatureStyle;
use crate::utils::normalize_name;

/// Predefined styles that exist regardless of configuration: hard-coded
/// names, descriptions and modes, constructed once and handed out as fresh
/// copies so callers never share mutable state through them.
static PREDEFINED: Lazy<IndexMap<SmallStr, FeatureStyle>> = Lazy::new(|| {
    let specs: [(&str, &str, StyleMode); 5] = [
        (
            "3frame",
            "Three-frame translation display",
            StyleMode::PeptideSequence,
        ),
        ("dna", "DNA sequence display", StyleMode::RawSequence),
        ("locus", "Locus name column", StyleMode::Text),
        (
            "genefinder",
            "Gene-finder feature display",
            StyleMode::Basic,
        ),
        ("scale", "Scale bar", StyleMode::Meta),
    ];
    specs
        .into_iter()
        .map(|(name, description, mode)| {
            // Unwraps cannot fire, the names are non-empty literals.
            let mut style = FeatureStyle::new(name, description).unwrap();
            style.set_mode(mode);
            (style.unique_id.clone(), style)
        })
        .collect()
});

/// Returns a fresh copy of the named predefined style, if one exists.
pub fn predefined(name: &str) -> Option<FeatureStyle> {
    PREDEFINED.get(&normalize_name(name)).cloned()
}

/// The registry of named styles, keyed by normalised name.
///
/// Styles are held behind [`Arc`] so that feature sets share resolved
/// styles by reference; registry-side mutation goes through
/// [`Arc::make_mut`], which copies only when a style is actually shared.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StyleRegistry {
    styles: IndexMap<SmallStr, Arc<FeatureStyle>>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-loaded with the predefined styles.
    pub fn with_predefined() -> Self {
        let mut registry = Self::new();
        for style in PREDEFINED.values() {
            registry.add(style.clone());
        }
        registry
    }

    /// Inserts a style under its unique id; a duplicate key is a no-op
    /// success returning `false`.
    pub fn add(
        &mut self,
        style: FeatureStyle,
    ) -> bool {
        if self.styles.contains_key(&style.unique_id) {
            return false;
        }
        self.styles
            .insert(style.unique_id.clone(), Arc::new(style));
        true
    }

    /// Looks a style up by name, normalising first. Absence is not an
    /// error.
    pub fn find(
        &self,
        name: &str,
    ) -> Option<&Arc<FeatureStyle>> {
        self.styles.get(&normalize_name(name))
    }

    /// Hands out a shared reference to the named style, for attaching to a
    /// feature set.
    pub fn share(
        &self,
        name: &str,
    ) -> Option<Arc<FeatureStyle>> {
        self.find(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// All style names, sorted.
    pub fn names(&self) -> Vec<SmallStr> {
        self.styles.keys().cloned().sorted().collect()
    }

    /// Folds an imported style set into this registry: an existing key is
    /// override-merged via [`FeatureStyle::merge_from`], a new key is
    /// inserted as-is.
    pub fn merge_from(
        &mut self,
        incoming: StyleRegistry,
    ) {
        for (id, style) in incoming.styles {
            match self.styles.get_mut(&id) {
                Some(current) => {
                    Arc::make_mut(current).merge_from(&style);
                },
                None => {
                    self.styles.insert(id, style);
                },
            }
        }
    }

    /// Flattens all declared parent-style inheritance in place. Always
    /// best-effort, see [`resolve_styles`].
    pub fn resolve(&mut self) -> Resolution {
        resolve_styles(self)
    }

    pub(crate) fn get_by_id(
        &self,
        id: &SmallStr,
    ) -> Option<&Arc<FeatureStyle>> {
        self.styles.get(id)
    }

    pub(crate) fn insert_resolved(
        &mut self,
        id: SmallStr,
        style: FeatureStyle,
    ) {
        self.styles.insert(id, Arc::new(style));
    }

    pub(crate) fn ids(&self) -> Vec<SmallStr> {
        self.styles.keys().cloned().collect()
    }
}
