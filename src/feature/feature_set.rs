use std::sync::Arc;

use indexmap::IndexMap;
use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::typedef::SmallStr;
use crate::data_structs::FeatureLevel;
use crate::error::Result;
use crate::feature::ident::{
    make_feature_set_id,
    FeatureAny,
    ParentPath,
};
use crate::feature::Feature;
use crate::getter_fn;
use crate::style::FeatureStyle;

/// A named group of features sharing one source and one style.
///
/// Features are keyed by unique id; insertion order is preserved but carries
/// no meaning. The style is shared by reference with the owning registry,
/// never owned here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    pub(crate) unique_id:   SmallStr,
    pub(crate) original_id: SmallStr,
    pub(crate) parent:      Option<ParentPath>,
    pub(crate) features:    IndexMap<SmallStr, Feature>,
    pub(crate) style:       Option<Arc<FeatureStyle>>,
}

impl FeatureSet {
    pub fn new(source: &str) -> Result<Self> {
        Ok(Self {
            unique_id:   make_feature_set_id(source)?,
            original_id: SmallStr::from(source.trim()),
            parent:      None,
            features:    IndexMap::new(),
            style:       None,
        })
    }

    /// Inserts a feature keyed by its unique id. A duplicate key is a no-op
    /// success: the incumbent feature is kept untouched and `false` is
    /// returned.
    pub fn add_feature(
        &mut self,
        mut feature: Feature,
    ) -> bool {
        if self.features.contains_key(&feature.unique_id) {
            return false;
        }
        feature.parent = Some(self.child_base());
        self.features
            .insert(feature.unique_id.clone(), feature);
        true
    }

    pub fn feature(
        &self,
        unique_id: &SmallStr,
    ) -> Option<&Feature> {
        self.features.get(unique_id)
    }

    getter_fn!(features, IndexMap<SmallStr, Feature>);

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn style(&self) -> Option<&Arc<FeatureStyle>> {
        self.style.as_ref()
    }

    pub fn set_style(
        &mut self,
        style: Arc<FeatureStyle>,
    ) {
        self.style = Some(style);
    }

    /// Path that children of this set carry as their parent reference.
    pub(crate) fn child_base(&self) -> ParentPath {
        self.parent
            .clone()
            .unwrap_or_default()
            .child(&self.unique_id)
    }

    /// Re-anchors this set (and recursively its features) below `base`.
    /// Called on attach and when a subtree changes trees during merge.
    pub(crate) fn reparent(
        &mut self,
        base: &ParentPath,
    ) {
        self.parent = Some(base.clone());
        let child_base = self.child_base();
        for feature in self.features.values_mut() {
            feature.parent = Some(child_base.clone());
        }
    }
}

impl FeatureAny for FeatureSet {
    fn level(&self) -> FeatureLevel {
        FeatureLevel::FeatureSet
    }

    fn unique_id(&self) -> &SmallStr {
        &self.unique_id
    }

    fn original_id(&self) -> &SmallStr {
        &self.original_id
    }

    fn parent(&self) -> Option<&ParentPath> {
        self.parent.as_ref()
    }
}
