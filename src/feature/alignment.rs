use indexmap::IndexMap;
use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::typedef::SmallStr;
use crate::data_structs::FeatureLevel;
use crate::error::{
    AnnotreeError,
    Result,
};
use crate::feature::ident::{
    FeatureAny,
    ParentPath,
};
use crate::feature::FeatureBlock;
use crate::getter_fn;
use crate::utils::normalize_name;

/// A named coordinate space within a context, holding the blocks mapped
/// into it. Contexts may hold several alignments (multiple assemblies
/// mapped against one another); exactly one is flagged master.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureAlignment {
    pub(crate) unique_id:   SmallStr,
    pub(crate) original_id: SmallStr,
    pub(crate) parent:      Option<ParentPath>,
    pub(crate) blocks:      IndexMap<SmallStr, FeatureBlock>,
}

impl FeatureAlignment {
    pub fn new(name: &str) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(AnnotreeError::EmptyName);
        }
        Ok(Self {
            unique_id:   normalize_name(name),
            original_id: SmallStr::from(name.trim()),
            parent:      None,
            blocks:      IndexMap::new(),
        })
    }

    /// Inserts a block keyed by its unique id; duplicate keys are a no-op
    /// success returning `false`.
    pub fn add_block(
        &mut self,
        mut block: FeatureBlock,
    ) -> bool {
        if self.blocks.contains_key(&block.unique_id) {
            return false;
        }
        block.reparent(&self.child_base());
        self.blocks
            .insert(block.unique_id.clone(), block);
        true
    }

    pub fn block(
        &self,
        unique_id: &SmallStr,
    ) -> Option<&FeatureBlock> {
        self.blocks.get(unique_id)
    }

    getter_fn!(blocks, IndexMap<SmallStr, FeatureBlock>);

    pub(crate) fn child_base(&self) -> ParentPath {
        self.parent
            .clone()
            .unwrap_or_default()
            .child(&self.unique_id)
    }

    pub(crate) fn reparent(&mut self) {
        self.parent = Some(ParentPath::root());
        let child_base = self.child_base();
        for block in self.blocks.values_mut() {
            block.reparent(&child_base);
        }
    }
}

impl FeatureAny for FeatureAlignment {
    fn level(&self) -> FeatureLevel {
        FeatureLevel::Alignment
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
