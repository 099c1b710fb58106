use indexmap::IndexMap;
use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::typedef::SmallStr;
use crate::data_structs::{
    FeatureLevel,
    Span,
    Strand,
};
use crate::feature::ident::{
    make_block_id,
    FeatureAny,
    ParentPath,
};
use crate::feature::FeatureSet;

/// A coordinate-mapped sub-region of an alignment, optionally carrying the
/// raw DNA of the mapped range.
///
/// The identity of a block is its full coordinate mapping, so the same
/// reference range mapped differently forms a distinct block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureBlock {
    pub(crate) unique_id:     SmallStr,
    pub(crate) original_id:   SmallStr,
    pub(crate) parent:        Option<ParentPath>,
    pub(crate) ref_span:      Span,
    pub(crate) ref_strand:    Strand,
    pub(crate) nonref_span:   Span,
    pub(crate) nonref_strand: Strand,
    pub(crate) dna:           Option<Vec<u8>>,
    pub(crate) feature_sets:  IndexMap<SmallStr, FeatureSet>,
}

impl FeatureBlock {
    pub fn new(
        ref_span: Span,
        ref_strand: Strand,
        nonref_span: Span,
        nonref_strand: Strand,
    ) -> Self {
        let unique_id =
            make_block_id(ref_span, ref_strand, nonref_span, nonref_strand);
        Self {
            original_id: unique_id.clone(),
            unique_id,
            parent: None,
            ref_span,
            ref_strand,
            nonref_span,
            nonref_strand,
            dna: None,
            feature_sets: IndexMap::new(),
        }
    }

    pub fn ref_span(&self) -> Span {
        self.ref_span
    }

    pub fn ref_strand(&self) -> Strand {
        self.ref_strand
    }

    pub fn nonref_span(&self) -> Span {
        self.nonref_span
    }

    pub fn nonref_strand(&self) -> Strand {
        self.nonref_strand
    }

    pub fn dna(&self) -> Option<&[u8]> {
        self.dna.as_deref()
    }

    pub fn set_dna(
        &mut self,
        dna: Vec<u8>,
    ) {
        self.dna = Some(dna);
    }

    /// Inserts a feature set keyed by its unique id; duplicate keys are a
    /// no-op success returning `false`.
    pub fn add_feature_set(
        &mut self,
        mut set: FeatureSet,
    ) -> bool {
        if self.feature_sets.contains_key(&set.unique_id) {
            return false;
        }
        set.reparent(&self.child_base());
        self.feature_sets
            .insert(set.unique_id.clone(), set);
        true
    }

    pub fn feature_set(
        &self,
        unique_id: &SmallStr,
    ) -> Option<&FeatureSet> {
        self.feature_sets.get(unique_id)
    }

    pub fn feature_sets(&self) -> &IndexMap<SmallStr, FeatureSet> {
        &self.feature_sets
    }

    pub(crate) fn child_base(&self) -> ParentPath {
        self.parent
            .clone()
            .unwrap_or_default()
            .child(&self.unique_id)
    }

    pub(crate) fn reparent(
        &mut self,
        base: &ParentPath,
    ) {
        self.parent = Some(base.clone());
        let child_base = self.child_base();
        for set in self.feature_sets.values_mut() {
            set.reparent(&child_base);
        }
    }
}

impl FeatureAny for FeatureBlock {
    fn level(&self) -> FeatureLevel {
        FeatureLevel::Block
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
