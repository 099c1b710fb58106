use std::cmp::Ordering;

use indexmap::{
    IndexMap,
    IndexSet,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::typedef::SmallStr;
use crate::data_structs::{
    FeatureLevel,
    Span,
};
use crate::error::{
    AnnotreeError,
    Result,
};
use crate::feature::ident::{
    EntityView,
    FeatureAny,
    ParentPath,
};
use crate::feature::FeatureAlignment;
use crate::utils::normalize_name;

/// Root entity: one sequence's entire loaded annotation set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureContext {
    pub(crate) unique_id:        SmallStr,
    pub(crate) original_id:      SmallStr,
    pub(crate) parent:           Option<ParentPath>,
    pub(crate) display_span:     Option<Span>,
    pub(crate) style_names:      IndexSet<SmallStr>,
    pub(crate) alignments:       IndexMap<SmallStr, FeatureAlignment>,
    pub(crate) master_alignment: Option<SmallStr>,
}

impl FeatureContext {
    pub fn new(sequence_name: &str) -> Result<Self> {
        if sequence_name.trim().is_empty() {
            return Err(AnnotreeError::EmptyName);
        }
        Ok(Self {
            unique_id:        normalize_name(sequence_name),
            original_id:      SmallStr::from(sequence_name.trim()),
            parent:           None,
            display_span:     None,
            style_names:      IndexSet::new(),
            alignments:       IndexMap::new(),
            master_alignment: None,
        })
    }

    pub fn sequence_name(&self) -> &SmallStr {
        &self.original_id
    }

    pub fn display_span(&self) -> Option<Span> {
        self.display_span
    }

    pub fn set_display_span(
        &mut self,
        span: Span,
    ) {
        self.display_span = Some(span);
    }

    /// Records a style name this context knows about (normalised for
    /// de-duplication).
    pub fn add_style_name(
        &mut self,
        name: &str,
    ) {
        self.style_names.insert(normalize_name(name));
    }

    pub fn style_names(&self) -> &IndexSet<SmallStr> {
        &self.style_names
    }

    /// Inserts an alignment keyed by its unique id; duplicate keys are a
    /// no-op success returning `Ok(false)`, though a duplicate flagged
    /// master still promotes the incumbent when no master is set yet.
    ///
    /// At most one alignment may be flagged master; flagging a second,
    /// different alignment is an invalid-argument error.
    pub fn add_alignment(
        &mut self,
        mut alignment: FeatureAlignment,
        master: bool,
    ) -> Result<bool> {
        if self.alignments.contains_key(&alignment.unique_id) {
            if master && self.master_alignment.is_none() {
                self.master_alignment = Some(alignment.unique_id.clone());
            }
            return Ok(false);
        }
        if master {
            if let Some(existing) = &self.master_alignment {
                if existing != &alignment.unique_id {
                    return Err(AnnotreeError::MasterAlreadySet(
                        existing.clone(),
                    ));
                }
            }
        }
        alignment.reparent();
        let id = alignment.unique_id.clone();
        self.alignments.insert(id.clone(), alignment);
        if master {
            self.master_alignment = Some(id);
        }
        Ok(true)
    }

    pub fn alignment(
        &self,
        unique_id: &SmallStr,
    ) -> Option<&FeatureAlignment> {
        self.alignments.get(unique_id)
    }

    pub fn alignments(&self) -> &IndexMap<SmallStr, FeatureAlignment> {
        &self.alignments
    }

    pub fn master_alignment(&self) -> Option<&FeatureAlignment> {
        self.master_alignment
            .as_ref()
            .and_then(|id| self.alignments.get(id))
    }

    /// Total number of features reachable from this context.
    pub fn feature_count(&self) -> usize {
        self.alignments
            .values()
            .flat_map(|a| a.blocks.values())
            .flat_map(|b| b.feature_sets.values())
            .map(|s| s.features.len())
            .sum()
    }

    /// Up-navigation by level: resolves the ancestor of `entity` at
    /// `wanted`, the entity itself when it already sits at that level, or
    /// nothing when `wanted` lies below the entity or the entity is
    /// detached.
    pub fn ancestor_of<'a>(
        &'a self,
        entity: EntityView<'a>,
        wanted: FeatureLevel,
    ) -> Option<EntityView<'a>> {
        match entity.level().cmp(&wanted) {
            Ordering::Equal => Some(entity),
            Ordering::Less => None,
            Ordering::Greater => {
                if wanted == FeatureLevel::Context {
                    return Some(EntityView::Context(self));
                }
                let path = entity.parent()?;
                let ids = path.ids();
                if ids.len() < wanted.depth() {
                    return None;
                }
                let alignment = self.alignments.get(&ids[0])?;
                match wanted {
                    FeatureLevel::Alignment => {
                        Some(EntityView::Alignment(alignment))
                    },
                    FeatureLevel::Block => {
                        alignment
                            .blocks
                            .get(&ids[1])
                            .map(EntityView::Block)
                    },
                    FeatureLevel::FeatureSet => {
                        alignment
                            .blocks
                            .get(&ids[1])?
                            .feature_sets
                            .get(&ids[2])
                            .map(EntityView::FeatureSet)
                    },
                    _ => None,
                }
            },
        }
    }
}

impl FeatureAny for FeatureContext {
    fn level(&self) -> FeatureLevel {
        FeatureLevel::Context
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
