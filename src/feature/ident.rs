//! Content-derived identity: unique-name composition for every entity level
//! and the [`FeatureAny`] view over the tree.
//!
//! A unique id is a pure function of the type-relevant fields of an entity,
//! so two independently parsed records describing the same biological
//! feature collide to the same key. That collision is the deduplication
//! mechanism the merge engine is built on.

use serde::{
    Deserialize,
    Serialize,
};

use crate::data_structs::typedef::{
    PosType,
    SmallStr,
};
use crate::data_structs::{
    FeatureKind,
    FeatureLevel,
    Span,
    Strand,
};
use crate::error::{
    AnnotreeError,
    Result,
};
use crate::feature::{
    Feature,
    FeatureAlignment,
    FeatureBlock,
    FeatureContext,
    FeatureSet,
};
use crate::utils::normalize_name;

/// Non-owning back-reference from an entity to its container: the chain of
/// unique ids below the context root, top-down, ending at the immediate
/// parent. It is set when an entity is attached and rewritten when a subtree
/// is transferred between trees during merge; it never participates in
/// ownership or destruction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParentPath {
    ids: Vec<SmallStr>,
}

impl ParentPath {
    /// Path of an entity attached directly under the context root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Extends the path one level down, into the container with `id`.
    pub fn child(
        &self,
        id: &SmallStr,
    ) -> Self {
        let mut ids = self.ids.clone();
        ids.push(id.clone());
        Self { ids }
    }

    pub fn ids(&self) -> &[SmallStr] {
        &self.ids
    }

    /// Level of the immediate container this path points at.
    pub fn parent_level(&self) -> FeatureLevel {
        match self.ids.len() {
            0 => FeatureLevel::Context,
            1 => FeatureLevel::Alignment,
            2 => FeatureLevel::Block,
            _ => FeatureLevel::FeatureSet,
        }
    }
}

/// Common read access shared by all five entity types.
pub trait FeatureAny {
    fn level(&self) -> FeatureLevel;
    fn unique_id(&self) -> &SmallStr;
    fn original_id(&self) -> &SmallStr;
    fn parent(&self) -> Option<&ParentPath>;
}

/// A type-safe, read-only view of any entity in the tree.
#[derive(Debug, Clone, Copy)]
pub enum EntityView<'a> {
    Context(&'a FeatureContext),
    Alignment(&'a FeatureAlignment),
    Block(&'a FeatureBlock),
    FeatureSet(&'a FeatureSet),
    Feature(&'a Feature),
}

impl<'a> EntityView<'a> {
    fn as_any(&self) -> &'a dyn FeatureAny {
        match self {
            EntityView::Context(e) => *e,
            EntityView::Alignment(e) => *e,
            EntityView::Block(e) => *e,
            EntityView::FeatureSet(e) => *e,
            EntityView::Feature(e) => *e,
        }
    }

    pub fn level(&self) -> FeatureLevel {
        self.as_any().level()
    }

    pub fn unique_id(&self) -> &'a SmallStr {
        self.as_any().unique_id()
    }

    pub fn original_id(&self) -> &'a SmallStr {
        self.as_any().original_id()
    }

    pub fn parent(&self) -> Option<&'a ParentPath> {
        self.as_any().parent()
    }
}

/// Checks the structural identity of an entity before a structural
/// operation: both ids must be non-empty. A violation is a programming
/// error, so debug builds additionally assert.
pub fn validate(entity: &dyn FeatureAny) -> bool {
    let ok = !entity.unique_id().is_empty() && !entity.original_id().is_empty();
    debug_assert!(
        ok,
        "{} entity failed identity validation",
        entity.level()
    );
    ok
}

/// Display name of an entity. Construction guarantees this is never empty.
pub fn name_of(entity: &dyn FeatureAny) -> &str {
    entity.original_id().as_str()
}

/// Composes the unique name of a feature.
///
/// Homology features fold the query sub-range into the identity
/// (`base_start.end_qstart.qend`); every other kind composes
/// `base_start.end`. Reference coordinates must satisfy `start <= end`;
/// query coordinates of a reverse-strand hit may arrive descending and are
/// normalised by swapping.
pub fn make_unique_name(
    kind: FeatureKind,
    base: &str,
    strand: Strand,
    start: PosType,
    end: PosType,
    query: Option<(PosType, PosType)>,
) -> Result<SmallStr> {
    if base.trim().is_empty() {
        return Err(AnnotreeError::EmptyName);
    }
    if start == 0 || end == 0 {
        return Err(AnnotreeError::ZeroCoordinate);
    }
    if start > end {
        return Err(AnnotreeError::InvalidSpan { start, end });
    }

    let base = normalize_name(base);
    let name = match (kind, query) {
        (FeatureKind::Alignment, Some((qstart, qend))) => {
            let (qstart, qend) =
                if strand == Strand::Reverse && qstart > qend {
                    (qend, qstart)
                }
                else {
                    (qstart, qend)
                };
            format!("{}_{}.{}_{}.{}", base, start, end, qstart, qend)
        },
        _ => format!("{}_{}.{}", base, start, end),
    };
    Ok(SmallStr::from(name.as_str()))
}

/// Unique id of a feature set: its normalised source name.
pub fn make_feature_set_id(source: &str) -> Result<SmallStr> {
    if source.trim().is_empty() {
        return Err(AnnotreeError::EmptyName);
    }
    Ok(normalize_name(source))
}

/// Unique id of a block, derived from its coordinate mapping:
/// `refStart.refEnd.refStrand_nonrefStart.nonrefEnd.nonrefStrand`.
pub fn make_block_id(
    ref_span: Span,
    ref_strand: Strand,
    nonref_span: Span,
    nonref_strand: Strand,
) -> SmallStr {
    let name = format!(
        "{}.{}.{}_{}.{}.{}",
        ref_span.start(),
        ref_span.end(),
        char::from(ref_strand),
        nonref_span.start(),
        nonref_span.end(),
        char::from(nonref_strand),
    );
    SmallStr::from(name.as_str())
}
