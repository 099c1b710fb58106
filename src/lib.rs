//! # annotree
//!
//! `annotree` is the in-memory feature store of a genome annotation viewer:
//! a five-level entity tree (Context → Alignment → Block → FeatureSet →
//! Feature) with content-derived identity, an incremental merge engine, and
//! a style system with inheritance resolution.
//!
//! Data arrives from streaming parsers as independently built subtrees.
//! Because every entity's key is a pure function of its content, folding a
//! fresh parse into the already-loaded tree is a keyed set union: new
//! subtrees transfer across, duplicates collapse to no-ops, and the caller
//! gets back a diff naming exactly what appeared, which is what an
//! incremental redraw needs.
//!
//! ## Key Features
//!
//! * **Content-derived identity**: unique ids are deterministic functions
//!   of the type-relevant fields ([`make_unique_name`], [`make_block_id`],
//!   [`make_feature_set_id`]), so two parses of the same record collide to
//!   the same key.
//! * **Incremental merge**: [`merge_context`] reconciles a freshly parsed
//!   [`FeatureContext`] into the current one level by level and reports an
//!   id-skeleton [`ContextDiff`] of everything newly added.
//! * **Two-phase construction**: entities are created minimally and
//!   populated incrementally (exons appended one at a time, homology
//!   blocks accumulated with a derived perfect-alignment flag), matching
//!   streaming ingestion.
//! * **Styles with inheritance**: [`FeatureStyle`] carries an
//!   explicit-assignment bitset that makes override merge well-defined;
//!   [`StyleRegistry::resolve`] flattens parent chains with per-style
//!   warning containment.
//!
//! ## Structure
//!
//! * [`data_structs`]: shared primitives — coordinate [`Span`], strand and
//!   level/kind enumerations, identifier type aliases.
//! * [`feature`]: the entity tree, identity construction and the merge
//!   engine.
//! * [`style`]: the style entity, registry and cascade resolver.
//!
//! ## Usage
//!
//! ### Building and merging contexts
//!
//! ```
//! use annotree::prelude::*;
//!
//! fn main() -> Result<(), AnnotreeError> {
//!     let mut set = FeatureSet::new("genes")?;
//!     set.add_feature(Feature::new(
//!         "geneX",
//!         FeatureKind::Basic,
//!         Span::new(100, 200)?,
//!         Strand::Forward,
//!     )?);
//!
//!     let mut block = FeatureBlock::new(
//!         Span::new(1, 10000)?,
//!         Strand::Forward,
//!         Span::new(1, 10000)?,
//!         Strand::Forward,
//!     );
//!     block.add_feature_set(set);
//!
//!     let mut alignment = FeatureAlignment::new("chr4")?;
//!     alignment.add_block(block);
//!
//!     let mut context = FeatureContext::new("chr4")?;
//!     context.add_alignment(alignment, true)?;
//!
//!     let mut current = None;
//!     let outcome = merge_context(&mut current, context);
//!     let diff = outcome.diff().unwrap();
//!     assert_eq!(diff.feature_count(), 1);
//!
//!     // Resolve the diff's ids against the merged tree for redraw.
//!     let merged = current.as_ref().unwrap();
//!     for feature in diff.new_features(merged) {
//!         println!("new feature {}", feature.original_id());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Styles and inheritance
//!
//! ```
//! use annotree::prelude::*;
//!
//! fn main() -> Result<(), AnnotreeError> {
//!     let mut registry = StyleRegistry::with_predefined();
//!
//!     let mut base = FeatureStyle::new("alignment-base", "shared defaults")?;
//!     base.set_mode(StyleMode::Alignment);
//!     base.set_width(30.0);
//!     registry.add(base);
//!
//!     let mut blast = FeatureStyle::new("wublast", "blast hits")?;
//!     blast.set_parent("alignment-base");
//!     blast.set_bump_mode(BumpMode::Overlap);
//!     registry.add(blast);
//!
//!     let resolution = registry.resolve();
//!     assert!(resolution.success());
//!
//!     let resolved = registry.find("WuBlast").unwrap();
//!     assert_eq!(resolved.width(), 30.0);
//!     assert_eq!(resolved.bump_mode(), BumpMode::Overlap);
//!     Ok(())
//! }
//! ```

pub mod data_structs;
pub mod error;
pub mod feature;
pub mod prelude;
pub mod style;
pub mod utils;

#[allow(unused_imports)]
use prelude::*;
