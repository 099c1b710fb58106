//! Inheritance flattening for a style registry.
//!
//! Every style may declare a parent-style name. Resolution rewrites each
//! style into its fully-inherited form: the ancestor chain is walked
//! root-first, override-merging one level at a time, and every intermediate
//! result is published back into the registry under its own key so later
//! walks reuse it instead of redoing the merge. Total work stays linear in
//! registry size.
//!
//! A missing parent or a cycle is a warning against the originating style
//! only; that chain keeps its as-authored field state and every other style
//! still resolves. Rendering must degrade per style, never fail wholesale.

use hashbrown::HashMap;

use crate::data_structs::typedef::SmallStr;
use crate::error::StyleWarning;
use crate::style::StyleRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ResolveState {
    #[default]
    Unvisited,
    /// Part of an already-warned broken chain; kept as-authored. Distinct
    /// from `Resolved` so that a later walk terminating here re-detects the
    /// breakage and flags its own originating style instead of merging over
    /// an unflattened ancestor.
    Broken,
    Resolved,
}

/// Outcome of a whole-registry resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Resolution {
    warnings: Vec<StyleWarning>,
}

impl Resolution {
    /// True iff no style reported a problem.
    pub fn success(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn warnings(&self) -> &[StyleWarning] {
        &self.warnings
    }
}

enum ChainWalk {
    /// Ancestor ids, leaf first. The last entry either has no parent or is
    /// already resolved.
    Complete(Vec<SmallStr>),
    Broken {
        warning: StyleWarning,
        visited: Vec<SmallStr>,
    },
}

/// Flattens all declared inheritance in `registry`. Best-effort: the
/// registry is always left in its most-resolved form, the returned
/// [`Resolution`] lists whatever went wrong.
pub fn resolve_styles(registry: &mut StyleRegistry) -> Resolution {
    let mut states: HashMap<SmallStr, ResolveState> = registry
        .ids()
        .into_iter()
        .map(|id| (id, ResolveState::Unvisited))
        .collect();
    let mut resolution = Resolution::default();

    for id in registry.ids() {
        if states.get(&id) != Some(&ResolveState::Unvisited) {
            continue;
        }
        match walk_chain(registry, &states, &id) {
            ChainWalk::Broken { warning, visited } => {
                log::warn!("style resolution: {}", warning);
                resolution.warnings.push(warning);
                // The whole broken chain keeps its as-authored state. It is
                // warned once here; styles inheriting into it later get
                // their own warning from their own walk.
                for member in visited {
                    states.insert(member, ResolveState::Broken);
                }
            },
            ChainWalk::Complete(chain) => {
                flatten_chain(registry, &mut states, &chain);
            },
        }
    }

    resolution
}

fn walk_chain(
    registry: &StyleRegistry,
    states: &HashMap<SmallStr, ResolveState>,
    start: &SmallStr,
) -> ChainWalk {
    let mut chain = vec![start.clone()];
    let mut current = start.clone();

    loop {
        // The id came from the registry, so the lookup cannot miss.
        let Some(style) = registry.get_by_id(&current)
        else {
            break;
        };
        let Some(parent) = style.parent_id()
        else {
            break;
        };
        if chain.contains(parent) {
            return ChainWalk::Broken {
                warning: StyleWarning::InheritanceCycle {
                    style: start.clone(),
                },
                visited: chain,
            };
        }
        if registry.get_by_id(parent).is_none() {
            return ChainWalk::Broken {
                warning: StyleWarning::MissingParent {
                    style:  start.clone(),
                    parent: parent.clone(),
                },
                visited: chain,
            };
        }
        chain.push(parent.clone());
        // An already-resolved ancestor is fully flattened; use it as the
        // chain root instead of walking further.
        if states.get(parent) == Some(&ResolveState::Resolved) {
            break;
        }
        current = parent.clone();
    }

    ChainWalk::Complete(chain)
}

/// Walks `chain` root-first, merging each child over a running accumulated
/// copy and publishing every intermediate result under the child's key.
fn flatten_chain(
    registry: &mut StyleRegistry,
    states: &mut HashMap<SmallStr, ResolveState>,
    chain: &[SmallStr],
) {
    let Some(root) = chain.last()
    else {
        return;
    };
    states.insert(root.clone(), ResolveState::Resolved);

    let Some(mut accumulated) = registry
        .get_by_id(root)
        .map(|style| style.as_ref().clone())
    else {
        return;
    };

    for child_id in chain.iter().rev().skip(1) {
        let Some(child) = registry
            .get_by_id(child_id)
            .map(|style| style.as_ref().clone())
        else {
            continue;
        };
        accumulated.merge_from(&child);
        // A resolved style no longer needs its parent link.
        accumulated.parent_id = None;
        registry.insert_resolved(child_id.clone(), accumulated.clone());
        states.insert(child_id.clone(), ResolveState::Resolved);
    }
}
