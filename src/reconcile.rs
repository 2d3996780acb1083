//! Route Reconciler
//!
//! Maps the browser's current route onto the navigation tree.
//!
//! ## Policy, in order
//!
//! 1. The path is canonicalized through the legacy route table.
//! 2. A path at or under the home root's route selects the home root alone.
//! 3. A pinned root with a chosen Level-2 node keeps both; only Levels 3 and 4
//!    are re-derived from the Level-2 subtree; without a match there they are
//!    cleared and Levels 1 and 2 stay as chosen.
//! 4. Otherwise roots are tried in tree order. The first root with any match
//!    wins; within it the deepest match wins, ties going to the earlier sibling.
//! 5. No match leaves the selection untouched.

use std::sync::Arc;

use crate::legacy::{split_suffix, LegacyRouteMapper};
use crate::selection::SelectionState;
use crate::tree::{Children, Level, ModuleKind, NavigationChild, NavigationItem, NavigationTree};

pub fn reconcile(
    path: &str,
    tree: &NavigationTree,
    current: &SelectionState,
    mapper: &LegacyRouteMapper,
) -> SelectionState {
    let canonical = mapper.canonicalize(path);
    let path = split_suffix(&canonical).0;

    if let Some(home) = tree.home() {
        if root_route_matches(home, path, mapper) {
            tracing::debug!(path, root = %home.id, "route selects home root");
            return SelectionState::root_only(home.clone());
        }
    }

    if let Some(next) = reconcile_pinned(path, current, mapper) {
        return next;
    }

    for root in tree.roots() {
        if let Some(next) = match_root(root, path, mapper) {
            tracing::debug!(path, root = %root.id, depth = next.depth(), "route reconciled");
            return next;
        }
    }

    tracing::debug!(path, "route matches no navigation node");
    current.clone()
}

fn reconcile_pinned(
    path: &str,
    current: &SelectionState,
    mapper: &LegacyRouteMapper,
) -> Option<SelectionState> {
    let root = current.level1.as_ref()?;
    let level2 = current.level2.as_ref()?;
    if root.kind != ModuleKind::Pinned {
        return None;
    }
    let mut next = SelectionState {
        level1: Some(root.clone()),
        level2: Some(level2.clone()),
        level3: None,
        level4: None,
        parent_of_level2: current.parent_of_level2.clone().or_else(|| Some(root.clone())),
    };
    if let Some(mut chain) = deepest_match(&level2.children, Level::Three, path, mapper) {
        next.level4 = if chain.len() > 1 { chain.pop() } else { None };
        next.level3 = chain.pop();
    }
    tracing::debug!(path, root = %root.id, level2 = %level2.label, depth = next.depth(), "pinned route reconciled");
    Some(next)
}

fn match_root(
    root: &Arc<NavigationItem>,
    path: &str,
    mapper: &LegacyRouteMapper,
) -> Option<SelectionState> {
    if root.kind != ModuleKind::Home {
        if let Some(chain) = deepest_match(&root.children, Level::Two, path, mapper) {
            return Some(SelectionState::from_chain(root.clone(), chain));
        }
    }
    if root_route_matches(root, path, mapper) {
        return Some(SelectionState::root_only(root.clone()));
    }
    None
}

/// Depth-first search for the deepest node under `children` whose route
/// prefixes `path`. Returns the chain from `level` down to the match.
pub(crate) fn deepest_match(
    children: &Children,
    level: Level,
    path: &str,
    mapper: &LegacyRouteMapper,
) -> Option<Vec<Arc<NavigationChild>>> {
    let mut best: Option<Vec<Arc<NavigationChild>>> = None;

    for child in children.iter() {
        let below = level
            .deeper()
            .and_then(|next| deepest_match(&child.children, next, path, mapper));

        let candidate = match below {
            Some(mut chain) => {
                chain.insert(0, child.clone());
                Some(chain)
            }
            None if node_route_matches(child.target(), path, mapper) => Some(vec![child.clone()]),
            None => None,
        };

        if let Some(chain) = candidate {
            if best.as_ref().map_or(true, |b| chain.len() > b.len()) {
                best = Some(chain);
            }
        }
    }

    best
}

fn root_route_matches(root: &NavigationItem, path: &str, mapper: &LegacyRouteMapper) -> bool {
    node_route_matches(root.target(), path, mapper)
}

fn node_route_matches(route: Option<&str>, path: &str, mapper: &LegacyRouteMapper) -> bool {
    match route {
        Some(route) => route_prefixes(&mapper.canonicalize(route), path),
        None => false,
    }
}

/// Segment-aware prefix test: `/admin` covers `/admin` and `/admin/x`, but
/// not `/administrator`. The root route `/` only covers `/` itself.
pub fn route_prefixes(route: &str, path: &str) -> bool {
    let route = trim_route(split_suffix(route).0);
    let path = trim_route(split_suffix(path).0);

    if route.is_empty() {
        return path.is_empty();
    }
    match path.strip_prefix(route) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn trim_route(route: &str) -> &str {
    route.trim_end_matches('/')
}
