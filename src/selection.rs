//! Selection State and its transitions.
//!
//! Every transition is a pure function `reduce(state, event) -> Transition`.
//! Side effects (navigation, cache invalidation) are returned as data and
//! applied by the caller.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::cache::CacheKey;
use crate::legacy::LegacyRouteMapper;
use crate::reconcile::reconcile;
use crate::tree::{same_child, ModuleKind, NavNode, NavigationChild, NavigationItem, NavigationTree};

// ═══════════════════════════════════════════════════════════════════════════════
// STATE
// ═══════════════════════════════════════════════════════════════════════════════

/// The chosen node at each tier.
///
/// When `levelN` is set, `levelN-1` is set and owns it. The pinned-ancestor
/// rule keeps `level2` fixed while Levels 3 and 4 follow the route.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    pub level1: Option<Arc<NavigationItem>>,
    pub level2: Option<Arc<NavigationChild>>,
    pub level3: Option<Arc<NavigationChild>>,
    pub level4: Option<Arc<NavigationChild>>,
    pub parent_of_level2: Option<Arc<NavigationItem>>,
}

impl SelectionState {
    pub fn root_only(root: Arc<NavigationItem>) -> Self {
        Self {
            level1: Some(root),
            ..Self::default()
        }
    }

    /// Build from a root and the chain of nodes below it (Level 2 first).
    pub fn from_chain(root: Arc<NavigationItem>, chain: Vec<Arc<NavigationChild>>) -> Self {
        let mut chain = chain.into_iter();
        let level2 = chain.next();
        Self {
            parent_of_level2: level2.as_ref().map(|_| root.clone()),
            level1: Some(root),
            level2,
            level3: chain.next(),
            level4: chain.next(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.level1.is_none()
    }

    /// Length of the contiguous selected prefix, 0 to 4.
    pub fn depth(&self) -> usize {
        self.nodes().len()
    }

    /// Selected nodes from the root down, stopping at the first gap.
    pub fn nodes(&self) -> Vec<NavNode> {
        let mut nodes = Vec::with_capacity(4);
        let Some(root) = &self.level1 else {
            return nodes;
        };
        nodes.push(NavNode::Level1(root.clone()));
        let Some(l2) = &self.level2 else {
            return nodes;
        };
        nodes.push(NavNode::Level2(l2.clone()));
        let Some(l3) = &self.level3 else {
            return nodes;
        };
        nodes.push(NavNode::Level3(l3.clone()));
        if let Some(l4) = &self.level4 {
            nodes.push(NavNode::Level4(l4.clone()));
        }
        nodes
    }

    /// Identity comparison of every slot.
    pub fn same_as(&self, other: &SelectionState) -> bool {
        fn root_eq(a: &Option<Arc<NavigationItem>>, b: &Option<Arc<NavigationItem>>) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
        }
        fn child_eq(a: &Option<Arc<NavigationChild>>, b: &Option<Arc<NavigationChild>>) -> bool {
            match (a, b) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
        }
        root_eq(&self.level1, &other.level1)
            && child_eq(&self.level2, &other.level2)
            && child_eq(&self.level3, &other.level3)
            && child_eq(&self.level4, &other.level4)
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            level1: self.level1.as_ref().map(|r| r.id.clone()),
            level2: self.level2.as_ref().map(|n| n.label.clone()),
            level3: self.level3.as_ref().map(|n| n.label.clone()),
            level4: self.level4.as_ref().map(|n| n.label.clone()),
        }
    }

    /// Rebuild a selection against `tree`. Stops at the first label that
    /// cannot be found under its parent.
    pub fn restore(snapshot: &SelectionSnapshot, tree: &NavigationTree) -> Self {
        let Some(root) = snapshot.level1.as_deref().and_then(|id| tree.root(id)) else {
            return Self::default();
        };

        let mut chain = Vec::new();
        let mut children = root.children.clone();
        for label in [&snapshot.level2, &snapshot.level3, &snapshot.level4] {
            let Some(label) = label else { break };
            let Some(node) = children.iter().find(|c| &c.label == label).cloned() else {
                tracing::warn!(root = %root.id, label = %label, "snapshot label not found");
                break;
            };
            children = node.children.clone();
            chain.push(node);
        }
        Self::from_chain(root.clone(), chain)
    }
}

/// Serializable form of a selection: root id plus labels below it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSnapshot {
    pub level1: Option<String>,
    pub level2: Option<String>,
    pub level3: Option<String>,
    pub level4: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// EVENTS & EFFECTS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub enum NavEvent {
    /// The router finished navigating to this path.
    RouteChanged(String),
    SelectLevel1(String),
    /// `parent` is a root id; when absent the node's `parentId` or the tree
    /// structure decides.
    SelectLevel2 {
        node: Arc<NavigationChild>,
        parent: Option<String>,
    },
    SelectLevel3(Arc<NavigationChild>),
    SelectLevel4(Arc<NavigationChild>),
    /// Tree replaced or session ended.
    Reset,
}

/// A route for the external router to activate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavCommand {
    pub route: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Navigate(NavCommand),
    Invalidate(CacheKey),
    InvalidateRoot(String),
    ClearCache,
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub state: SelectionState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn unchanged(state: &SelectionState) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
        }
    }
}

pub struct ReduceContext<'a> {
    pub tree: &'a NavigationTree,
    pub mapper: &'a LegacyRouteMapper,
}

// ═══════════════════════════════════════════════════════════════════════════════
// REDUCER
// ═══════════════════════════════════════════════════════════════════════════════

pub fn reduce(state: &SelectionState, event: &NavEvent, ctx: &ReduceContext) -> Transition {
    let transition = match event {
        NavEvent::RouteChanged(path) => {
            let next = reconcile(path, ctx.tree, state, ctx.mapper);
            let effects = invalidations(state, &next);
            Transition {
                state: next,
                effects,
            }
        }
        NavEvent::SelectLevel1(id) => select_level1(state, id, ctx),
        NavEvent::SelectLevel2 { node, parent } => {
            select_level2(state, node, parent.as_deref(), ctx)
        }
        NavEvent::SelectLevel3(node) => select_level3(state, node, ctx),
        NavEvent::SelectLevel4(node) => select_level4(state, node, ctx),
        NavEvent::Reset => Transition {
            state: SelectionState::default(),
            effects: vec![Effect::ClearCache],
        },
    };

    tracing::debug!(
        event = event_name(event),
        depth = transition.state.depth(),
        effects = transition.effects.len(),
        "selection transition"
    );
    transition
}

fn select_level1(state: &SelectionState, id: &str, ctx: &ReduceContext) -> Transition {
    let Some(root) = ctx.tree.root(id) else {
        tracing::warn!(id, "select ignored: unknown navigation root");
        return Transition::unchanged(state);
    };

    let next = SelectionState::root_only(root.clone());
    let mut effects = invalidations(state, &next);

    // Pinned roots wait for an explicit Level-2 choice before navigating.
    if root.kind != ModuleKind::Pinned {
        if let Some(route) = root.target() {
            effects.push(navigate(route, ctx));
        }
    }

    Transition {
        state: next,
        effects,
    }
}

fn select_level2(
    state: &SelectionState,
    node: &Arc<NavigationChild>,
    parent: Option<&str>,
    ctx: &ReduceContext,
) -> Transition {
    // Explicit parent first, then `parentId`/structure, then the current root.
    // A candidate only counts if it really owns the node; the tree's own node
    // is used so identity holds across the session.
    let candidates = [
        parent.and_then(|id| ctx.tree.root(id)),
        ctx.tree.parent_of(node),
        state.level1.as_ref(),
    ];
    let resolved = candidates.into_iter().flatten().find_map(|root| {
        root.children
            .iter()
            .find(|c| same_child(c, node))
            .map(|owned| (root.clone(), owned.clone()))
    });

    let Some((root, node)) = resolved else {
        tracing::warn!(
            label = %node.label,
            parent = parent.unwrap_or("-"),
            "select ignored: level-2 node is not a child of any known root"
        );
        return Transition::unchanged(state);
    };

    let next = SelectionState {
        level1: Some(root.clone()),
        level2: Some(node.clone()),
        level3: None,
        level4: None,
        parent_of_level2: Some(root.clone()),
    };
    let mut effects = invalidations(state, &next);
    if let Some(route) = node.target() {
        effects.push(navigate(route, ctx));
    }

    Transition {
        state: next,
        effects,
    }
}

fn select_level3(
    state: &SelectionState,
    node: &Arc<NavigationChild>,
    ctx: &ReduceContext,
) -> Transition {
    let Some(parent) = state.level2.as_ref() else {
        tracing::warn!(label = %node.label, "select ignored: no level-2 selection");
        return Transition::unchanged(state);
    };
    let Some(node) = parent.children.iter().find(|c| same_child(c, node)).cloned() else {
        tracing::warn!(label = %node.label, parent = %parent.label, "select ignored: not a child of level 2");
        return Transition::unchanged(state);
    };

    let mut next = state.clone();
    next.level3 = Some(node.clone());
    next.level4 = None;

    let effects = node.target().map(|r| navigate(r, ctx)).into_iter().collect();
    Transition {
        state: next,
        effects,
    }
}

fn select_level4(
    state: &SelectionState,
    node: &Arc<NavigationChild>,
    ctx: &ReduceContext,
) -> Transition {
    let Some(parent) = state.level3.as_ref() else {
        tracing::warn!(label = %node.label, "select ignored: no level-3 selection");
        return Transition::unchanged(state);
    };
    let Some(node) = parent.children.iter().find(|c| same_child(c, node)).cloned() else {
        tracing::warn!(label = %node.label, parent = %parent.label, "select ignored: not a child of level 3");
        return Transition::unchanged(state);
    };

    let mut next = state.clone();
    next.level4 = Some(node.clone());

    let effects = node.target().map(|r| navigate(r, ctx)).into_iter().collect();
    Transition {
        state: next,
        effects,
    }
}

fn navigate(route: &str, ctx: &ReduceContext) -> Effect {
    Effect::Navigate(NavCommand {
        route: ctx.mapper.canonicalize(route),
    })
}

/// Cache entries made stale by moving from `prev` to `next`.
fn invalidations(prev: &SelectionState, next: &SelectionState) -> Vec<Effect> {
    let mut effects = Vec::new();
    let Some(old_root) = &prev.level1 else {
        return effects;
    };

    let root_changed = next
        .level1
        .as_ref()
        .map_or(true, |r| !Arc::ptr_eq(r, old_root));
    if root_changed {
        effects.push(Effect::InvalidateRoot(old_root.id.clone()));
        return effects;
    }

    let level2_changed = match (&prev.level2, &next.level2) {
        (Some(a), Some(b)) => !Arc::ptr_eq(a, b),
        (None, None) => false,
        _ => true,
    };
    if level2_changed {
        effects.push(Effect::Invalidate(CacheKey::of(prev)));
    }
    effects
}

fn event_name(event: &NavEvent) -> &'static str {
    match event {
        NavEvent::RouteChanged(_) => "route_changed",
        NavEvent::SelectLevel1(_) => "select_level1",
        NavEvent::SelectLevel2 { .. } => "select_level2",
        NavEvent::SelectLevel3(_) => "select_level3",
        NavEvent::SelectLevel4(_) => "select_level4",
        NavEvent::Reset => "reset",
    }
}
