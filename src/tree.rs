//! Navigation Tree Model
//!
//! The role-filtered sidebar forest. Roots are Level 1, their children are
//! Levels 2 through 4. The tree is immutable once built; every node is shared
//! through `Arc` so selections and caches can hold references without copying.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::error::{NavError, NavResult};

/// A shared, stable list of next-level nodes.
pub type Children = Arc<Vec<Arc<NavigationChild>>>;

// ═══════════════════════════════════════════════════════════════════════════════
// NODE TYPES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModuleKind {
    #[default]
    Standard,
    /// Has no sub-levels; any route under it selects the root alone.
    Home,
    /// Requires an explicit Level-2 choice which route changes may not override.
    Pinned,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationItem {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub kind: ModuleKind,
    #[serde(default)]
    pub children: Children,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationChild {
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub children: Children,
    /// Id of the owning root, for nodes handed over without their ancestry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl NavigationItem {
    /// The route, ignoring empty strings.
    pub fn target(&self) -> Option<&str> {
        self.route.as_deref().filter(|r| !r.is_empty())
    }
}

impl NavigationChild {
    /// The route, ignoring empty strings.
    pub fn target(&self) -> Option<&str> {
        self.route.as_deref().filter(|r| !r.is_empty())
    }
}

/// Identity first, then label + route for nodes that were reconstructed.
pub fn same_child(a: &Arc<NavigationChild>, b: &Arc<NavigationChild>) -> bool {
    Arc::ptr_eq(a, b) || (a.label == b.label && a.route == b.route)
}

pub fn contains_child(children: &Children, node: &Arc<NavigationChild>) -> bool {
    children.iter().any(|c| same_child(c, node))
}

// ═══════════════════════════════════════════════════════════════════════════════
// DEPTH TAGS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
}

impl Level {
    pub fn depth(self) -> u8 {
        self as u8
    }

    /// The next tier down, or `None` at the leaf tier.
    pub fn deeper(self) -> Option<Level> {
        match self {
            Level::One => Some(Level::Two),
            Level::Two => Some(Level::Three),
            Level::Three => Some(Level::Four),
            Level::Four => None,
        }
    }
}

/// A node tagged with the tier it was selected at.
#[derive(Debug, Clone)]
pub enum NavNode {
    Level1(Arc<NavigationItem>),
    Level2(Arc<NavigationChild>),
    Level3(Arc<NavigationChild>),
    Level4(Arc<NavigationChild>),
}

impl NavNode {
    pub fn level(&self) -> Level {
        match self {
            NavNode::Level1(_) => Level::One,
            NavNode::Level2(_) => Level::Two,
            NavNode::Level3(_) => Level::Three,
            NavNode::Level4(_) => Level::Four,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            NavNode::Level1(item) => &item.label,
            NavNode::Level2(c) | NavNode::Level3(c) | NavNode::Level4(c) => &c.label,
        }
    }

    pub fn route(&self) -> Option<&str> {
        match self {
            NavNode::Level1(item) => item.target(),
            NavNode::Level2(c) | NavNode::Level3(c) | NavNode::Level4(c) => c.target(),
        }
    }

    pub fn icon(&self) -> Option<&str> {
        match self {
            NavNode::Level1(item) => item.icon.as_deref(),
            NavNode::Level2(c) | NavNode::Level3(c) | NavNode::Level4(c) => c.icon.as_deref(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TREE
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct NavigationTree {
    roots: Vec<Arc<NavigationItem>>,
    by_id: HashMap<String, usize>,
    fingerprint: String,
}

impl NavigationTree {
    /// Build a tree, applying module kinds from `config` and dropping any node
    /// below Level 4.
    pub fn new(items: Vec<NavigationItem>, config: &EngineConfig) -> NavResult<Self> {
        let mut roots = Vec::with_capacity(items.len());
        let mut by_id = HashMap::new();

        for (index, mut item) in items.into_iter().enumerate() {
            if by_id.insert(item.id.clone(), index).is_some() {
                return Err(NavError::DuplicateRoot(item.id));
            }
            if config.is_home(&item.id) {
                item.kind = ModuleKind::Home;
            } else if config.is_pinned(&item.id) {
                item.kind = ModuleKind::Pinned;
            }
            item.children = prune(&item.children, Level::Two, &item.id);
            for label in duplicate_labels(&item.children) {
                tracing::warn!(
                    root = %item.id,
                    label = %label,
                    "level-2 label repeated under one root; siblings share a children cache entry"
                );
            }
            roots.push(Arc::new(item));
        }

        let fingerprint = compute_fingerprint(&roots);
        Ok(Self {
            roots,
            by_id,
            fingerprint,
        })
    }

    pub fn from_json_str(json: &str, config: &EngineConfig) -> NavResult<Self> {
        let items: Vec<NavigationItem> = serde_json::from_str(json).map_err(NavError::TreeParse)?;
        Self::new(items, config)
    }

    pub fn roots(&self) -> &[Arc<NavigationItem>] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn root(&self, id: &str) -> Option<&Arc<NavigationItem>> {
        self.by_id.get(id).map(|&index| &self.roots[index])
    }

    pub fn home(&self) -> Option<&Arc<NavigationItem>> {
        self.roots.iter().find(|r| r.kind == ModuleKind::Home)
    }

    /// Resolve the root owning a Level-2 node: `parentId` when that root really
    /// contains it, then a scan.
    pub fn parent_of(&self, node: &Arc<NavigationChild>) -> Option<&Arc<NavigationItem>> {
        if let Some(root) = node
            .parent_id
            .as_deref()
            .and_then(|id| self.root(id))
            .filter(|root| contains_child(&root.children, node))
        {
            return Some(root);
        }
        self.roots
            .iter()
            .find(|root| root.children.iter().any(|c| Arc::ptr_eq(c, node)))
            .or_else(|| self.roots.iter().find(|root| contains_child(&root.children, node)))
    }

    /// SHA-256 of the canonical JSON form; equal trees share a fingerprint.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn prune(children: &Children, level: Level, root_id: &str) -> Children {
    let nodes = children
        .iter()
        .map(|child| {
            let mut node = NavigationChild::clone(child);
            node.children = match level.deeper() {
                Some(next) => prune(&child.children, next, root_id),
                None => {
                    if !child.children.is_empty() {
                        tracing::warn!(
                            root = root_id,
                            label = %child.label,
                            dropped = child.children.len(),
                            "navigation nodes below level 4 ignored"
                        );
                    }
                    Children::default()
                }
            };
            Arc::new(node)
        })
        .collect();
    Arc::new(nodes)
}

/// Labels that occur more than once among `children`, in first-seen order.
pub(crate) fn duplicate_labels(children: &Children) -> Vec<String> {
    let mut seen = HashMap::new();
    let mut repeated = Vec::new();
    for child in children.iter() {
        let count = seen.entry(child.label.as_str()).or_insert(0usize);
        *count += 1;
        if *count == 2 {
            repeated.push(child.label.clone());
        }
    }
    repeated
}

fn compute_fingerprint(roots: &[Arc<NavigationItem>]) -> String {
    let mut hasher = Sha256::new();
    match serde_json::to_vec(roots) {
        Ok(bytes) => hasher.update(&bytes),
        Err(e) => tracing::warn!("navigation tree could not be serialized for fingerprinting: {}", e),
    }
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build(value: serde_json::Value) -> NavResult<NavigationTree> {
        NavigationTree::from_json_str(&value.to_string(), &EngineConfig::default())
    }

    #[test]
    fn test_kinds_from_config() {
        let tree = build(json!([
            { "id": "home", "label": "Home", "route": "/home" },
            { "id": "admin", "label": "Admin" },
            { "id": "reports", "label": "Reports", "kind": "pinned" }
        ]))
        .unwrap();
        assert_eq!(tree.root("home").unwrap().kind, ModuleKind::Home);
        assert_eq!(tree.root("admin").unwrap().kind, ModuleKind::Pinned);
        assert_eq!(tree.root("reports").unwrap().kind, ModuleKind::Pinned);
        assert_eq!(tree.home().unwrap().id, "home");
    }

    #[test]
    fn test_duplicate_root_rejected() {
        let err = build(json!([{ "id": "a" }, { "id": "a" }])).unwrap_err();
        assert!(matches!(err, NavError::DuplicateRoot(id) if id == "a"));
    }

    #[test]
    fn test_prunes_below_level_four() {
        let tree = build(json!([{
            "id": "deep",
            "children": [{ "label": "L2", "children": [{ "label": "L3", "children": [
                { "label": "L4", "children": [{ "label": "L5" }] }
            ]}]}]
        }]))
        .unwrap();
        let l4 = &tree.root("deep").unwrap().children[0].children[0].children[0];
        assert_eq!(l4.label, "L4");
        assert!(l4.children.is_empty());
    }

    #[test]
    fn test_parent_lookup() {
        let tree = build(json!([
            { "id": "a", "children": [{ "label": "One" }] },
            { "id": "b", "children": [{ "label": "Two" }] }
        ]))
        .unwrap();
        let two = tree.root("b").unwrap().children[0].clone();
        assert_eq!(tree.parent_of(&two).unwrap().id, "b");

        let detached = Arc::new(NavigationChild {
            label: "Elsewhere".to_string(),
            route: None,
            icon: None,
            children: Children::default(),
            parent_id: Some("a".to_string()),
        });
        assert!(tree.parent_of(&detached).is_none());
    }

    #[test]
    fn test_duplicate_level2_labels_detected() {
        let tree = build(json!([{
            "id": "admin",
            "children": [
                { "label": "Employees", "route": "/admin/employees" },
                { "label": "Settings" },
                { "label": "Employees", "route": "/admin/staff" },
                { "label": "Employees" }
            ]
        }]))
        .unwrap();
        let children = &tree.root("admin").unwrap().children;
        assert_eq!(duplicate_labels(children), vec!["Employees".to_string()]);
        // Still loaded, only reported
        assert_eq!(children.len(), 4);

        let clean = build(json!([{ "id": "a", "children": [{ "label": "X" }, { "label": "Y" }] }])).unwrap();
        assert!(duplicate_labels(&clean.root("a").unwrap().children).is_empty());
    }

    #[test]
    fn test_fingerprint_stable() {
        let value = json!([{ "id": "a", "label": "A", "route": "/a" }]);
        let first = build(value.clone()).unwrap();
        let second = build(value).unwrap();
        let other = build(json!([{ "id": "a", "label": "A", "route": "/b" }])).unwrap();
        assert_eq!(first.fingerprint(), second.fingerprint());
        assert_ne!(first.fingerprint(), other.fingerprint());
    }

    #[test]
    fn test_empty_route_is_no_target() {
        let tree = build(json!([{ "id": "a", "route": "" }])).unwrap();
        assert_eq!(tree.root("a").unwrap().target(), None);
    }

    #[test]
    fn test_level_deeper() {
        assert_eq!(Level::One.deeper(), Some(Level::Two));
        assert_eq!(Level::Four.deeper(), None);
        assert_eq!(Level::Three.depth(), 3);
    }
}
