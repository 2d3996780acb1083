use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::selection::SelectionState;
use crate::tree::{Children, ModuleKind};

const NONE: &str = "none";

/// Composite identity of a children list: root id plus Level-2 label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub root_id: String,
    pub level2: String,
}

impl CacheKey {
    pub fn of(state: &SelectionState) -> Self {
        Self {
            root_id: state
                .level1
                .as_ref()
                .map_or_else(|| NONE.to_string(), |r| r.id.clone()),
            level2: state
                .level2
                .as_ref()
                .map_or_else(|| NONE.to_string(), |n| n.label.clone()),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.root_id, self.level2)
    }
}

/// Memoizes the next-level children list so repeated queries for the same
/// selection hand back the same `Arc`.
#[derive(Debug, Default)]
pub struct ChildrenCache {
    entries: HashMap<CacheKey, Children>,
    empty: Children,
}

impl ChildrenCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_children(&mut self, state: &SelectionState) -> Children {
        let key = CacheKey::of(state);
        if let Some(children) = self.entries.get(&key) {
            tracing::trace!(%key, "children cache hit");
            return children.clone();
        }

        let children = self.compute(state);
        tracing::debug!(%key, count = children.len(), "children cache fill");
        self.entries.insert(key, children.clone());
        children
    }

    fn compute(&self, state: &SelectionState) -> Children {
        let Some(root) = &state.level1 else {
            return self.empty.clone();
        };
        match root.kind {
            ModuleKind::Pinned => match &state.level2 {
                Some(level2) => level2.children.clone(),
                None => root.children.clone(),
            },
            ModuleKind::Home => root.children.clone(),
            ModuleKind::Standard => self.empty.clone(),
        }
    }

    pub fn invalidate(&mut self, key: &CacheKey) {
        if self.entries.remove(key).is_some() {
            tracing::debug!(%key, "children cache entry invalidated");
        }
    }

    pub fn invalidate_root(&mut self, root_id: &str) {
        self.entries.retain(|key, _| key.root_id != root_id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }
}

/// True when both lists are the same allocation.
pub fn same_list(a: &Children, b: &Children) -> bool {
    Arc::ptr_eq(a, b)
}
