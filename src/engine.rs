//! Navigation Engine
//!
//! Owns the session's tree, selection, children cache and breadcrumbs, and
//! applies the effects produced by the reducer. Route notifications and clicks
//! both funnel through [`NavigationEngine::dispatch`]; each call completes a
//! whole transition before returning.

use std::sync::Arc;

use crate::breadcrumb::{project, BreadcrumbEntry};
use crate::cache::ChildrenCache;
use crate::config::EngineConfig;
use crate::error::NavResult;
use crate::label::{EchoLookup, StringLookup, TranslationResolver};
use crate::legacy::LegacyRouteMapper;
use crate::reconcile::route_prefixes;
use crate::selection::{reduce, Effect, NavCommand, NavEvent, ReduceContext, SelectionState};
use crate::tree::{Children, NavigationChild, NavigationItem, NavigationTree};

/// Receiver of navigation commands. Fire-and-forget.
pub trait Router {
    fn navigate(&mut self, route: &str);
}

impl<F> Router for F
where
    F: FnMut(&str),
{
    fn navigate(&mut self, route: &str) {
        self(route)
    }
}

pub struct NavigationEngine {
    config: EngineConfig,
    tree: NavigationTree,
    mapper: LegacyRouteMapper,
    state: SelectionState,
    cache: ChildrenCache,
    breadcrumbs: Vec<BreadcrumbEntry>,
    lookup: Box<dyn StringLookup>,
    attached: bool,
}

impl NavigationEngine {
    pub fn new(items: Vec<NavigationItem>, config: EngineConfig) -> NavResult<Self> {
        let tree = NavigationTree::new(items, &config)?;
        Self::with_tree(tree, config)
    }

    pub fn from_json_str(tree_json: &str, config: EngineConfig) -> NavResult<Self> {
        let tree = NavigationTree::from_json_str(tree_json, &config)?;
        Self::with_tree(tree, config)
    }

    pub fn with_tree(tree: NavigationTree, config: EngineConfig) -> NavResult<Self> {
        let mapper = LegacyRouteMapper::new(&config.legacy_routes)?;
        Ok(Self {
            config,
            tree,
            mapper,
            state: SelectionState::default(),
            cache: ChildrenCache::new(),
            breadcrumbs: Vec::new(),
            lookup: Box::new(EchoLookup),
            attached: true,
        })
    }

    /// Install the translation store used for breadcrumb labels.
    pub fn with_lookup(mut self, lookup: impl StringLookup + 'static) -> Self {
        self.lookup = Box::new(lookup);
        self.refresh_breadcrumbs();
        self
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn breadcrumbs(&self) -> &[BreadcrumbEntry] {
        &self.breadcrumbs
    }

    pub fn tree(&self) -> &NavigationTree {
        &self.tree
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn mapper(&self) -> &LegacyRouteMapper {
        &self.mapper
    }

    pub fn cache(&self) -> &ChildrenCache {
        &self.cache
    }

    /// Run one event through the reducer and apply its effects. Returns the
    /// navigation commands for the router.
    pub fn dispatch(&mut self, event: NavEvent) -> Vec<NavCommand> {
        let ctx = ReduceContext {
            tree: &self.tree,
            mapper: &self.mapper,
        };
        let transition = reduce(&self.state, &event, &ctx);

        let mut commands = Vec::new();
        for effect in transition.effects {
            match effect {
                Effect::Navigate(command) => commands.push(command),
                Effect::Invalidate(key) => self.cache.invalidate(&key),
                Effect::InvalidateRoot(id) => self.cache.invalidate_root(&id),
                Effect::ClearCache => self.cache.clear(),
            }
        }

        self.state = transition.state;
        self.refresh_breadcrumbs();
        commands
    }

    /// Same as [`dispatch`](Self::dispatch), forwarding commands to `router`.
    pub fn dispatch_to(&mut self, event: NavEvent, router: &mut dyn Router) {
        for command in self.dispatch(event) {
            router.navigate(&command.route);
        }
    }

    /// Route-change notification. When nothing at all is selected afterwards,
    /// the configured fallback route is issued.
    pub fn on_route_changed(&mut self, path: &str) -> Vec<NavCommand> {
        if !self.attached {
            tracing::debug!(path, "route notification after detach ignored");
            return Vec::new();
        }

        let mut commands = self.dispatch(NavEvent::RouteChanged(path.to_string()));
        if self.state.is_idle() {
            if let Some(fallback) = self.config.fallback_route.as_deref() {
                let fallback = self.mapper.canonicalize(fallback);
                let current = self.mapper.canonicalize(path);
                if !route_prefixes(&fallback, &current) {
                    tracing::info!(path, fallback = %fallback, "no navigation match, falling back");
                    commands.push(NavCommand { route: fallback });
                }
            }
        }
        commands
    }

    pub fn select_level1(&mut self, id: &str) -> Vec<NavCommand> {
        self.dispatch(NavEvent::SelectLevel1(id.to_string()))
    }

    pub fn select_level2(
        &mut self,
        node: &Arc<NavigationChild>,
        parent: Option<&str>,
    ) -> Vec<NavCommand> {
        self.dispatch(NavEvent::SelectLevel2 {
            node: node.clone(),
            parent: parent.map(str::to_string),
        })
    }

    pub fn select_level3(&mut self, node: &Arc<NavigationChild>) -> Vec<NavCommand> {
        self.dispatch(NavEvent::SelectLevel3(node.clone()))
    }

    pub fn select_level4(&mut self, node: &Arc<NavigationChild>) -> Vec<NavCommand> {
        self.dispatch(NavEvent::SelectLevel4(node.clone()))
    }

    /// Next-level children for the sidebar panel. Stable across calls while
    /// the selection keeps the same composite key.
    pub fn children(&mut self) -> Children {
        self.cache.get_children(&self.state)
    }

    /// Swap in a new tree (e.g. after a role change). Selection and cache are
    /// reset only when the tree actually differs. Returns whether it did.
    pub fn replace_tree(&mut self, items: Vec<NavigationItem>) -> NavResult<bool> {
        let tree = NavigationTree::new(items, &self.config)?;
        if tree.fingerprint() == self.tree.fingerprint() {
            tracing::debug!("replacement navigation tree is identical, keeping selection");
            return Ok(false);
        }

        tracing::info!(roots = tree.roots().len(), "navigation tree replaced");
        self.tree = tree;
        self.dispatch(NavEvent::Reset);
        Ok(true)
    }

    /// Stop reacting to route notifications.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    fn refresh_breadcrumbs(&mut self) {
        let resolver = TranslationResolver::new(self.lookup.as_ref(), &self.config.translation_prefix);
        self.breadcrumbs = project(&self.state, &resolver, &self.config.default_icon);
    }
}
