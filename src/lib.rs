//! # Sidebar Navigation Engine
//!
//! Keeps the admin console's sidebar in step with the browser route.
//!
//! ## Invariants
//!
//! 1. **Tree**: The navigation forest is immutable for a session and at most
//!    four levels deep. Replacing it (role change) resets the selection.
//!
//! 2. **Selection**: If Level N is selected (N > 1), Level N-1 is selected and
//!    owns it. The one override is the pinned ancestor: once a pinned module
//!    has a Level-2 choice, route changes only move Levels 3/4 under it. Home,
//!    a Level-1/Level-2 click or a tree reset releases it.
//!
//! 3. **Transitions**: Each route notification or click is a single synchronous
//!    `reduce(state, event) -> (state', effects)`. Nothing here blocks or fails.
//!
//! 4. **Children**: The children list for a given `(root id, level-2 label)`
//!    is handed out as the same `Arc` until that key is invalidated.
//!
//! 5. **Breadcrumbs**: One entry per selected level, root first. Labels resolve
//!    `navigation.{id}.level{N}.{key}` → `navigation.{id}.{key}` →
//!    `navigation.{key}` → raw label.
//!
//! 6. **Legacy routes**: Deprecated paths are mapped by exact match before
//!    reconciliation and before issuing navigation commands. Mapping is
//!    idempotent.
//!
//! ## Node bindings
//!
//! The `*_native` functions (`normalize_label_native`, `canonical_route_native`,
//! `reconcile_route_native`) exist only with `--features napi`. The default
//! build is the plain Rust API.

mod breadcrumb;
mod cache;
mod config;
mod engine;
mod error;
mod label;
mod legacy;
mod reconcile;
mod selection;
mod tree;

#[cfg(feature = "napi")]
mod bridge;

#[cfg(test)]
mod test_fixtures;

#[cfg(test)]
mod label_tests;

pub use breadcrumb::{project, BreadcrumbEntry};
pub use cache::{same_list, CacheKey, ChildrenCache};
pub use config::EngineConfig;
pub use engine::{NavigationEngine, Router};
pub use error::{NavError, NavResult};
pub use label::{normalize, EchoLookup, JsonCatalog, StringLookup, TranslationResolver};
pub use legacy::{LegacyRouteMapper, LEGACY_ROUTES};
pub use reconcile::{reconcile, route_prefixes};
pub use selection::{
    reduce, Effect, NavCommand, NavEvent, ReduceContext, SelectionSnapshot, SelectionState,
    Transition,
};
pub use tree::{
    Children, Level, ModuleKind, NavNode, NavigationChild, NavigationItem, NavigationTree,
};

#[cfg(feature = "napi")]
pub use bridge::{canonical_route_native, normalize_label_native, reconcile_route_native};
