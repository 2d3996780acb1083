//! Node bindings for the hosting console.
//!
//! Every function takes and returns JSON strings so the JavaScript side can
//! keep its own object shapes.

use napi::bindgen_prelude::*;
use napi_derive::napi;
use serde::{Deserialize, Serialize};

use crate::breadcrumb::{project, BreadcrumbEntry};
use crate::config::EngineConfig;
use crate::error::NavError;
use crate::label::{normalize, JsonCatalog, TranslationResolver};
use crate::legacy::LegacyRouteMapper;
use crate::reconcile::reconcile;
use crate::selection::{SelectionSnapshot, SelectionState};
use crate::tree::NavigationTree;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileOutput {
    pub selection: SelectionSnapshot,
    pub breadcrumbs: Vec<BreadcrumbEntry>,
}

fn to_napi(err: NavError) -> Error {
    Error::new(Status::InvalidArg, err.to_string())
}

fn parse_config(config_json: Option<String>) -> Result<EngineConfig> {
    match config_json {
        Some(json) if !json.trim().is_empty() => EngineConfig::from_json_str(&json).map_err(to_napi),
        _ => Ok(EngineConfig::default()),
    }
}

#[napi]
pub fn normalize_label_native(label: String) -> String {
    normalize(&label)
}

#[napi]
pub fn canonical_route_native(path: String, config_json: Option<String>) -> Result<String> {
    let config = parse_config(config_json)?;
    let mapper = LegacyRouteMapper::new(&config.legacy_routes).map_err(to_napi)?;
    Ok(mapper.canonicalize(&path))
}

/// Reconcile `path` against a tree, starting from a previous selection
/// snapshot, and return the new snapshot with its breadcrumbs.
#[napi]
pub fn reconcile_route_native(
    tree_json: String,
    path: String,
    selection_json: Option<String>,
    translations_json: Option<String>,
    config_json: Option<String>,
) -> Result<String> {
    let config = parse_config(config_json)?;
    let tree = NavigationTree::from_json_str(&tree_json, &config).map_err(to_napi)?;
    let mapper = LegacyRouteMapper::new(&config.legacy_routes).map_err(to_napi)?;

    let current = match selection_json {
        Some(json) if !json.trim().is_empty() => {
            let snapshot: SelectionSnapshot = serde_json::from_str(&json)
                .map_err(|e| to_napi(NavError::Snapshot(e.to_string())))?;
            SelectionState::restore(&snapshot, &tree)
        }
        _ => SelectionState::default(),
    };

    let catalog = match translations_json {
        Some(json) => JsonCatalog::from_json_str(&json)
            .map_err(|e| Error::new(Status::InvalidArg, e.to_string()))?,
        None => JsonCatalog::default(),
    };

    let next = reconcile(&path, &tree, &current, &mapper);
    let resolver = TranslationResolver::new(&catalog, &config.translation_prefix);
    let output = ReconcileOutput {
        selection: next.snapshot(),
        breadcrumbs: project(&next, &resolver, &config.default_icon),
    };

    serde_json::to_string(&output).map_err(|e| Error::new(Status::GenericFailure, e.to_string()))
}
