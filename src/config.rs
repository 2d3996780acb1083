use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{NavError, NavResult};

/// Engine options. Every field has a default so a partial JSON document is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Root that owns no sub-levels and short-circuits reconciliation.
    pub home_root_id: Option<String>,
    /// Roots whose Level-2 selection is explicit and pinned once chosen.
    pub pinned_root_ids: Vec<String>,
    /// Extra `old -> new` route entries merged over the built-in table.
    pub legacy_routes: BTreeMap<String, String>,
    /// Route to issue when a route change leaves nothing selected.
    pub fallback_route: Option<String>,
    pub default_icon: String,
    pub translation_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            home_root_id: Some("home".to_string()),
            pinned_root_ids: vec!["admin".to_string()],
            legacy_routes: BTreeMap::new(),
            fallback_route: None,
            default_icon: "chevron_right".to_string(),
            translation_prefix: "navigation".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> NavResult<Self> {
        serde_json::from_str(json).map_err(NavError::ConfigParse)
    }

    pub fn from_path(path: &Path) -> NavResult<Self> {
        let data = fs::read_to_string(path).map_err(|source| NavError::Io {
            path: path.to_string_lossy().to_string(),
            source,
        })?;
        Self::from_json_str(&data)
    }

    pub fn is_pinned(&self, root_id: &str) -> bool {
        self.pinned_root_ids.iter().any(|id| id == root_id)
    }

    pub fn is_home(&self, root_id: &str) -> bool {
        self.home_root_id.as_deref() == Some(root_id)
    }
}
