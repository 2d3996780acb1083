use serde::{Deserialize, Serialize};

use crate::label::TranslationResolver;
use crate::selection::SelectionState;
use crate::tree::NavNode;

/// One step of the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreadcrumbEntry {
    /// Translated display label
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    pub level: u8,
    pub icon: String,
}

/// Derive the trail from the selected prefix of `state`, root first.
pub fn project(
    state: &SelectionState,
    resolver: &TranslationResolver,
    default_icon: &str,
) -> Vec<BreadcrumbEntry> {
    let nodes = state.nodes();
    let nav_id = match nodes.first() {
        Some(NavNode::Level1(root)) => Some(root.id.as_str()),
        _ => None,
    };

    nodes
        .iter()
        .map(|node| BreadcrumbEntry {
            label: resolver.translate(node.label(), nav_id, Some(node.level())),
            route: node.route().map(str::to_string),
            level: node.level().depth(),
            icon: node.icon().unwrap_or(default_icon).to_string(),
        })
        .collect()
}
