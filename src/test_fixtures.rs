//! Shared fixtures: a small HR console sidebar.

use serde_json::json;

use crate::config::EngineConfig;
use crate::selection::SelectionState;
use crate::tree::NavigationTree;

pub fn sample_tree_json() -> serde_json::Value {
    json!([
        { "id": "home", "label": "หน้าหลัก (Home)", "route": "/home", "icon": "home" },
        {
            "id": "self-service",
            "label": "Self Service",
            "route": "/self-service",
            "icon": "person",
            "children": [
                { "label": "ลงเวลา (Time)", "route": "/self-service/time", "icon": "schedule" },
                {
                    "label": "Leave",
                    "route": "/self-service/leave",
                    "children": [
                        { "label": "Leave Request", "route": "/self-service/leave/request" },
                        { "label": "Leave History", "route": "/self-service/leave/history" }
                    ]
                },
                { "label": "Payslip", "route": "/self-service/payslip" }
            ]
        },
        {
            "id": "admin",
            "label": "Admin",
            "route": "/admin",
            "icon": "admin_panel_settings",
            "children": [
                {
                    "label": "Employees",
                    "route": "/admin/employees",
                    "icon": "people",
                    "children": [
                        {
                            "label": "Employee List",
                            "route": "/admin/employees/list",
                            "children": [
                                { "label": "Active", "route": "/admin/employees/list/active" },
                                { "label": "Terminated", "route": "/admin/employees/list/terminated" }
                            ]
                        },
                        { "label": "Onboarding", "route": "/admin/employees/onboarding" }
                    ]
                },
                {
                    "label": "Organization",
                    "route": "/admin/organization",
                    "children": [
                        { "label": "Departments", "route": "/admin/organization/departments" },
                        { "label": "Positions", "route": "/admin/organization/positions" }
                    ]
                },
                { "label": "Settings", "route": "/admin/settings" }
            ]
        },
        {
            "id": "reports",
            "label": "Reports",
            "children": [
                { "label": "Attendance Report", "route": "/reports/attendance" },
                { "label": "Shared Positions", "route": "/admin/organization/positions" }
            ]
        }
    ])
}

pub fn sample_tree() -> NavigationTree {
    NavigationTree::from_json_str(&sample_tree_json().to_string(), &EngineConfig::default())
        .expect("fixture tree is valid")
}

/// Admin root with the Employees branch chosen.
pub fn admin_employees(tree: &NavigationTree) -> SelectionState {
    let admin = tree.root("admin").expect("admin root").clone();
    let employees = admin.children[0].clone();
    SelectionState::from_chain(admin, vec![employees])
}
