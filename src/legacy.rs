//! Legacy Route Mapper
//!
//! Translates deprecated routes to their canonical form. Lookup is an exact
//! match on the path portion; any `?query` or `#fragment` is carried over.

use std::collections::BTreeMap;

use crate::error::{NavError, NavResult};

lazy_static::lazy_static! {
    /// Routes renamed when the HR modules moved under the admin console.
    pub static ref LEGACY_ROUTES: BTreeMap<&'static str, &'static str> = {
        let mut m = BTreeMap::new();
        m.insert("/employees", "/admin/employees");
        m.insert("/employee-list", "/admin/employees/list");
        m.insert("/departments", "/admin/organization/departments");
        m.insert("/positions", "/admin/organization/positions");
        m.insert("/time-attendance", "/self-service/time");
        m.insert("/leave-request", "/self-service/leave");
        m.insert("/payslip", "/self-service/payslip");
        m.insert("/dashboard", "/home");
        m
    };
}

#[derive(Debug, Clone)]
pub struct LegacyRouteMapper {
    table: BTreeMap<String, String>,
}

impl Default for LegacyRouteMapper {
    fn default() -> Self {
        Self {
            table: builtin_table(),
        }
    }
}

impl LegacyRouteMapper {
    /// Built-in table with `extra` entries layered on top.
    ///
    /// Rejects tables where a target is itself a legacy source, since mapping
    /// would then stop being idempotent.
    pub fn new(extra: &BTreeMap<String, String>) -> NavResult<Self> {
        let mut table = builtin_table();
        for (from, to) in extra {
            table.insert(from.clone(), to.clone());
        }

        for (from, to) in &table {
            if table.contains_key(to) {
                return Err(NavError::LegacyChain {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
        }

        Ok(Self { table })
    }

    /// Map `path` to its canonical form. Unmapped paths come back unchanged.
    pub fn canonicalize(&self, path: &str) -> String {
        let (base, suffix) = split_suffix(path);
        match self.table.get(base) {
            Some(target) => {
                tracing::debug!(from = base, to = %target, "legacy route mapped");
                format!("{}{}", target, suffix)
            }
            None => path.to_string(),
        }
    }

    pub fn is_legacy(&self, path: &str) -> bool {
        self.table.contains_key(split_suffix(path).0)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

fn builtin_table() -> BTreeMap<String, String> {
    LEGACY_ROUTES
        .iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect()
}

/// Split `path` into the path proper and a trailing `?query` / `#fragment`.
pub(crate) fn split_suffix(path: &str) -> (&str, &str) {
    match path.find(|c| c == '?' || c == '#') {
        Some(index) => path.split_at(index),
        None => (path, ""),
    }
}
