#[cfg(test)]
mod tests {
    use crate::label::{normalize, EchoLookup, JsonCatalog, StringLookup, TranslationResolver};
    use crate::tree::Level;
    use std::collections::HashMap;

    // ═══════════════════════════════════════════════════════════════════════════════
    // NORMALIZER
    // ═══════════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_parenthetical_wins() {
        assert_eq!(normalize("ลงเวลา (Time)"), "time");
        assert_eq!(normalize("ใบลา (Leave Request)"), "leaveRequest");
    }

    #[test]
    fn test_plain_labels() {
        assert_eq!(normalize("Self Service"), "selfService");
        assert_eq!(normalize("Employees"), "employees");
        assert_eq!(normalize("  Org   Chart  "), "orgChart");
    }

    #[test]
    fn test_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("()"), "");
    }

    #[test]
    fn test_innermost_parenthetical() {
        assert_eq!(normalize("Outer (Inner (Core Term))"), "coreTerm");
    }

    #[test]
    fn test_unbalanced_parens_stripped() {
        assert_eq!(normalize("Reports (beta"), "reportsBeta");
    }

    #[test]
    fn test_punctuation_dropped_hyphen_kept() {
        assert_eq!(normalize("Check-in & Check-out!"), "check-inCheck-out");
        assert_eq!(normalize("Payroll: Summary"), "payrollSummary");
    }

    // ═══════════════════════════════════════════════════════════════════════════════
    // TRANSLATION CASCADE
    // ═══════════════════════════════════════════════════════════════════════════════

    fn catalog(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_most_specific_key_first() {
        let lookup = catalog(&[
            ("navigation.admin.level2.employees", "Staff (admin L2)"),
            ("navigation.admin.employees", "Staff (admin)"),
            ("navigation.employees", "Staff"),
        ]);
        let resolver = TranslationResolver::new(&lookup, "navigation");
        assert_eq!(
            resolver.translate("Employees", Some("admin"), Some(Level::Two)),
            "Staff (admin L2)"
        );
        assert_eq!(
            resolver.translate("Employees", Some("admin"), Some(Level::Three)),
            "Staff (admin)"
        );
        assert_eq!(resolver.translate("Employees", Some("hr"), None), "Staff");
        assert_eq!(resolver.translate("Employees", None, Some(Level::Two)), "Staff");
    }

    #[test]
    fn test_unresolved_returns_raw_label() {
        let resolver = TranslationResolver::new(&EchoLookup, "navigation");
        assert_eq!(
            resolver.translate("ลงเวลา  (Time)", Some("self-service"), Some(Level::Two)),
            "ลงเวลา  (Time)"
        );
        assert_eq!(resolver.translate("", Some("x"), Some(Level::One)), "");
    }

    #[test]
    fn test_closure_lookup() {
        let lookup = |key: &str| {
            if key == "navigation.time" {
                "เวลา".to_string()
            } else {
                key.to_string()
            }
        };
        let resolver = TranslationResolver::new(&lookup, "navigation");
        assert_eq!(resolver.translate("ลงเวลา (Time)", None, None), "เวลา");
    }

    #[test]
    fn test_custom_prefix() {
        let lookup = catalog(&[("menu.selfService", "Self-Service")]);
        let resolver = TranslationResolver::new(&lookup, "menu");
        assert_eq!(resolver.translate("Self Service", None, None), "Self-Service");
    }

    #[test]
    fn test_json_catalog_flattening() {
        let catalog = JsonCatalog::from_json_str(
            r#"{ "navigation": { "time": "Time", "admin": { "level2": { "employees": "Staff" } }, "count": 3 } }"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.lookup("navigation.time"), "Time");
        assert_eq!(catalog.lookup("navigation.admin.level2.employees"), "Staff");
        assert_eq!(catalog.lookup("navigation.count"), "navigation.count");
    }
}
