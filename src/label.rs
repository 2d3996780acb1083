//! Label Normalizer and Translation Resolver
//!
//! Sidebar labels are free text, often bilingual (`"ลงเวลา (Time)"`). They are
//! turned into camelCase keys and resolved through a string lookup, most
//! specific key first, falling back to the raw label.

use regex::Regex;
use std::collections::HashMap;

use crate::tree::Level;

lazy_static::lazy_static! {
    static ref PARENTHETICAL: Regex = Regex::new(r"\(([^()]*)\)").unwrap();
    static ref PARENS: Regex = Regex::new(r"[()]").unwrap();
    static ref NON_KEY_CHARS: Regex = Regex::new(r"[^\w\s-]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════════
// NORMALIZER
// ═══════════════════════════════════════════════════════════════════════════════

/// Convert a label into a camelCase lookup key.
///
/// A parenthesized segment wins over the rest of the label, so
/// `"ลงเวลา (Time)"` becomes `"time"` and `"Self Service"` becomes `"selfService"`.
pub fn normalize(label: &str) -> String {
    let source = match PARENTHETICAL.captures(label) {
        Some(cap) => cap[1].to_string(),
        None => PARENS.replace_all(label, "").to_string(),
    };

    let lowered = source.to_lowercase();
    let cleaned = NON_KEY_CHARS.replace_all(&lowered, "");
    let collapsed = WHITESPACE.replace_all(cleaned.trim(), " ");

    let mut key = String::with_capacity(collapsed.len());
    for (index, word) in collapsed.split(' ').filter(|w| !w.is_empty()).enumerate() {
        if index == 0 {
            key.push_str(word);
        } else {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                key.extend(first.to_uppercase());
                key.push_str(chars.as_str());
            }
        }
    }
    key
}

// ═══════════════════════════════════════════════════════════════════════════════
// STRING LOOKUP
// ═══════════════════════════════════════════════════════════════════════════════

/// External translation store. Unresolved keys are echoed back unchanged.
pub trait StringLookup {
    fn lookup(&self, key: &str) -> String;
}

impl<F> StringLookup for F
where
    F: Fn(&str) -> String,
{
    fn lookup(&self, key: &str) -> String {
        self(key)
    }
}

impl StringLookup for HashMap<String, String> {
    fn lookup(&self, key: &str) -> String {
        self.get(key).cloned().unwrap_or_else(|| key.to_string())
    }
}

/// Lookup that resolves nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoLookup;

impl StringLookup for EchoLookup {
    fn lookup(&self, key: &str) -> String {
        key.to_string()
    }
}

/// Nested translation document flattened into dotted keys.
///
/// `{"navigation": {"time": "Time"}}` resolves `navigation.time`.
#[derive(Debug, Clone, Default)]
pub struct JsonCatalog {
    entries: HashMap<String, String>,
}

impl JsonCatalog {
    pub fn from_value(value: &serde_json::Value) -> Self {
        let mut entries = HashMap::new();
        flatten("", value, &mut entries);
        Self { entries }
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn flatten(prefix: &str, value: &serde_json::Value, out: &mut HashMap<String, String>) {
    match value {
        serde_json::Value::Object(map) => {
            for (k, v) in map {
                let key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{}.{}", prefix, k)
                };
                flatten(&key, v, out);
            }
        }
        serde_json::Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        // Numbers, booleans, arrays and nulls are not display strings
        _ => {}
    }
}

impl StringLookup for JsonCatalog {
    fn lookup(&self, key: &str) -> String {
        self.entries.lookup(key)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TRANSLATION RESOLVER
// ═══════════════════════════════════════════════════════════════════════════════

pub struct TranslationResolver<'a> {
    lookup: &'a dyn StringLookup,
    prefix: &'a str,
}

impl<'a> TranslationResolver<'a> {
    pub fn new(lookup: &'a dyn StringLookup, prefix: &'a str) -> Self {
        Self { lookup, prefix }
    }

    /// Resolve a label, trying in order:
    ///   1. `{prefix}.{navId}.level{N}.{key}`
    ///   2. `{prefix}.{navId}.{key}`
    ///   3. `{prefix}.{key}`
    /// and returning the untouched label when none resolves.
    pub fn translate(&self, label: &str, nav_id: Option<&str>, level: Option<Level>) -> String {
        let key = normalize(label);
        if key.is_empty() {
            return label.to_string();
        }

        self.candidates(&key, nav_id, level)
            .into_iter()
            .find_map(|candidate| {
                let resolved = self.lookup.lookup(&candidate);
                (resolved != candidate).then_some(resolved)
            })
            .unwrap_or_else(|| label.to_string())
    }

    fn candidates(&self, key: &str, nav_id: Option<&str>, level: Option<Level>) -> Vec<String> {
        let mut keys = Vec::with_capacity(3);
        if let Some(id) = nav_id {
            if let Some(level) = level {
                keys.push(format!("{}.{}.level{}.{}", self.prefix, id, level.depth(), key));
            }
            keys.push(format!("{}.{}.{}", self.prefix, id, key));
        }
        keys.push(format!("{}.{}", self.prefix, key));
        keys
    }
}
