//! Per-dialect override blocks attached to every schema node.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::tags::FieldTag;

/// Dialect name of the introspection adapter itself.
pub const NATIVE_DIALECT: &str = "rust";

/// Dialect whose overrides the JSON and OpenAPI renderers honor.
pub const JSON_DIALECT: &str = "json";

/// Tri-state inclusion flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Include {
    #[default]
    Undefined,
    True,
    False,
}

impl Include {
    pub fn is_excluded(self) -> bool {
        self == Include::False
    }
}

// ---- Options ----

/// Ordered option set. Value-only entries are unique by value; key/value
/// entries are unique by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NativeOptions(IndexMap<String, String>);

impl NativeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_val(&mut self, val: &str) {
        if val.is_empty() {
            return;
        }
        self.0.insert(val.to_string(), String::new());
    }

    /// Sets `key=val`; an empty `val` removes the key.
    pub fn add_key_val(&mut self, key: &str, val: impl Into<String>) {
        if key.is_empty() {
            return;
        }
        let val = val.into();
        if val.is_empty() {
            self.delete(key);
            return;
        }
        self.0.insert(key.to_string(), val);
    }

    pub fn add_bool(&mut self, key: &str, val: bool) {
        if key.is_empty() {
            return;
        }
        self.0.insert(key.to_string(), val.to_string());
    }

    pub fn delete(&mut self, key: &str) {
        self.0.shift_remove(key);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn update_from(&mut self, other: &NativeOptions) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Options as sorted `key` / `key=value` strings.
    pub fn as_list(&self) -> Vec<String> {
        let mut out: Vec<String> = self
            .0
            .iter()
            .map(|(k, v)| if v.is_empty() { k.clone() } else { format!("{k}={v}") })
            .collect();
        out.sort();
        out
    }
}

impl Serialize for NativeOptions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.as_list())
    }
}

// ---- NativeType ----

/// Attributes specific to one dialect, each overriding the generic value
/// when non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NativeType {
    pub dialect: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub type_: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub type_ref: String,
    pub include: Include,
    #[serde(skip_serializing_if = "NativeOptions::is_empty")]
    pub options: NativeOptions,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub error: String,
}

impl NativeType {
    pub fn new(dialect: &str) -> Self {
        Self {
            dialect: dialect.to_string(),
            name: String::new(),
            type_: String::new(),
            type_ref: String::new(),
            include: Include::True,
            options: NativeOptions::new(),
            error: String::new(),
        }
    }

    /// Apply a parsed field tag: ignore excludes, alias renames, options merge.
    pub fn update_from_tag(&mut self, tag: &FieldTag) {
        if tag.ignore {
            self.include = Include::False;
        }
        if !tag.alias.is_empty() {
            self.name = tag.alias.clone();
        }
        for (key, val) in &tag.options {
            if val.is_empty() {
                self.options.add_val(key);
            } else {
                self.options.add_key_val(key, val.as_str());
            }
        }
    }
}
