//! Custom property (variable) collection
//!
//! A single pass over the declarations records every `--name: value`. There is
//! no cascade or specificity handling: when a variable is declared more than
//! once, the last declaration in document order wins.

use std::collections::BTreeMap;
use std::collections::HashMap;

use crate::css::declarations::Declaration;
use crate::tokens::values::{find_var_references, sanitize_value};

/// Custom property name (with `--` prefix) to sanitized raw value
///
/// Iteration is ordered by name so the alias lanes are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableMap {
    variables: BTreeMap<String, String>,
}

impl VariableMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the map from declarations
    pub fn from_declarations(declarations: &[Declaration]) -> Self {
        let mut map = Self::new();
        for declaration in declarations.iter().filter(|d| d.is_custom_property()) {
            if let Some(value) = sanitize_value(&declaration.value) {
                map.insert(declaration.property.clone(), value);
            }
        }
        map
    }

    /// Insert a variable, overwriting an earlier declaration
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    /// Get the raw value of a variable by its full name (`--brand`)
    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(|v| v.as_str())
    }

    /// Name and value of a variable, both borrowed from the map
    pub fn get_key_value(&self, name: &str) -> Option<(&str, &str)> {
        self.variables
            .get_key_value(name)
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// How often each custom property is referenced through `var()` in a CSS text
#[derive(Debug, Clone, Default)]
pub struct VariableUsage {
    counts: HashMap<String, u32>,
}

impl VariableUsage {
    /// Count `var(--name ...)` occurrences in the whole text
    pub fn from_css(css: &str) -> Self {
        let mut counts = HashMap::new();
        for name in find_var_references(css) {
            *counts.entry(name.to_string()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Number of references of a variable, 0 when it is never referenced
    pub fn references(&self, name: &str) -> u32 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Usage of an alias token: the reference count, or 1 for a variable that
    /// is declared but never used
    pub fn alias_usage(&self, name: &str) -> u32 {
        self.references(name).max(1)
    }
}
