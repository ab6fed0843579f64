//! Qualifier value resolution.
//!
//! Qualifier values (region, account, ...) are looked up by name anywhere inside
//! an attribute tree. The search is pre-order depth first: a mapping's own keys
//! are checked before any of its children are visited, children are visited in
//! document order, sequences element by element. The first match wins.
//!
//! When a value is missing from its natural scope it may be borrowed from a wider
//! one. That is a heuristic: it assumes values such as region are consistent
//! across resource types, and nothing checks that they are.

use serde_json::{Map, Value};

use super::diagnostics::Diagnostics;

/// A named, read-only search scope.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    /// Used in diagnostics only.
    pub label: &'a str,
    pub tree: &'a Map<String, Value>,
}

impl<'a> Scope<'a> {
    pub fn new(label: &'a str, tree: &'a Map<String, Value>) -> Self {
        Self { label, tree }
    }
}

pub struct QualifierResolver<'d> {
    diagnostics: &'d dyn Diagnostics,
}

impl<'d> QualifierResolver<'d> {
    pub fn new(diagnostics: &'d dyn Diagnostics) -> Self {
        Self { diagnostics }
    }

    /// Find the first value stored under `name` in `scope`.
    ///
    /// A match holding `null` counts as absent; the search does not continue
    /// past it.
    pub fn resolve<'a>(scope: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
        find_in_map(scope, name).filter(|value| !value.is_null())
    }

    /// Resolve in `primary`, then in `fallback` if nothing was found.
    ///
    /// A value present in `primary` is never replaced by one from `fallback`.
    pub fn resolve_with_fallback<'a>(
        &self,
        primary: Scope<'a>,
        name: &str,
        fallback: Scope<'a>,
    ) -> Option<&'a Value> {
        if let Some(value) = Self::resolve(primary.tree, name) {
            return Some(value);
        }

        self.diagnostics.warn(&format!(
            "{} has no '{}' value, searching {}",
            primary.label, name, fallback.label
        ));

        match Self::resolve(fallback.tree, name) {
            Some(value) => {
                self.diagnostics.debug(&format!(
                    "{}: '{}' = {} borrowed from {}",
                    primary.label, name, value, fallback.label
                ));
                Some(value)
            }
            None => {
                self.diagnostics.warn(&format!(
                    "{}: '{}' could not be resolved in {} or {}",
                    primary.label, name, primary.label, fallback.label
                ));
                None
            }
        }
    }
}

fn find_in_map<'a>(map: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    if let Some(value) = map.get(name) {
        return Some(value);
    }
    map.values().find_map(|child| find_in_value(child, name))
}

fn find_in_value<'a>(value: &'a Value, name: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => find_in_map(map, name),
        Value::Array(items) => items.iter().find_map(|item| find_in_value(item, name)),
        _ => None,
    }
}
