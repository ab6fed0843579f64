//! Negative-coverage control records.
//!
//! One `NegativeControl` says "within this iterator, filtered by these
//! qualifiers, nothing unexpected may exist". How it is spelled in a target
//! framework is up to a renderer (see `crate::render`).

use serde::Serialize;
use serde_json::Value;

/// Prefix of every control id.
pub const CONTROL_PREFIX: &str = "NEGATIVE-COVERAGE";

pub const GENERATOR_NAME: &str = "negcov";

pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Severity of every negative-coverage control.
pub const NEGATIVE_IMPACT: f64 = 1.0;

/// Which analyzer produced a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlScope {
    /// Type declared in the catalog but absent from state.
    Unmatched,
    /// Type present in state; known instances are excluded.
    Matched,
}

impl std::fmt::Display for ControlScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlScope::Unmatched => write!(f, "unmatched"),
            ControlScope::Matched => write!(f, "matched"),
        }
    }
}

/// A named filter value. `None` when the value could not be resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Qualifier {
    pub name: String,
    pub value: Option<Value>,
}

impl Qualifier {
    pub fn new(name: &str, value: Option<&Value>) -> Self {
        Self {
            name: name.to_string(),
            value: value.cloned(),
        }
    }
}

/// Per-id assertion of a matched control: every live id outside the known set
/// is described with the singular resource and must not exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusionProbe {
    pub resource: String,
    /// Parameter bound to each unexpected id.
    pub id_parameter: String,
    pub properties: Vec<Qualifier>,
}

/// Complement part of a matched control.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exclusion {
    /// Iterator field the complement is computed on.
    pub index: String,
    /// Instance names declared in state, in state order.
    pub excluded_instance_ids: Vec<String>,
    pub probe: ExclusionProbe,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NegativeControl {
    pub id: String,
    pub title: String,
    pub description: String,
    pub impact: f64,
    pub scope: ControlScope,
    pub iterator: String,
    pub qualifiers: Vec<Qualifier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusion: Option<Exclusion>,
}

impl NegativeControl {
    pub fn unmatched(iterator: &str, source_label: &str, qualifiers: Vec<Qualifier>) -> Self {
        Self::build(ControlScope::Unmatched, iterator, source_label, qualifiers, None)
    }

    pub fn matched(
        iterator: &str,
        source_label: &str,
        qualifiers: Vec<Qualifier>,
        exclusion: Exclusion,
    ) -> Self {
        Self::build(
            ControlScope::Matched,
            iterator,
            source_label,
            qualifiers,
            Some(exclusion),
        )
    }

    fn build(
        scope: ControlScope,
        iterator: &str,
        source_label: &str,
        qualifiers: Vec<Qualifier>,
        exclusion: Option<Exclusion>,
    ) -> Self {
        let id = control_id(iterator);
        Self {
            title: format!("{} {}", GENERATOR_NAME, id),
            description: format!(
                "{} from the source file {}\nGenerated by {} v{}",
                id, source_label, GENERATOR_NAME, GENERATOR_VERSION
            ),
            id,
            impact: NEGATIVE_IMPACT,
            scope,
            iterator: iterator.to_string(),
            qualifiers,
            exclusion,
        }
    }

    /// Excluded instance ids; empty for unmatched controls.
    pub fn excluded_instance_ids(&self) -> &[String] {
        self.exclusion
            .as_ref()
            .map(|e| e.excluded_instance_ids.as_slice())
            .unwrap_or(&[])
    }

    pub fn qualifier(&self, name: &str) -> Option<&Qualifier> {
        self.qualifiers.iter().find(|q| q.name == name)
    }
}

pub fn control_id(iterator: &str) -> String {
    format!("{}:{}", CONTROL_PREFIX, iterator)
}
