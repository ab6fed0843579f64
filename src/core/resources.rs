//! Parsed resource set: resource type -> instance name -> attribute tree.
//!
//! Backed by `serde_json::Map` with `preserve_order`, so iteration follows the
//! order in which the parser inserted types and instances. The set is handed to
//! the analyzers by shared reference only.

use serde_json::{Map, Value};

use super::parsers::ParseError;

/// Instances of one resource type, keyed by the name declared in the state.
pub type Instances = Map<String, Value>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedResourceSet {
    types: Map<String, Value>,
}

impl ParsedResourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON object shaped `{ type: { instance: attributes } }`.
    pub fn from_value(value: Value) -> Result<Self, ParseError> {
        let Value::Object(types) = value else {
            return Err(ParseError::UnexpectedShape {
                path: "$".to_string(),
                expected: "object",
            });
        };
        for (resource_type, instances) in &types {
            if !instances.is_object() {
                return Err(ParseError::UnexpectedShape {
                    path: format!("$.{}", resource_type),
                    expected: "object",
                });
            }
        }
        Ok(Self { types })
    }

    /// Add an instance, creating the type entry on first use.
    ///
    /// A repeated instance name replaces the earlier attributes in place.
    pub fn insert(&mut self, resource_type: &str, instance: &str, attributes: Value) {
        let entry = self
            .types
            .entry(resource_type.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(instances) = entry {
            instances.insert(instance.to_string(), attributes);
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn contains_type(&self, resource_type: &str) -> bool {
        self.types.contains_key(resource_type)
    }

    /// Resource type names in parse order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn instances(&self, resource_type: &str) -> Option<&Instances> {
        self.types.get(resource_type).and_then(Value::as_object)
    }

    /// The whole set as one tree, used as the widest search scope.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.types
    }
}
