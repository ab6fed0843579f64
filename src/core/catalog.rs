//! Platform resource catalogs.
//!
//! A catalog says, for one platform, which resource types can be checked and how:
//! the iterator that enumerates live instances, the qualifiers that narrow it and
//! the index field identifying individual instances. Catalogs are loaded once and
//! then only read.
//!
//! Catalog file layout:
//!
//! ```json
//! {
//!   "platforms": {
//!     "aws": {
//!       "aws_instance": {
//!         "iterator": "aws_ec2_instances",
//!         "qualifiers": ["region"],
//!         "index": "instance_ids",
//!         "resource": "aws_ec2_instance",
//!         "resourceQualifiers": ["instance_id", "region"]
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Declaration order is kept (serde_json `preserve_order`) because it drives the
//! order of unmatched controls.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog {path} must be an object")]
    NotAnObject { path: String },
    #[error("invalid catalog entry for {resource_type}: {source}")]
    InvalidEntry {
        resource_type: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog entry for {resource_type} has an empty '{field}'")]
    EmptyField {
        resource_type: String,
        field: &'static str,
    },
    #[error("no catalog for platform '{0}'")]
    UnknownPlatform(String),
}

/// How one resource type is enumerated and addressed on a platform.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCatalogEntry {
    /// Plural resource enumerating live instances.
    pub iterator: String,
    /// Iterator filter parameters, in declaration order.
    #[serde(default)]
    pub qualifiers: Vec<String>,
    /// Field of the iterator identifying individual instances.
    pub index: String,
    /// Internal property name -> external qualifier name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub property_translation: BTreeMap<String, String>,
    /// Singular resource used for per-id probes. Defaults to the type name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    /// Parameters of the singular resource. The first is bound to the probed id.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_qualifiers: Vec<String>,
}

impl ResourceCatalogEntry {
    pub fn new(iterator: &str, index: &str) -> Self {
        Self {
            iterator: iterator.to_string(),
            qualifiers: Vec::new(),
            index: index.to_string(),
            property_translation: BTreeMap::new(),
            resource: None,
            resource_qualifiers: Vec::new(),
        }
    }

    pub fn with_qualifiers(mut self, qualifiers: &[&str]) -> Self {
        self.qualifiers = qualifiers.iter().map(|q| q.to_string()).collect();
        self
    }

    pub fn with_resource(mut self, resource: &str, qualifiers: &[&str]) -> Self {
        self.resource = Some(resource.to_string());
        self.resource_qualifiers = qualifiers.iter().map(|q| q.to_string()).collect();
        self
    }

    pub fn with_translation(mut self, property: &str, qualifier: &str) -> Self {
        self.property_translation
            .insert(property.to_string(), qualifier.to_string());
        self
    }

    /// Map an external qualifier name back to the property name used in state.
    ///
    /// Names that are not a translation target are returned unchanged. When
    /// several properties translate to the same qualifier the smallest property
    /// name wins.
    pub fn internal_property<'a>(&'a self, qualifier: &'a str) -> &'a str {
        self.property_translation
            .iter()
            .find(|(_, external)| external.as_str() == qualifier)
            .map(|(internal, _)| internal.as_str())
            .unwrap_or(qualifier)
    }

    fn validate(&self, resource_type: &str) -> Result<(), CatalogError> {
        let empty = |field| CatalogError::EmptyField {
            resource_type: resource_type.to_string(),
            field,
        };
        if self.iterator.trim().is_empty() {
            return Err(empty("iterator"));
        }
        if self.index.trim().is_empty() {
            return Err(empty("index"));
        }
        Ok(())
    }
}

/// Catalog of one platform, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceCatalog {
    entries: Vec<(String, ResourceCatalogEntry)>,
    positions: HashMap<String, usize>,
}

impl ResourceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry. Replacing keeps the original position.
    pub fn insert(&mut self, resource_type: &str, entry: ResourceCatalogEntry) {
        match self.positions.get(resource_type) {
            Some(&pos) => self.entries[pos].1 = entry,
            None => {
                self.positions
                    .insert(resource_type.to_string(), self.entries.len());
                self.entries.push((resource_type.to_string(), entry));
            }
        }
    }

    pub fn with_entry(mut self, resource_type: &str, entry: ResourceCatalogEntry) -> Self {
        self.insert(resource_type, entry);
        self
    }

    pub fn get(&self, resource_type: &str) -> Option<&ResourceCatalogEntry> {
        self.positions
            .get(resource_type)
            .map(|&pos| &self.entries[pos].1)
    }

    pub fn contains(&self, resource_type: &str) -> bool {
        self.positions.contains_key(resource_type)
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResourceCatalogEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build from `{ type: entry }`, validating every entry.
    pub fn from_value(value: Value) -> Result<Self, CatalogError> {
        let Value::Object(map) = value else {
            return Err(CatalogError::NotAnObject {
                path: "platform".to_string(),
            });
        };

        let mut catalog = Self::new();
        for (resource_type, raw) in map {
            let entry: ResourceCatalogEntry =
                serde_json::from_value(raw).map_err(|source| CatalogError::InvalidEntry {
                    resource_type: resource_type.clone(),
                    source,
                })?;
            entry.validate(&resource_type)?;
            catalog.insert(&resource_type, entry);
        }
        Ok(catalog)
    }
}

/// Lookup service handing out the catalog of a platform.
pub trait CatalogSource: Sync {
    fn catalog_for(&self, platform: &str) -> Option<&ResourceCatalog>;
}

/// Catalogs for several platforms, usually loaded from one JSON file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlatformCatalogs {
    platforms: Vec<(String, ResourceCatalog)>,
}

impl PlatformCatalogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_platform(mut self, platform: &str, catalog: ResourceCatalog) -> Self {
        self.platforms.retain(|(name, _)| name != platform);
        self.platforms.push((platform.to_string(), catalog));
        self
    }

    pub fn platform_names(&self) -> impl Iterator<Item = &str> {
        self.platforms.iter().map(|(name, _)| name.as_str())
    }

    /// Like `catalog_for`, but a missing platform is an error.
    pub fn require(&self, platform: &str) -> Result<&ResourceCatalog, CatalogError> {
        self.catalog_for(platform)
            .ok_or_else(|| CatalogError::UnknownPlatform(platform.to_string()))
    }

    pub fn from_json_str(content: &str) -> Result<Self, CatalogError> {
        let document: Value = serde_json::from_str(content)?;
        let Some(platforms) = document.get("platforms").and_then(Value::as_object) else {
            return Err(CatalogError::NotAnObject {
                path: "platforms".to_string(),
            });
        };

        let mut catalogs = Self::new();
        for (platform, entries) in platforms {
            let catalog = ResourceCatalog::from_value(entries.clone())?;
            catalogs = catalogs.with_platform(platform, catalog);
        }
        Ok(catalogs)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }
}

impl CatalogSource for PlatformCatalogs {
    fn catalog_for(&self, platform: &str) -> Option<&ResourceCatalog> {
        self.platforms
            .iter()
            .find(|(name, _)| name == platform)
            .map(|(_, catalog)| catalog)
    }
}
