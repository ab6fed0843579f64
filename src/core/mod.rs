//! Core data model and search primitives.
//!
//! - `catalog`: platform resource catalogs and the lookup trait
//! - `control`: negative-coverage control records
//! - `diagnostics`: write-only diagnostic sinks
//! - `parsers`: state snapshot parsers
//! - `resolve`: deep qualifier lookup with scope fallback
//! - `resources`: resources parsed from a state snapshot

pub mod catalog;
pub mod control;
pub mod diagnostics;
pub mod parsers;
pub mod resolve;
pub mod resources;

pub use catalog::{
    CatalogError, CatalogSource, PlatformCatalogs, ResourceCatalog, ResourceCatalogEntry,
};
pub use control::{ControlScope, Exclusion, ExclusionProbe, NegativeControl, Qualifier};
pub use diagnostics::{
    Diagnostic, DiagnosticLevel, Diagnostics, RecordingDiagnostics, TracingDiagnostics,
};
pub use parsers::{ParseError, ResourceParser, TerraformStateParser};
pub use resolve::{QualifierResolver, Scope};
pub use resources::{Instances, ParsedResourceSet};
