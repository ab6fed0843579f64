//! Negative-coverage generation pipeline.
//!
//! 1. The parser turns the state snapshot into a `ParsedResourceSet`.
//! 2. `rules::unmatched` covers catalog types missing from state.
//! 3. `rules::matched` covers state types, minus declared instances.
//!
//! Results are concatenated in that order. Inputs are only borrowed, so one
//! catalog can serve any number of concurrent generations.

use serde_json::Value;

use crate::core::{
    Diagnostics, NegativeControl, ParseError, ParsedResourceSet, ResourceCatalog, ResourceParser,
};
use crate::rules::{analyze_matched, analyze_unmatched};

/// Parse `snapshot` and build its negative-coverage controls.
///
/// Parser failures are returned unchanged; every other anomaly is reported to
/// `diagnostics` and generation carries on.
pub fn generate(
    snapshot: &Value,
    parser: &dyn ResourceParser,
    catalog: &ResourceCatalog,
    platform: &str,
    source_label: &str,
    diagnostics: &dyn Diagnostics,
) -> Result<Vec<NegativeControl>, ParseError> {
    let parsed = parser.parse_resources(snapshot, platform)?;
    diagnostics.debug(&format!(
        "{}: parsed {} resource types for {}",
        source_label,
        parsed.len(),
        platform
    ));
    Ok(analyze(&parsed, catalog, source_label, diagnostics))
}

/// Unmatched controls followed by matched controls.
pub fn analyze(
    parsed: &ParsedResourceSet,
    catalog: &ResourceCatalog,
    source_label: &str,
    diagnostics: &dyn Diagnostics,
) -> Vec<NegativeControl> {
    let mut controls = analyze_unmatched(parsed, catalog, source_label, diagnostics);
    controls.extend(analyze_matched(parsed, catalog, source_label, diagnostics));
    controls
}
