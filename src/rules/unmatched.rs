//! Unmatched resource types.
//!
//! A type declared in the platform catalog but absent from state gets one
//! control asserting that its iterator, filtered by the qualifiers, is empty.
//! Nothing of that type exists in state, so qualifier values are borrowed from
//! whatever other resources carry them.

use crate::core::{
    Diagnostics, NegativeControl, ParsedResourceSet, Qualifier, QualifierResolver,
    ResourceCatalog,
};

/// Build one control per catalog type missing from `parsed`.
///
/// Controls follow catalog declaration order. Qualifiers are searched across the
/// whole parsed set; values that cannot be found are left empty.
pub fn analyze_unmatched(
    parsed: &ParsedResourceSet,
    catalog: &ResourceCatalog,
    source_label: &str,
    diagnostics: &dyn Diagnostics,
) -> Vec<NegativeControl> {
    let missing: Vec<_> = catalog
        .iter()
        .filter(|(resource_type, _)| !parsed.contains_type(resource_type))
        .collect();

    diagnostics.debug(&format!(
        "unmatched resource types: [{}]",
        missing
            .iter()
            .map(|(resource_type, _)| *resource_type)
            .collect::<Vec<_>>()
            .join(", ")
    ));

    missing
        .into_iter()
        .map(|(_, entry)| {
            let qualifiers = entry
                .qualifiers
                .iter()
                .map(|parameter| {
                    let value = QualifierResolver::resolve(parsed.as_map(), parameter);
                    match value {
                        Some(value) => diagnostics.debug(&format!(
                            "{}: qualifier '{}' = {} from other resources",
                            entry.iterator, parameter, value
                        )),
                        None => diagnostics.debug(&format!(
                            "{}: qualifier '{}' not found in any resource",
                            entry.iterator, parameter
                        )),
                    }
                    Qualifier::new(parameter, value)
                })
                .collect();
            NegativeControl::unmatched(&entry.iterator, source_label, qualifiers)
        })
        .collect()
}
