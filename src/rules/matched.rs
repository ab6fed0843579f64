//! Matched resource types.
//!
//! For a type present in state, every live instance of its iterator that is not
//! declared in state is unexpected. The control carries the filtered iterator,
//! the index field the complement is taken on, the declared instance names to
//! exclude and a probe describing the per-id `should_not exist` check.
//!
//! Declared instance names stand in for live index values. The two are not
//! necessarily the same value space; see DESIGN.md.
//!
//! Probe properties are keyed by the external parameter name from
//! `resourceQualifiers`, never by the state property it translates from; the
//! state property is only used to look the value up.

use crate::core::{
    Diagnostics, Exclusion, ExclusionProbe, Instances, NegativeControl, ParsedResourceSet,
    Qualifier, QualifierResolver, ResourceCatalog, ResourceCatalogEntry, Scope,
};

/// Label of the widest search scope in diagnostics.
const ALL_RESOURCES: &str = "all resources";

/// Build one control per state type that has a catalog entry.
///
/// Types without an entry are skipped with a warning. Controls follow state
/// order.
pub fn analyze_matched(
    parsed: &ParsedResourceSet,
    catalog: &ResourceCatalog,
    source_label: &str,
    diagnostics: &dyn Diagnostics,
) -> Vec<NegativeControl> {
    let resolver = QualifierResolver::new(diagnostics);
    let everything = Scope::new(ALL_RESOURCES, parsed.as_map());
    let mut controls = Vec::new();

    for resource_type in parsed.type_names() {
        let Some(entry) = catalog.get(resource_type) else {
            diagnostics.warn(&format!(
                "no catalog entry for {} on this platform",
                resource_type
            ));
            continue;
        };
        let Some(instances) = parsed.instances(resource_type) else {
            continue;
        };
        diagnostics.debug(&format!(
            "{}: iterator {} index {}",
            resource_type, entry.iterator, entry.index
        ));

        let local = Scope::new(resource_type, instances);
        let qualifiers = entry
            .qualifiers
            .iter()
            .map(|parameter| {
                Qualifier::new(
                    parameter,
                    resolver.resolve_with_fallback(local, parameter, everything),
                )
            })
            .collect();

        let exclusion = Exclusion {
            index: entry.index.clone(),
            excluded_instance_ids: known_instances(instances),
            probe: build_probe(resource_type, entry, &resolver, local, everything),
        };

        controls.push(NegativeControl::matched(
            &entry.iterator,
            source_label,
            qualifiers,
            exclusion,
        ));
    }

    controls
}

fn known_instances(instances: &Instances) -> Vec<String> {
    instances.keys().cloned().collect()
}

/// The first resource qualifier takes the probed id, the rest are property
/// filters. Without resource qualifiers the index field takes the id and the
/// iterator qualifiers are reused.
fn build_probe(
    resource_type: &str,
    entry: &ResourceCatalogEntry,
    resolver: &QualifierResolver<'_>,
    local: Scope<'_>,
    everything: Scope<'_>,
) -> ExclusionProbe {
    let (id_parameter, parameters) = match entry.resource_qualifiers.split_first() {
        Some((first, rest)) => (first.as_str(), rest),
        None => (entry.index.as_str(), entry.qualifiers.as_slice()),
    };

    let properties = parameters
        .iter()
        .map(|parameter| {
            let property = entry.internal_property(parameter);
            Qualifier::new(
                parameter,
                resolver.resolve_with_fallback(local, property, everything),
            )
        })
        .collect();

    ExclusionProbe {
        resource: entry
            .resource
            .clone()
            .unwrap_or_else(|| resource_type.to_string()),
        id_parameter: id_parameter.to_string(),
        properties,
    }
}
