//! Terraform state parser.
//!
//! Supports the current layout (format version 4):
//!
//! ```json
//! { "version": 4, "resources": [
//!     { "mode": "managed", "type": "aws_instance", "name": "web",
//!       "provider": "provider[\"registry.terraform.io/hashicorp/aws\"]",
//!       "instances": [{ "attributes": { "id": "i-1" } }] } ] }
//! ```
//!
//! and the legacy `modules[].resources` layout (version 3 and earlier). Only
//! managed resources are kept. Resources whose provider names another platform
//! are skipped; resources without provider information are kept.

use serde_json::{Map, Value};

use super::{ParseError, ResourceParser};
use crate::core::resources::ParsedResourceSet;

#[derive(Debug, Default, Clone, Copy)]
pub struct TerraformStateParser;

impl ResourceParser for TerraformStateParser {
    fn parse_resources(
        &self,
        snapshot: &Value,
        platform: &str,
    ) -> Result<ParsedResourceSet, ParseError> {
        let Some(root) = snapshot.as_object() else {
            return Err(unexpected("$", "object"));
        };

        if let Some(resources) = root.get("resources") {
            parse_current(resources, platform)
        } else if let Some(modules) = root.get("modules") {
            parse_legacy(modules, platform)
        } else {
            Err(ParseError::UnsupportedFormat(
                "neither 'resources' nor 'modules' found".to_string(),
            ))
        }
    }
}

fn parse_current(resources: &Value, platform: &str) -> Result<ParsedResourceSet, ParseError> {
    let Some(resources) = resources.as_array() else {
        return Err(unexpected("$.resources", "array"));
    };

    let mut parsed = ParsedResourceSet::new();
    for (i, resource) in resources.iter().enumerate() {
        let path = format!("$.resources[{}]", i);
        let Some(resource) = resource.as_object() else {
            return Err(unexpected(&path, "object"));
        };

        if str_field(resource, "mode").unwrap_or("managed") != "managed" {
            continue;
        }
        if !provider_matches(str_field(resource, "provider"), platform) {
            continue;
        }

        let resource_type = required_str(resource, "type", &path)?;
        let name = required_str(resource, "name", &path)?;
        let base_name = match str_field(resource, "module") {
            Some(module) => format!("{}.{}", module, name),
            None => name.to_string(),
        };

        let instances = match resource.get("instances") {
            Some(Value::Array(instances)) => instances,
            Some(_) => return Err(unexpected(&format!("{}.instances", path), "array")),
            None => continue,
        };

        for (j, instance) in instances.iter().enumerate() {
            let Some(instance) = instance.as_object() else {
                return Err(unexpected(&format!("{}.instances[{}]", path, j), "object"));
            };
            let instance_name = match instance.get("index_key") {
                Some(Value::String(key)) => format!("{}[\"{}\"]", base_name, key),
                Some(Value::Number(key)) => format!("{}[{}]", base_name, key),
                _ => base_name.clone(),
            };
            let attributes = instance
                .get("attributes")
                .cloned()
                .unwrap_or_else(|| Value::Object(Map::new()));
            parsed.insert(resource_type, &instance_name, attributes);
        }
    }
    Ok(parsed)
}

fn parse_legacy(modules: &Value, platform: &str) -> Result<ParsedResourceSet, ParseError> {
    let Some(modules) = modules.as_array() else {
        return Err(unexpected("$.modules", "array"));
    };

    let mut parsed = ParsedResourceSet::new();
    for (i, module) in modules.iter().enumerate() {
        let path = format!("$.modules[{}]", i);
        let Some(module) = module.as_object() else {
            return Err(unexpected(&path, "object"));
        };

        let prefix = module_prefix(module.get("path"));
        let resources = match module.get("resources") {
            Some(Value::Object(resources)) => resources,
            Some(_) => return Err(unexpected(&format!("{}.resources", path), "object")),
            None => continue,
        };

        for (key, resource) in resources {
            if key.starts_with("data.") {
                continue;
            }
            let resource_path = format!("{}.resources.{}", path, key);
            let Some(resource) = resource.as_object() else {
                return Err(unexpected(&resource_path, "object"));
            };
            if !provider_matches(str_field(resource, "provider"), platform) {
                continue;
            }

            let resource_type = required_str(resource, "type", &resource_path)?;
            let name = legacy_instance_name(key, resource_type);
            let attributes = resource
                .get("primary")
                .and_then(|primary| primary.get("attributes"))
                .cloned()
                .unwrap_or_else(|| Value::Object(Map::new()));
            parsed.insert(resource_type, &format!("{}{}", prefix, name), attributes);
        }
    }
    Ok(parsed)
}

/// `aws_instance.web.1` -> `web[1]`, `aws_instance.web` -> `web`.
fn legacy_instance_name(key: &str, resource_type: &str) -> String {
    let rest = key
        .strip_prefix(resource_type)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(key);
    match rest.rsplit_once('.') {
        Some((name, index)) if index.chars().all(|c| c.is_ascii_digit()) => {
            format!("{}[{}]", name, index)
        }
        _ => rest.to_string(),
    }
}

/// `["root", "app", "db"]` -> `module.app.module.db.`
fn module_prefix(path: Option<&Value>) -> String {
    let Some(Value::Array(segments)) = path else {
        return String::new();
    };
    segments
        .iter()
        .skip(1)
        .filter_map(Value::as_str)
        .map(|segment| format!("module.{}.", segment))
        .collect()
}

/// Provider strings look like `provider["registry.terraform.io/hashicorp/aws"]`,
/// `provider["registry.terraform.io/hashicorp/aws"].west`, `provider.aws` or
/// `provider.aws.west`, optionally behind `module.<name>.` segments.
fn provider_name(provider: &str) -> Option<&str> {
    let mut rest = provider;
    while let Some(module) = rest.strip_prefix("module.") {
        let (_, tail) = module.split_once('.')?;
        rest = tail;
    }

    if let Some(address) = rest.strip_prefix("provider[\"") {
        let (address, _) = address.split_once("\"]")?;
        return address.rsplit('/').next();
    }
    rest.strip_prefix("provider.")?.split('.').next()
}

fn provider_matches(provider: Option<&str>, platform: &str) -> bool {
    match provider.and_then(provider_name) {
        Some(name) => name == platform,
        None => true,
    }
}

fn str_field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object.get(key).and_then(Value::as_str)
}

fn required_str<'a>(
    object: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a str, ParseError> {
    str_field(object, key).ok_or_else(|| unexpected(&format!("{}.{}", path, key), "string"))
}

fn unexpected(path: &str, expected: &'static str) -> ParseError {
    ParseError::UnexpectedShape {
        path: path.to_string(),
        expected,
    }
}
