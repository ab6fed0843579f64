//! InSpec control syntax.
//!
//! Unmatched controls become a single negated `describe` on the iterator.
//! Matched controls subtract the declared ids from the filtered iterator and
//! describe every remaining id with the singular resource:
//!
//! ```ruby
//! control 'NEGATIVE-COVERAGE:aws_ec2_instances' do
//!   ...
//!   (aws_ec2_instances.where({ region: 'us-east-1' }).instance_ids - [
//!     'web',
//!   ]).each do |id|
//!     describe aws_ec2_instance({ instance_id: id }) do
//!       it { should_not exist }
//!     end
//!   end
//! end
//! ```

use std::fmt::Write;

use serde_json::Value;

use super::{Render, RenderError};
use crate::core::{Exclusion, NegativeControl, Qualifier};

#[derive(Debug, Default, Clone, Copy)]
pub struct InspecRenderer;

impl Render for InspecRenderer {
    fn render(&self, controls: &[NegativeControl]) -> Result<String, RenderError> {
        let mut out = String::new();
        for (i, control) in controls.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            write_control(&mut out, control);
        }
        Ok(out)
    }
}

fn write_control(out: &mut String, control: &NegativeControl) {
    let _ = writeln!(out, "control {} do", ruby_string(&control.id));
    let _ = writeln!(out, "  title {}", ruby_string(&control.title));
    let _ = writeln!(out, "  desc {}", ruby_string(&control.description));
    let _ = writeln!(out, "  impact {:.1}", control.impact);

    match &control.exclusion {
        None => {
            let _ = writeln!(
                out,
                "  describe {}{} do",
                control.iterator,
                call_args(&control.qualifiers, None)
            );
            let _ = writeln!(out, "    it {{ should_not exist }}");
            let _ = writeln!(out, "  end");
        }
        Some(exclusion) => write_complement(out, control, exclusion),
    }

    let _ = writeln!(out, "end");
}

fn write_complement(out: &mut String, control: &NegativeControl, exclusion: &Exclusion) {
    let filtered = if control.qualifiers.is_empty() {
        control.iterator.clone()
    } else {
        format!(
            "{}.where({})",
            control.iterator,
            ruby_hash(&control.qualifiers, None)
        )
    };

    if exclusion.excluded_instance_ids.is_empty() {
        let _ = writeln!(out, "  ({}.{} - []).each do |id|", filtered, exclusion.index);
    } else {
        let _ = writeln!(out, "  ({}.{} - [", filtered, exclusion.index);
        for id in &exclusion.excluded_instance_ids {
            let _ = writeln!(out, "    {},", ruby_string(id));
        }
        let _ = writeln!(out, "  ]).each do |id|");
    }

    let probe = &exclusion.probe;
    let _ = writeln!(
        out,
        "    describe {}{} do",
        probe.resource,
        call_args(&probe.properties, Some(&probe.id_parameter))
    );
    let _ = writeln!(out, "      it {{ should_not exist }}");
    let _ = writeln!(out, "    end");
    let _ = writeln!(out, "  end");
}

/// `({ a: 'x' })`, or nothing when there is nothing to pass.
fn call_args(qualifiers: &[Qualifier], id_parameter: Option<&str>) -> String {
    if qualifiers.is_empty() && id_parameter.is_none() {
        String::new()
    } else {
        format!("({})", ruby_hash(qualifiers, id_parameter))
    }
}

/// `{ id_parameter: id, name: value, ... }`.
fn ruby_hash(qualifiers: &[Qualifier], id_parameter: Option<&str>) -> String {
    let mut pairs = Vec::with_capacity(qualifiers.len() + 1);
    if let Some(id_parameter) = id_parameter {
        pairs.push(format!("{} id", ruby_key(id_parameter)));
    }
    for qualifier in qualifiers {
        let value = qualifier
            .value
            .as_ref()
            .map(ruby_value)
            .unwrap_or_else(|| "nil".to_string());
        pairs.push(format!("{} {}", ruby_key(&qualifier.name), value));
    }
    format!("{{ {} }}", pairs.join(", "))
}

/// Symbol shorthand when the name allows it, string key otherwise.
fn ruby_key(name: &str) -> String {
    let mut chars = name.chars();
    let is_symbol = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if is_symbol {
        format!("{}:", name)
    } else {
        format!("{} =>", ruby_string(name))
    }
}

fn ruby_value(value: &Value) -> String {
    match value {
        Value::Null => "nil".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => ruby_string(s),
        Value::Array(items) => format!(
            "[{}]",
            items.iter().map(ruby_value).collect::<Vec<_>>().join(", ")
        ),
        Value::Object(map) => {
            let pairs: Vec<_> = map
                .iter()
                .map(|(k, v)| format!("{} => {}", ruby_string(k), ruby_value(v)))
                .collect();
            format!("{{ {} }}", pairs.join(", "))
        }
    }
}

/// Single-quoted Ruby literal.
fn ruby_string(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}
