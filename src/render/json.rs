use super::{Render, RenderError};
use crate::core::NegativeControl;

/// Pretty-printed JSON array, one object per control.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl Render for JsonRenderer {
    fn render(&self, controls: &[NegativeControl]) -> Result<String, RenderError> {
        let mut out = serde_json::to_string_pretty(controls)?;
        out.push('\n');
        Ok(out)
    }
}
