//! Control renderers.
//!
//! Controls say what to assert; a renderer decides how it is written down.
//! Renderers are selected through `Renderer`, dispatched with `enum_dispatch`.

mod inspec;
mod json;

use clap::ValueEnum;
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::NegativeControl;

pub use inspec::InspecRenderer;
pub use json::JsonRenderer;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialize controls: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// InSpec control files (Ruby)
    #[default]
    Inspec,
    /// JSON array of control records
    Json,
}

#[enum_dispatch]
pub trait Render {
    /// Render a batch of controls as one document.
    fn render(&self, controls: &[NegativeControl]) -> Result<String, RenderError>;
}

#[enum_dispatch(Render)]
#[derive(Debug, Clone, Copy)]
pub enum Renderer {
    Inspec(InspecRenderer),
    Json(JsonRenderer),
}

impl From<OutputFormat> for Renderer {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Inspec => Renderer::Inspec(InspecRenderer),
            OutputFormat::Json => Renderer::Json(JsonRenderer),
        }
    }
}
