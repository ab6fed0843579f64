//! State snapshot parsers.
//!
//! The generator only sees the `ResourceParser` trait; `tfstate` is the default
//! implementation for Terraform state files.

pub mod tfstate;

use serde_json::Value;
use thiserror::Error;

use super::resources::ParsedResourceSet;

pub use tfstate::TerraformStateParser;

/// A snapshot that could not be turned into a `ParsedResourceSet`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected} at {path}")]
    UnexpectedShape { path: String, expected: &'static str },
    #[error("unsupported state format: {0}")]
    UnsupportedFormat(String),
}

/// Turns an opaque state snapshot into resources grouped by type.
pub trait ResourceParser: Sync {
    fn parse_resources(
        &self,
        snapshot: &Value,
        platform: &str,
    ) -> Result<ParsedResourceSet, ParseError>;
}
