//! negcov - negative-coverage control generator
//!
//! negcov reads infrastructure state (Terraform state files) and a catalog of the
//! resource types a compliance framework can enumerate per platform, and emits
//! controls asserting that no *unexpected* resources exist: catalog types with
//! no instance in state must be empty, and present types must hold nothing
//! beyond the instances state declares.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Data model, catalogs, state parsing and qualifier resolution
//! - `generator`: The parse-then-analyze pipeline
//! - `render`: Control renderers (InSpec, JSON)
//! - `rules`: Unmatched and matched resource analysis

pub mod cli;
pub mod config;
pub mod core;
pub mod generator;
pub mod render;
pub mod rules;
