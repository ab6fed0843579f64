//! Negative-coverage rules.
//!
//! Pure functions over a parsed resource set and a platform catalog. Each
//! returns the controls for its half of the catalog:
//!
//! - `unmatched`: catalog types with no instance in state
//! - `matched`: state types, minus the instances state declares

pub mod matched;
pub mod unmatched;

pub use matched::analyze_matched;
pub use unmatched::analyze_unmatched;
