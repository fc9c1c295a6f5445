//! Manifest parsing and validation
//!
//! This module handles discovery and parsing of argot.yml manifests
//! and validation of the commands they declare.

pub mod parse;
pub mod schema;
pub mod types;

// Re-export main types
pub use parse::*;
pub use schema::*;
pub use types::*;
