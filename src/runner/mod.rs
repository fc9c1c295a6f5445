//! Shell execution for manifest commands
//!
//! This module handles `${var}` interpolation and running `run` and
//! completion commands through the configured interpreter.

pub mod command;
pub mod context;
pub mod interpolate;

// Re-export main types
pub use command::*;
pub use context::*;
pub use interpolate::*;
