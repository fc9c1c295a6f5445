//! Argument cursor and option syntax
//!
//! The cursor walks an argv slice one token at a time; option tokens are
//! classified into flags, inline values and combined short flags.

pub mod cursor;
pub mod syntax;

// Re-export main types
pub use cursor::*;
pub use syntax::*;
