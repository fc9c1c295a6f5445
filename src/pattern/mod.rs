//! Command pattern compilation
//!
//! A pattern is a whitespace-separated list of segments. Each segment is
//! tokenized into literals, parameters (`<name>`, `[name]`) and spreads
//! (`<...name>`, `[...name]`), and compiled into a strict matcher used for
//! execution and a partial matcher used for completion.

pub mod segment;
pub mod token;

// Re-export main types
pub use segment::*;
pub use token::*;
