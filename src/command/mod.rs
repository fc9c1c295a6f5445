//! Commands, options and parsed input
//!
//! A command owns a compiled pattern, an option registry, completion
//! handlers and an action. It parses argv into `ParsedInput`, runs its
//! action, and predicts completions for a partly typed argv.

pub mod command;
pub mod complete;
pub mod handler;
pub mod help;
pub mod input;
pub mod option;

// Re-export main types
pub use command::*;
pub use handler::*;
pub use help::*;
pub use input::*;
pub use option::*;
