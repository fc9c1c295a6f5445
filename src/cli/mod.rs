//! Routing, shell completion and the binary's application
//!
//! This module holds the `Cli` router, the helpers behind the shell
//! completion protocol, and the manifest-driven application.

pub mod app;
pub mod router;
pub mod script;
pub mod shell;

// Re-export main types
pub use app::*;
pub use router::*;
pub use script::*;
pub use shell::*;
