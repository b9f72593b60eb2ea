//! Common Utilities
//!
//! Command-line plumbing shared by every subcommand: argument
//! parsing, terminal colors, and tracing setup.
//!

pub mod args;
pub mod colors;
pub mod logging;
