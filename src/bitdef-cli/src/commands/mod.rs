//! Command handlers for bitdef CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod configure;
pub mod decode;
pub mod def;
