//! CLI argument definitions for bitdef
//!
//! This module contains all clap-derived structs and enums for CLI parsing.

mod core;
mod def;

pub use core::{Cli, Commands};
pub use def::DefCommand;
