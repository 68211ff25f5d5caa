//! Stored definition CLI definitions

use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum DefCommand {
    /// Parse a declaration file and store it
    Save {
        /// Declaration file ("-" reads stdin)
        file: PathBuf,

        /// Name to store under (defaults to the name after the closing brace)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List stored definitions
    List,

    /// Show the fields and bit positions of a stored definition
    Show {
        /// Definition name
        name: String,
    },

    /// Delete stored definitions
    Delete {
        /// Definition names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Delete every stored definition
    Clear,
}
