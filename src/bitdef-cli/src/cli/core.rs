//! Core CLI definitions

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use super::def::DefCommand;

#[derive(Parser)]
#[command(name = "bitdef")]
#[command(about = "Decode numbers with bitfield struct definitions", long_about = None)]
pub struct Cli {
    /// Definitions file to use instead of the configured one
    #[arg(long, global = true, env = "BITDEF_STORE")]
    pub store: Option<PathBuf>,

    /// More log output (-v for info, -vv for debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode a number into the fields of a definition
    #[command(visible_alias = "d")]
    Decode {
        /// Number to decode (hex if it has a-f letters or a 0x prefix, else decimal)
        value: String,

        /// Declaration file to decode with ("-" reads stdin)
        #[arg(short, long, conflicts_with = "def", required_unless_present = "def")]
        file: Option<PathBuf>,

        /// Stored definition to decode with
        #[arg(short, long)]
        def: Option<String>,

        /// Definition name (defaults to the name after the closing brace)
        #[arg(short, long)]
        name: Option<String>,

        /// Also store the declaration under its name
        #[arg(long, requires = "file")]
        save: bool,

        /// Print the session log after decoding
        #[arg(long)]
        log: bool,
    },

    /// Show how a declaration file is parsed, without storing it
    #[command(visible_alias = "p")]
    Parse {
        /// Declaration file ("-" reads stdin)
        file: PathBuf,
    },

    /// Stored definition operations (save, list, show, delete, clear)
    #[command(visible_alias = "f")]
    Def {
        #[command(subcommand)]
        command: DefCommand,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Directory for the definitions file
        #[arg(long)]
        store_dir: Option<PathBuf>,

        /// Definitions file name
        #[arg(long)]
        file_name: Option<String>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_decode_requires_a_source() {
        assert!(Cli::try_parse_from(["bitdef", "decode", "0xA3"]).is_err());
        assert!(Cli::try_parse_from(["bitdef", "decode", "0xA3", "--def", "Flags"]).is_ok());
    }

    #[test]
    fn test_decode_sources_conflict() {
        let result =
            Cli::try_parse_from(["bitdef", "decode", "1", "--def", "a", "--file", "x.h"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_save_requires_file() {
        let result = Cli::try_parse_from(["bitdef", "decode", "1", "--def", "a", "--save"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_store_option() {
        let cli = Cli::try_parse_from(["bitdef", "def", "list", "--store", "defs.json", "-vv"])
            .unwrap();
        assert_eq!(cli.store, Some(PathBuf::from("defs.json")));
        assert_eq!(cli.verbose, 2);
    }
}
