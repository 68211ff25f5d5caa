mod cli;
mod commands;
mod config;

use anyhow::Result;
use bitdef::DefinitionStore;
use clap::Parser;
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::*;
use commands::decode::Source;

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "bitdef=warn,bitdef_cli=warn",
        1 => "bitdef=info,bitdef_cli=info",
        _ => "bitdef=debug,bitdef_cli=debug",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("BITDEF_LOG").unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Commands::Configure {
        store_dir,
        file_name,
        show,
    } = cli.command
    {
        return commands::configure::handle(store_dir, file_name, show);
    }

    let store = match cli.store {
        Some(path) => DefinitionStore::at(path),
        None => DefinitionStore::new(&Config::load()?.store_config()),
    };
    tracing::debug!(path = %store.path().display(), "using definitions file");

    match cli.command {
        Commands::Decode {
            value,
            file,
            def,
            name,
            save,
            log,
        } => {
            let source = match (&file, &def) {
                (Some(path), _) => Source::Declaration(path),
                (None, Some(def)) => Source::Stored(def),
                (None, None) => unreachable!("clap requires --file or --def"),
            };
            commands::decode::handle(store, &value, source, name.as_deref(), save, log)?;
        }

        Commands::Parse { file } => {
            commands::def::inspect(&file)?;
        }

        Commands::Def { command } => match command {
            DefCommand::Save { file, name } => {
                commands::def::save(&store, &file, name.as_deref())?;
            }
            DefCommand::List => commands::def::list(&store)?,
            DefCommand::Show { name } => commands::def::show(&store, &name)?,
            DefCommand::Delete { names } => commands::def::delete(&store, &names)?,
            DefCommand::Clear => commands::def::clear(&store)?,
        },

        Commands::Configure { .. } => unreachable!(), // Handled above before opening the store
    }

    Ok(())
}
