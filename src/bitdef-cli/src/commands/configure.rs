//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting where definitions are stored.

use crate::config::Config;
use anyhow::Result;
use std::path::PathBuf;

/// Handle the configure command
///
/// # Arguments
/// * `store_dir` - Optional directory for the definitions file
/// * `file_name` - Optional definitions file name
/// * `show` - If true, show current configuration
pub fn handle(store_dir: Option<PathBuf>, file_name: Option<String>, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if store_dir.is_none() && file_name.is_none() {
        show_usage();
        return Ok(());
    }

    if let Some(dir) = store_dir {
        config.set_store_dir(dir);
    }
    if let Some(name) = file_name {
        config.set_file_name(name);
    }
    config.save()?;

    println!(
        "Definitions file: {}",
        config.store_config().path().display()
    );
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Display current configuration
fn show_config(config: &Config) {
    print!("{}", render_config(config));
}

fn render_config(config: &Config) -> String {
    let mut out = format!("Definitions file: {}\n", config.store_config().path().display());
    if let Ok(path) = Config::config_path() {
        out.push_str(&format!("Config file: {}\n", path.display()));
    }
    out
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: bitdef configure --store-dir DIR [--file-name NAME]");
    println!("   or: bitdef configure --show");
    println!();
    println!("Note: --store (or BITDEF_STORE) overrides the configured file for one run.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_render_default_config() {
        let rendered = render_config(&Config::default());
        let expected = Path::new("config").join("data_define.json");
        assert!(rendered.starts_with(&format!("Definitions file: {}\n", expected.display())));
    }

    #[test]
    fn test_render_configured_store() {
        let mut config = Config::default();
        config.set_store_dir(PathBuf::from("/tmp/defs"));
        config.set_file_name("errors.json".to_string());

        let rendered = render_config(&config);
        let expected = Path::new("/tmp/defs").join("errors.json");
        assert!(rendered.contains(&format!("Definitions file: {}", expected.display())));
    }
}
