//! Decode command handler

use anyhow::{bail, Context, Result};
use bitdef::{Decoded, DefinitionStore, Session};
use std::fmt::Write as _;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Where the fields to decode with come from
pub enum Source<'a> {
    /// Declaration text in a file (or stdin for "-")
    Declaration(&'a Path),
    /// Definition already in the store
    Stored(&'a str),
}

/// Read declaration text from a file, or stdin when the path is "-"
pub fn read_declaration(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read declaration from stdin")?;
        return Ok(text);
    }

    fs::read_to_string(path)
        .with_context(|| format!("Failed to read declaration: {}", path.display()))
}

/// Handle the decode command
pub fn handle(
    store: DefinitionStore,
    value: &str,
    source: Source<'_>,
    name: Option<&str>,
    save: bool,
    show_log: bool,
) -> Result<()> {
    let mut session = Session::new(store);
    if let Some(name) = name {
        session.set_name(name);
    }

    match source {
        Source::Declaration(path) => {
            let text = read_declaration(path)?;
            session.set_declaration(&text);
        }
        Source::Stored(def) => {
            session.load(def);
            if session.definition().is_none() {
                bail!(
                    "No stored definition named '{}' in {}",
                    def,
                    session.store().path().display()
                );
            }
        }
    }

    let parsed = bitdef::parse_number(value);
    if let Err(err) = &parsed {
        eprintln!("Warning: {}, decoding 0 instead", err);
    }

    let Some(decoded) = session.apply_number(parsed) else {
        bail!("No fields found in declaration");
    };

    if save {
        if !session.save() {
            bail!(
                "Failed to save definition '{}' to {}",
                session.name(),
                session.store().path().display()
            );
        }
        println!(
            "Saved definition '{}' to {}",
            session.name(),
            session.store().path().display()
        );
    }

    if let Some(definition) = session.definition() {
        let name = if session.name().is_empty() {
            "(unnamed)"
        } else {
            session.name()
        };
        println!(
            "Definition: {} ({} fields, {} bits)",
            name,
            definition.len(),
            definition.total_width()
        );

        let ignored = bitdef::overflow_bits(session.value(), definition.fields());
        if ignored > 0 {
            eprintln!(
                "Warning: value has {} bit(s) above the definition, ignored",
                ignored
            );
        }
    }

    println!("{}", session.value_summary());
    println!();
    print!("{}", render_decoded(&decoded));

    if show_log {
        println!();
        println!("Log:");
        for message in session.log().messages() {
            println!("  {}", message);
        }
    }

    Ok(())
}

/// Format decoded fields as a table
pub fn render_decoded(decoded: &Decoded) -> String {
    let name_width = decoded
        .iter()
        .map(|f| f.name.len())
        .max()
        .unwrap_or(0)
        .max("Field".len());

    let mut out = String::new();
    let _ = writeln!(out, "{:<name_width$}  {:>5}  Value", "Field", "Width");
    for field in decoded {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:>5}  {} (0x{:X})",
            field.name, field.width, field.value, field.value
        );
    }
    out
}
