//! Stored definition command handlers
//!
//! Save, list, show, delete and clear definitions in the store, plus the
//! `parse` preview which shows a declaration's layout without storing it.

use anyhow::{bail, Context, Result};
use bitdef::{Definition, DefinitionStore};
use std::fmt::Write as _;
use std::path::Path;

use super::decode::read_declaration;

/// Parse a declaration file and store it
pub fn save(store: &DefinitionStore, file: &Path, name: Option<&str>) -> Result<()> {
    let text = read_declaration(file)?;
    let fields = bitdef::parse(bitdef::strip_outer_braces(&text));

    let name = match name {
        Some(name) => name.to_string(),
        None => bitdef::infer_definition_name(&text),
    };
    if name.is_empty() {
        bail!("Could not infer a definition name from {}; pass --name", file.display());
    }
    if fields.is_empty() {
        bail!("No fields found in {}", file.display());
    }

    let replaced = store.load_single(&name).is_some();
    store
        .save(&name, &fields)
        .with_context(|| format!("Failed to save definition to {}", store.path().display()))?;

    let verb = if replaced { "Replaced" } else { "Saved" };
    println!(
        "{} definition '{}' ({} fields, {} bits) in {}",
        verb,
        name,
        fields.len(),
        fields.total_width(),
        store.path().display()
    );
    Ok(())
}

/// List stored definitions
pub fn list(store: &DefinitionStore) -> Result<()> {
    let catalog = store.load();
    if catalog.is_empty() {
        println!("No stored definitions in {}", store.path().display());
        return Ok(());
    }

    let name_width = catalog.names().map(str::len).max().unwrap_or(0);
    for entry in &catalog {
        println!(
            "{:<name_width$}  {:>3} fields  {:>4} bits",
            entry.name,
            entry.fields.len(),
            entry.fields.total_width()
        );
    }
    Ok(())
}

/// Show the layout of a stored definition
pub fn show(store: &DefinitionStore, name: &str) -> Result<()> {
    let Some(fields) = store.load_single(name) else {
        bail!("No stored definition named '{}' in {}", name, store.path().display());
    };

    println!("{} ({} bits)", name, fields.total_width());
    print!("{}", render_layout(&fields));
    Ok(())
}

/// Show how a declaration file is parsed
pub fn inspect(file: &Path) -> Result<()> {
    let text = read_declaration(file)?;
    let name = bitdef::infer_definition_name(&text);
    let fields = bitdef::parse(bitdef::strip_outer_braces(&text));

    if name.is_empty() {
        println!("Name: (none found)");
    } else {
        println!("Name: {}", name);
    }

    if fields.is_empty() {
        println!("No fields found");
        return Ok(());
    }

    println!("{} fields, {} bits", fields.len(), fields.total_width());
    print!("{}", render_layout(&fields));
    Ok(())
}

/// Delete stored definitions
pub fn delete(store: &DefinitionStore, names: &[String]) -> Result<()> {
    let catalog = store.load();
    let (present, missing): (Vec<&String>, Vec<&String>) =
        names.iter().partition(|name| catalog.contains(name));

    for name in &missing {
        println!("No stored definition named '{}'", name);
    }

    if !store.delete(&present) {
        if !present.is_empty() {
            bail!("Failed to update {}", store.path().display());
        }
        return Ok(());
    }

    for name in &present {
        println!("Deleted '{}'", name);
    }
    Ok(())
}

/// Delete every stored definition
pub fn clear(store: &DefinitionStore) -> Result<()> {
    if store.clear() {
        println!("Cleared all definitions in {}", store.path().display());
    } else if store.path().exists() {
        bail!("Failed to clear {}", store.path().display());
    } else {
        println!("Nothing to clear ({} does not exist)", store.path().display());
    }
    Ok(())
}

/// Format fields with the bit range each one occupies
pub fn render_layout(fields: &Definition) -> String {
    let name_width = fields
        .iter()
        .map(|f| f.name().len())
        .max()
        .unwrap_or(0)
        .max("Field".len());

    let mut out = String::new();
    let _ = writeln!(out, "{:<name_width$}  {:>5}  Bits", "Field", "Width");

    let mut offset: u64 = 0;
    for field in fields {
        let width = u64::from(field.width());
        let high = offset + width - 1;
        let bits = if width == 1 {
            offset.to_string()
        } else {
            format!("{}..={}", offset, high)
        };
        let _ = writeln!(out, "{:<name_width$}  {:>5}  {}", field.name(), width, bits);
        offset += width;
    }
    out
}
