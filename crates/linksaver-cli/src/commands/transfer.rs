//! Export and import command handlers

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use linksaver_core::{transfer, Store};

use crate::output::Output;

/// Export all links and folders as a JSON document
pub fn export(store: &Store, file: Option<PathBuf>, output: &Output) -> Result<()> {
    let doc = store.export();
    let json = doc.to_json().context("Failed to serialize export")?;

    match file {
        Some(path) => {
            fs::write(&path, &json)
                .with_context(|| format!("Failed to write export to {:?}", path))?;
            output.success(&format!(
                "Exported {} link(s) and {} folder(s) to {}",
                doc.links.len(),
                doc.folders.as_ref().map(|f| f.len()).unwrap_or(0),
                path.display()
            ));
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Import links and folders from an export file
pub fn import(store: &mut Store, file: PathBuf, output: &Output) -> Result<()> {
    let json =
        fs::read_to_string(&file).with_context(|| format!("Failed to read {:?}", file))?;

    let doc = transfer::parse_document(&json)
        .with_context(|| format!("Invalid export document: {:?}", file))?;

    let summary = store.import(doc).context("Failed to import")?;

    output.success(&format!(
        "Imported {} new link(s) and {} new folder(s)",
        summary.links_added, summary.folders_added
    ));
    if output.is_quiet() {
        println!("{}", summary.links_added);
    }
    Ok(())
}
