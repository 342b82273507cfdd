//! Folder command handlers

use anyhow::{bail, Context, Result};

use linksaver_core::Store;

use crate::output::Output;

/// Create a folder
pub fn create(
    store: &mut Store,
    name: String,
    description: Option<String>,
    color: Option<String>,
    output: &Output,
) -> Result<()> {
    let folder = store
        .create_folder(name, description, color)
        .context("Failed to create folder")?;

    output.success(&format!("Created folder: {} ({})", folder.name, folder.id));
    Ok(())
}

/// List folders with their link counts
pub fn list(store: &Store, output: &Output) -> Result<()> {
    let folders: Vec<_> = store
        .folders()
        .iter()
        .map(|folder| {
            let count = store
                .links()
                .iter()
                .filter(|l| l.folder_id.as_deref() == Some(folder.id.as_str()))
                .count();
            (folder, count)
        })
        .collect();

    output.print_folders(&folders);
    Ok(())
}

/// Delete a folder; its member links become unfiled
pub fn delete(store: &mut Store, id: String, output: &Output) -> Result<()> {
    let id = resolve_folder_id(store, &id)?;
    let (folder, unfiled) = store
        .delete_folder(&id)
        .context("Failed to delete folder")?;

    output.success(&format!(
        "Deleted folder '{}' ({} link(s) unfiled)",
        folder.name, unfiled
    ));
    Ok(())
}

/// Resolve a folder id from a full id, unique id prefix, or exact name
pub fn resolve_folder_id(store: &Store, id_or_name: &str) -> Result<String> {
    if store.get_folder(id_or_name).is_some() {
        return Ok(id_or_name.to_string());
    }

    if let Some(folder) = store.folders().iter().find(|f| f.name == id_or_name) {
        return Ok(folder.id.clone());
    }

    let matches: Vec<_> = store
        .folders()
        .iter()
        .filter(|f| f.id.starts_with(id_or_name))
        .collect();

    match matches.len() {
        0 => bail!("No folder found matching: {}", id_or_name),
        1 => Ok(matches[0].id.clone()),
        _ => {
            eprintln!("Multiple folders match '{}':", id_or_name);
            for folder in &matches {
                eprintln!("  {} - {}", folder.id, folder.name);
            }
            bail!("Ambiguous folder. Please provide more characters.");
        }
    }
}
