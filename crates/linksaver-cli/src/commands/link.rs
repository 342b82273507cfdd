//! Link command handlers

use anyhow::{bail, Context, Result};

use linksaver_core::{Category, LinkPatch, NewLink, QuerySpec, SortOrder, Store};

use crate::commands::folder::resolve_folder_id;
use crate::metadata::fetch_metadata;
use crate::output::Output;

/// Save a link, fetching page metadata unless disabled
#[allow(clippy::too_many_arguments)]
pub async fn save(
    store: &mut Store,
    url: String,
    title: Option<String>,
    note: Option<String>,
    tags: Vec<String>,
    folder: Option<String>,
    no_fetch: bool,
    output: &Output,
) -> Result<()> {
    let folder_id = match folder {
        Some(ref f) => Some(resolve_folder_id(store, f)?),
        None => None,
    };

    let fetch = store.config().fetch_metadata && !no_fetch;
    let mut favicon = None;
    let title = match title {
        Some(t) => t,
        None if fetch => {
            let meta = fetch_metadata(&url).await;
            favicon = meta.favicon;
            // Fall back to the URL itself when the page yields no title
            meta.title.unwrap_or_else(|| url.clone())
        }
        None => url.clone(),
    };

    let link = store
        .add_link(NewLink {
            title,
            url,
            favicon,
            note: note.unwrap_or_default(),
            tags,
            folder_id,
        })
        .context("Failed to save link")?;

    output.success(&format!("Saved link: {}", link.id));
    output.print_link(&link);
    Ok(())
}

/// List links through the query engine
#[allow(clippy::too_many_arguments)]
pub fn list(
    store: &Store,
    search: Option<String>,
    favorites: bool,
    pinned: bool,
    recent: bool,
    folder: Option<String>,
    tags: Vec<String>,
    sort: SortOrder,
    output: &Output,
) -> Result<()> {
    let (category, folder_id) = if favorites {
        (Category::Favorites, None)
    } else if pinned {
        (Category::Pinned, None)
    } else if recent {
        (Category::Recent, None)
    } else if let Some(ref f) = folder {
        (Category::Folder, Some(resolve_folder_id(store, f)?))
    } else {
        (Category::All, None)
    };

    let results = store.query(&QuerySpec {
        search_text: search.unwrap_or_default(),
        category,
        folder_id,
        active_tags: tags,
        sort,
    });

    output.print_links(&results);
    Ok(())
}

/// Show a single link
pub fn show(store: &Store, id: String, output: &Output) -> Result<()> {
    let id = resolve_link_id(store, &id)?;
    let link = store
        .get_link(&id)
        .with_context(|| format!("Link not found: {}", id))?;
    output.print_link(link);
    Ok(())
}

/// Open a link in the default browser and record the visit
pub fn open(store: &mut Store, id: String, output: &Output) -> Result<()> {
    let id = resolve_link_id(store, &id)?;
    let url = store
        .get_link(&id)
        .with_context(|| format!("Link not found: {}", id))?
        .url
        .clone();

    open::that(&url).with_context(|| format!("Failed to open {}", url))?;
    let visits = store.record_visit(&id).context("Failed to record visit")?;

    output.success(&format!("Opened {} (visit #{})", url, visits));
    Ok(())
}

/// Edit a link via flags
#[allow(clippy::too_many_arguments)]
pub fn edit(
    store: &mut Store,
    id: String,
    title: Option<String>,
    url: Option<String>,
    note: Option<String>,
    tags: Option<String>,
    folder: Option<String>,
    unfile: bool,
    retag: bool,
    output: &Output,
) -> Result<()> {
    let id = resolve_link_id(store, &id)?;

    let folder_id = if unfile {
        Some(None)
    } else {
        match folder {
            Some(ref f) => Some(Some(resolve_folder_id(store, f)?)),
            None => None,
        }
    };

    let tags = tags.map(|t| {
        t.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    });

    let link = store
        .update_link(
            &id,
            LinkPatch {
                title,
                url,
                note,
                tags,
                folder_id,
                refresh_auto_tags: retag,
            },
        )
        .context("Failed to update link")?;

    output.success("Link updated");
    output.print_link(&link);
    Ok(())
}

/// Move links into a folder, or unfile them
pub fn move_links(
    store: &mut Store,
    ids: Vec<String>,
    folder: Option<String>,
    unfile: bool,
    output: &Output,
) -> Result<()> {
    let folder_id = if unfile {
        None
    } else {
        match folder {
            Some(ref f) => Some(resolve_folder_id(store, f)?),
            None => bail!("Specify --folder <folder> or --unfile"),
        }
    };

    let ids = ids
        .iter()
        .map(|id| resolve_link_id(store, id))
        .collect::<Result<Vec<_>>>()?;

    let moved = store
        .move_links(&ids, folder_id.as_deref())
        .context("Failed to move links")?;

    match folder_id {
        Some(ref f) => output.success(&format!("Moved {} link(s) to folder {}", moved, f)),
        None => output.success(&format!("Unfiled {} link(s)", moved)),
    }
    Ok(())
}

/// Delete a link
pub fn delete(store: &mut Store, id: String, output: &Output) -> Result<()> {
    let id = resolve_link_id(store, &id)?;
    let link = store
        .get_link(&id)
        .with_context(|| format!("Link not found: {}", id))?;

    if output.should_prompt() {
        println!(
            "Delete link: {} - {}",
            crate::output::short_id(&link.id),
            link.title
        );
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.delete_link(&id).context("Failed to delete link")?;
    output.success(&format!("Deleted link: {}", id));
    Ok(())
}

/// Toggle the favorite flag
pub fn favorite(store: &mut Store, id: String, output: &Output) -> Result<()> {
    let id = resolve_link_id(store, &id)?;
    let now_favorite = store
        .toggle_favorite(&id)
        .context("Failed to toggle favorite")?;

    if now_favorite {
        output.success(&format!("Marked favorite: {}", id));
    } else {
        output.success(&format!("Unmarked favorite: {}", id));
    }
    Ok(())
}

/// Toggle the pinned flag
pub fn pin(store: &mut Store, id: String, output: &Output) -> Result<()> {
    let id = resolve_link_id(store, &id)?;
    let now_pinned = store.toggle_pin(&id).context("Failed to toggle pin")?;

    if now_pinned {
        output.success(&format!("Pinned: {}", id));
    } else {
        output.success(&format!("Unpinned: {}", id));
    }
    Ok(())
}

/// Resolve a link id from a full id or unique prefix
fn resolve_link_id(store: &Store, id: &str) -> Result<String> {
    if store.get_link(id).is_some() {
        return Ok(id.to_string());
    }

    let matches: Vec<_> = store
        .links()
        .iter()
        .filter(|l| l.id.starts_with(id))
        .collect();

    match matches.len() {
        0 => bail!("No link found matching: {}", id),
        1 => Ok(matches[0].id.clone()),
        _ => {
            eprintln!("Multiple links match '{}':", id);
            for link in &matches {
                eprintln!("  {} - {}", link.id, link.title);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}

/// Ask a yes/no question on stdin
fn confirm(prompt: &str) -> Result<bool> {
    use std::io::{self, Write};

    print!("{} [y/N]: ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}
