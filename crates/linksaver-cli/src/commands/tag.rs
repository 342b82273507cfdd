//! Tag command handlers

use anyhow::Result;

use linksaver_core::Store;

use crate::output::Output;

/// Show the tag cloud: most-used tags first
pub fn cloud(store: &Store, limit: usize, output: &Output) -> Result<()> {
    let tags = store.popular_tags(limit);
    output.print_tags(&tags);
    Ok(())
}
