//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use linksaver_core::{Folder, Link, TagCount};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print a single link with full details
    pub fn print_link(&self, link: &Link) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:       {}", link.id);
                println!("Title:    {}", link.title);
                println!("URL:      {}", link.url);
                println!("Domain:   {}", link.domain);
                if !link.note.is_empty() {
                    println!("Note:     {}", link.note);
                }
                if !link.tags.is_empty() {
                    println!("Tags:     {}", link.tags.join(", "));
                }
                if let Some(ref folder_id) = link.folder_id {
                    println!("Folder:   {}", folder_id);
                }
                println!("Saved:    {}", link.saved_at.format("%Y-%m-%d %H:%M"));
                println!("Visits:   {}", link.visit_count);
                if link.favorite {
                    println!("Favorite: yes");
                }
                if link.pinned {
                    println!("Pinned:   yes");
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(link).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", link.id);
            }
        }
    }

    /// Print a list of links
    pub fn print_links(&self, links: &[Link]) {
        match self.format {
            OutputFormat::Human => {
                if links.is_empty() {
                    println!("No links found.");
                    return;
                }
                for link in links {
                    let mut markers = String::new();
                    if link.favorite {
                        markers.push('*');
                    }
                    if link.pinned {
                        markers.push('!');
                    }
                    println!(
                        "{} |{:>2} | {} | {}",
                        short_id(&link.id),
                        markers,
                        truncate(&link.title, 35),
                        truncate(&link.url, 45)
                    );
                }
                println!("\n{} link(s)", links.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(links).unwrap());
            }
            OutputFormat::Quiet => {
                for link in links {
                    println!("{}", link.id);
                }
            }
        }
    }

    /// Print a list of folders with per-folder link counts
    pub fn print_folders(&self, folders: &[(&Folder, usize)]) {
        match self.format {
            OutputFormat::Human => {
                if folders.is_empty() {
                    println!("No folders.");
                    return;
                }
                for (folder, count) in folders {
                    let desc = folder
                        .description
                        .as_deref()
                        .map(|d| format!(" - {}", d))
                        .unwrap_or_default();
                    println!(
                        "{} | {} ({} link(s)){}",
                        short_id(&folder.id),
                        folder.name,
                        count,
                        desc
                    );
                }
                println!("\n{} folder(s)", folders.len());
            }
            OutputFormat::Json => {
                let json: Vec<_> = folders
                    .iter()
                    .map(|(folder, count)| {
                        serde_json::json!({
                            "id": folder.id,
                            "name": folder.name,
                            "description": folder.description,
                            "color": folder.color,
                            "linkCount": count,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&json).unwrap());
            }
            OutputFormat::Quiet => {
                for (folder, _) in folders {
                    println!("{}", folder.id);
                }
            }
        }
    }

    /// Print the tag cloud
    pub fn print_tags(&self, tags: &[TagCount]) {
        match self.format {
            OutputFormat::Human => {
                if tags.is_empty() {
                    println!("No tags found.");
                    return;
                }
                for tag in tags {
                    println!("{} ({})", tag.name, tag.count);
                }
                println!("\n{} tag(s)", tags.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(tags).unwrap());
            }
            OutputFormat::Quiet => {
                for tag in tags {
                    println!("{}", tag.name);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }
}

/// First eight characters of an id (imported ids may be shorter)
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
