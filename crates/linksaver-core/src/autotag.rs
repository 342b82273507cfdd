//! Automatic tag derivation
//!
//! A pure, table-driven tagger: a fixed domain table plus a handful of
//! title cues. Deterministic and total - unknown domains simply produce
//! no domain tags. Applied on link creation and on import merges.

/// Domain to tags table
const DOMAIN_TAGS: &[(&str, &[&str])] = &[
    ("github.com", &["code", "development"]),
    ("youtube.com", &["video", "learning"]),
    ("medium.com", &["article", "reading"]),
    ("stackoverflow.com", &["code", "help"]),
    ("linkedin.com", &["career", "networking"]),
    ("twitter.com", &["social", "news"]),
    ("reddit.com", &["discussion", "social"]),
    ("docs.google.com", &["document", "work"]),
    ("notion.so", &["notes", "productivity"]),
    ("figma.com", &["design", "ui"]),
];

/// Title substring cues: any of the needles adds the tag
const TITLE_CUES: &[(&[&str], &str)] = &[
    (&["tutorial", "guide"], "tutorial"),
    (&["job", "career"], "jobs"),
    (&["api", "docs"], "documentation"),
];

/// Derive tags from a link's domain and title
///
/// Returns the union of domain-table tags and title-cue tags, with
/// duplicates removed in first-seen order.
pub fn tags_for(domain: &str, title: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    let title_lower = title.to_lowercase();

    if let Some((_, domain_tags)) = DOMAIN_TAGS.iter().find(|(d, _)| *d == domain) {
        for tag in *domain_tags {
            push_unique(&mut tags, tag);
        }
    }

    for (needles, tag) in TITLE_CUES {
        if needles.iter().any(|n| title_lower.contains(n)) {
            push_unique(&mut tags, tag);
        }
    }

    if title_lower.contains("news") || domain.contains("news") {
        push_unique(&mut tags, "news");
    }

    tags
}

fn push_unique(tags: &mut Vec<String>, tag: &str) {
    if !tags.iter().any(|t| t == tag) {
        tags.push(tag.to_string());
    }
}

/// Merge extra tags into a tag list, skipping empties and duplicates
pub fn merge_tags(tags: &mut Vec<String>, extra: impl IntoIterator<Item = String>) {
    for tag in extra {
        let tag = tag.trim();
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
}
