//! Page metadata fetching
//!
//! Fetches the title and favicon from a URL when saving a link.

use anyhow::Result;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

/// Metadata extracted from a page
#[derive(Debug, Clone, Default)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub favicon: Option<String>,
}

/// Fetch timeout in seconds
const FETCH_TIMEOUT: u64 = 10;

/// Fetch metadata from a URL (async)
///
/// Returns empty metadata on failure (graceful degradation).
pub async fn fetch_metadata(url: &str) -> PageMetadata {
    fetch_metadata_inner(url).await.unwrap_or_default()
}

/// Inner fetch function that can fail
async fn fetch_metadata_inner(url: &str) -> Result<PageMetadata> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT))
        .user_agent("Mozilla/5.0 (compatible; LinkSaver/1.0)")
        .build()?;

    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Ok(PageMetadata::default());
    }

    let html = response.text().await?;
    Ok(parse_metadata(&html, url))
}

/// Parse metadata from HTML content
fn parse_metadata(html: &str, base_url: &str) -> PageMetadata {
    let document = Html::parse_document(html);

    PageMetadata {
        title: extract_title(&document),
        favicon: extract_favicon(&document, base_url),
    }
}

/// Extract title from HTML
fn extract_title(document: &Html) -> Option<String> {
    // Try og:title first
    if let Some(og_title) = extract_meta_content(document, "og:title") {
        return Some(og_title);
    }

    // Try twitter:title
    if let Some(twitter_title) = extract_meta_content(document, "twitter:title") {
        return Some(twitter_title);
    }

    // Fall back to <title> tag
    let selector = Selector::parse("title").ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extract favicon URL, resolved against the page URL
fn extract_favicon(document: &Html, base_url: &str) -> Option<String> {
    let selector = Selector::parse(r#"link[rel~="icon"]"#).ok()?;
    let href = document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("href"))?;

    let base = Url::parse(base_url).ok()?;
    base.join(href).ok().map(|u| u.to_string())
}

/// Extract content from a meta property tag
fn extract_meta_content(document: &Html, property: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[property="{}"]"#, property)).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_title_tag() {
        let html = "<html><head><title>Page Title</title></head></html>";
        let meta = parse_metadata(html, "https://example.com/page");
        assert_eq!(meta.title.as_deref(), Some("Page Title"));
    }

    #[test]
    fn test_og_title_wins() {
        let html = r#"<html><head>
            <meta property="og:title" content="OG Title" />
            <title>Plain Title</title>
        </head></html>"#;
        let meta = parse_metadata(html, "https://example.com");
        assert_eq!(meta.title.as_deref(), Some("OG Title"));
    }

    #[test]
    fn test_favicon_resolved_against_base() {
        let html = r#"<html><head>
            <link rel="icon" href="/static/favicon.ico" />
        </head></html>"#;
        let meta = parse_metadata(html, "https://example.com/deep/page");
        assert_eq!(
            meta.favicon.as_deref(),
            Some("https://example.com/static/favicon.ico")
        );
    }

    #[test]
    fn test_absolute_favicon_kept() {
        let html = r#"<html><head>
            <link rel="icon" href="https://cdn.example.com/fav.png" />
        </head></html>"#;
        let meta = parse_metadata(html, "https://example.com");
        assert_eq!(
            meta.favicon.as_deref(),
            Some("https://cdn.example.com/fav.png")
        );
    }

    #[test]
    fn test_missing_metadata() {
        let meta = parse_metadata("<html><body>nothing here</body></html>", "https://x.example");
        assert!(meta.title.is_none());
        assert!(meta.favicon.is_none());
    }
}
