//! Content augmentation: the optional secondary fetch of an item's own
//! detail page, substituting richer body markup for the short description.
//!
//! Augmentation failure is never fatal to the request and never surfaces to
//! the caller — any fetch or parse problem is logged as a warning and the
//! item proceeds with its originally extracted description. Fetches are
//! performed serially by the pipeline, one per item in document order, to
//! keep load on the target site deterministic and bounded.

use crate::fetch::{fetch_page, FetchError};
use scraper::{Html, Selector};
use std::time::Duration;

/// Deadline for the secondary content fetch — shorter than the primary so a
/// slow detail page caps per-item latency rather than the whole request.
pub const CONTENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Response body cap for detail pages.
const MAX_ARTICLE_SIZE: usize = 5 * 1024 * 1024; // 5MB

/// Fetches an item's detail page and extracts the full content markup.
///
/// Returns `Some(markup)` when the fetch succeeds and the content selector
/// matches non-empty inner HTML; `None` in every other case (fetch failure,
/// unparseable selector, no match, empty markup), leaving the caller to keep
/// the original description.
pub async fn augment(client: &reqwest::Client, link: &str, selector: &str) -> Option<String> {
    let body = match fetch_page(client, link, CONTENT_TIMEOUT, MAX_ARTICLE_SIZE).await {
        Ok(body) => body,
        Err(e) => {
            warn_fallback(link, &e);
            return None;
        }
    };

    let parsed = match Selector::parse(selector) {
        Ok(parsed) => parsed,
        Err(_) => {
            tracing::warn!(
                link = %link,
                selector = %selector,
                "Invalid content selector, keeping description"
            );
            return None;
        }
    };

    let doc = Html::parse_document(&body);
    let markup = doc.select(&parsed).next().map(|el| el.inner_html())?;
    let trimmed = markup.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn warn_fallback(link: &str, error: &FetchError) {
    tracing::warn!(
        link = %link,
        error = %error,
        "Failed to fetch full content, keeping description"
    );
}
