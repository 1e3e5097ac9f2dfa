//! The extraction-and-assembly pipeline.
//!
//! One request is one linear flow: fetch the target page, enumerate item
//! nodes, extract typed fields per node, optionally augment each qualifying
//! item with content from its detail page (serially, in document order), and
//! assemble the channel. The parsed document and the item views borrowed
//! from it live only inside this flow and are discarded before assembly.

use super::assemble::{build_channel, page_meta};
use super::{ExtractedFields, FeedItem};
use crate::config::SelectorConfig;
use crate::content;
use crate::extract::{extract_date, extract_link, extract_text};
use crate::fetch::{fetch_page, FetchError, MAX_PAGE_SIZE, PRIMARY_TIMEOUT};
use chrono::Utc;
use rss::Channel;
use scraper::{Html, Selector};
use thiserror::Error;

/// Errors that are fatal to a feed request.
///
/// Everything else in the pipeline degrades gracefully: bad field selectors
/// behave as "no match", unresolvable URLs pass through unresolved, and
/// augmentation failures fall back to the extracted description.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The item selector could not be parsed as CSS, so no items can be
    /// located at all.
    #[error("Invalid item selector '{0}'")]
    InvalidItemSelector(String),
    /// The primary page fetch failed; nothing is partially emitted.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Runs the full pipeline for one request and returns the assembled channel.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `config` - Per-request selector configuration
/// * `self_url` - The inbound request's own URL, used as the feed's
///   self-referencing link
///
/// # Errors
///
/// Returns [`PipelineError`] when the primary fetch fails or the item
/// selector is invalid. Per-item problems never fail the request.
pub async fn generate(
    client: &reqwest::Client,
    config: &SelectorConfig,
    self_url: &str,
) -> Result<Channel, PipelineError> {
    tracing::info!(url = %config.target, "Fetching target page");
    let body = fetch_page(client, config.target.as_str(), PRIMARY_TIMEOUT, MAX_PAGE_SIZE).await?;

    let site_url = config.site_url();

    // The parsed document is confined to this block: all extraction happens
    // synchronously, and only owned field records cross the await points of
    // the augmentation loop below.
    let (meta, extracted) = {
        let doc = Html::parse_document(&body);
        let meta = page_meta(&doc);
        let extracted = extract_items(&doc, config, &site_url)?;
        (meta, extracted)
    };

    let now = Utc::now();
    let mut items = Vec::with_capacity(extracted.len());
    for mut fields in extracted {
        if config.fetch_content && !config.content.is_empty() && !fields.link.is_empty() {
            if let Some(markup) = content::augment(client, &fields.link, &config.content).await {
                fields.content = markup;
            }
        }
        items.push(FeedItem::from_extracted(fields, &site_url, now));
    }

    Ok(build_channel(meta, items, &site_url, self_url, now))
}

/// Enumerates item nodes in document order and extracts fields from each.
///
/// Applies the inclusion rule: a node qualifies iff its extracted title or
/// description is non-empty after trimming. Skipped nodes are silent.
fn extract_items(
    doc: &Html,
    config: &SelectorConfig,
    site_url: &str,
) -> Result<Vec<ExtractedFields>, PipelineError> {
    let item_selector = Selector::parse(&config.item)
        .map_err(|_| PipelineError::InvalidItemSelector(config.item.clone()))?;

    let nodes: Vec<_> = doc.select(&item_selector).collect();
    tracing::info!(found = nodes.len(), selector = %config.item, "Matched item nodes");

    let mut extracted = Vec::new();
    for node in nodes {
        let title = extract_text(node, &config.title);
        let description = extract_text(node, &config.description);

        if title.is_empty() && description.is_empty() {
            continue;
        }

        extracted.push(ExtractedFields {
            link: extract_link(node, &config.link, site_url),
            creator: extract_text(node, &config.creator),
            pub_date: extract_date(node, &config.pub_date),
            modified: extract_date(node, &config.modified),
            image_url: extract_link(node, &config.image, site_url),
            content: description.clone(),
            title,
            description,
        });
    }

    Ok(extracted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeedQuery;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn config_for(target: &str) -> SelectorConfig {
        let query = FeedQuery {
            url: target.to_string(),
            ..FeedQuery::default()
        };
        SelectorConfig::from_query(&query).unwrap()
    }

    const PAGE: &str = r#"<html lang="en"><head><title>Blog</title></head><body>
        <div class="post">
            <h2 class="post-title">First</h2>
            <p class="paragraph-intro">Intro one</p>
            <a class="post-link" href="/posts/first">read</a>
            <span class="publish-date"><time datetime="2024-03-15T10:30:00Z">Mar 15</time></span>
        </div>
        <div class="post">
            <h2 class="post-title">Second</h2>
            <p class="paragraph-intro">Intro two</p>
        </div>
        <div class="post"><span class="unrelated">no title, no description</span></div>
    </body></html>"#;

    #[test]
    fn test_extract_items_applies_inclusion_rule() {
        let config = config_for("https://example.com/blog");
        let doc = Html::parse_document(PAGE);
        let items = extract_items(&doc, &config, "https://example.com").unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "First");
        assert_eq!(items[0].description, "Intro one");
        assert_eq!(items[0].link, "https://example.com/posts/first");
        assert_eq!(
            items[0].pub_date,
            Some(Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap())
        );
        assert_eq!(items[1].title, "Second");
        assert_eq!(items[1].link, "");
        assert_eq!(items[1].pub_date, None);
    }

    #[test]
    fn test_extract_items_preserves_document_order() {
        let config = config_for("https://example.com/blog");
        let doc = Html::parse_document(PAGE);
        let items = extract_items(&doc, &config, "https://example.com").unwrap();
        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }

    #[test]
    fn test_content_starts_as_description() {
        let config = config_for("https://example.com/blog");
        let doc = Html::parse_document(PAGE);
        let items = extract_items(&doc, &config, "https://example.com").unwrap();
        assert_eq!(items[0].content, items[0].description);
    }

    #[test]
    fn test_invalid_item_selector_is_fatal() {
        let mut config = config_for("https://example.com/blog");
        config.item = "[[[".to_string();
        let doc = Html::parse_document(PAGE);
        let err = extract_items(&doc, &config, "https://example.com").unwrap_err();
        assert!(matches!(err, PipelineError::InvalidItemSelector(_)));
    }
}
