//! Feed construction: from a fetched HTML page to a serialized RSS channel.
//!
//! The module is organized into two submodules:
//!
//! - [`pipeline`] - item node enumeration, field extraction, the inclusion
//!   rule, and serial content augmentation
//! - [`assemble`] - page-level metadata derivation and `rss::Channel`
//!   construction/serialization
//!
//! Item order in the output always mirrors document order of the matched
//! item nodes — feed order reflects page order, not recency.

mod assemble;
mod pipeline;

pub use assemble::{build_channel, page_meta, to_xml, PageMeta};
pub use pipeline::{generate, PipelineError};

use chrono::{DateTime, Utc};

/// Generator identifier written into the channel.
pub const GENERATOR: &str = "pagefeed";

/// Per-item transient record produced by field extraction.
///
/// String fields may be empty ("field not present"); optional dates are
/// absent when no parseable value was found. `content` starts out equal to
/// the description and is replaced only by successful augmentation.
#[derive(Debug, Clone)]
pub struct ExtractedFields {
    pub title: String,
    pub description: String,
    /// Absolute URL, or empty when the item carries no resolvable link.
    pub link: String,
    pub creator: String,
    pub pub_date: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub image_url: String,
    pub content: String,
}

/// A finalized feed entry with every fallback applied.
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub title: String,
    pub body: String,
    /// Never empty: the resolved item link, or the site origin.
    pub url: String,
    pub author: Option<String>,
    /// Always present: pubDate, else modified date, else "now".
    pub date: DateTime<Utc>,
    pub image: Option<String>,
}

impl FeedItem {
    /// Finalizes extracted fields into a feed entry.
    ///
    /// Applies the defaulting rules: "Untitled" for a missing title, the
    /// content/description/placeholder chain for the body, the site origin
    /// for a missing link, and the `pub_date -> modified -> now` chain for
    /// the publish instant.
    pub fn from_extracted(fields: ExtractedFields, site_url: &str, now: DateTime<Utc>) -> Self {
        let ExtractedFields {
            title,
            description,
            link,
            creator,
            pub_date,
            modified,
            image_url,
            content,
        } = fields;

        let body = if !content.is_empty() {
            content
        } else if !description.is_empty() {
            description
        } else {
            "No description available".to_string()
        };

        Self {
            title: if title.is_empty() {
                "Untitled".to_string()
            } else {
                title
            },
            body,
            url: if link.is_empty() {
                site_url.to_string()
            } else {
                link
            },
            author: if creator.is_empty() { None } else { Some(creator) },
            date: pub_date.or(modified).unwrap_or(now),
            image: if image_url.is_empty() {
                None
            } else {
                Some(image_url)
            },
        }
    }
}
