//! Process and per-request configuration.
//!
//! [`ServerConfig`] is the only process-wide state: the listening port,
//! passed explicitly to the server bootstrap rather than read ambiently.
//! [`SelectorConfig`] is built once per request from query parameters, with
//! hard-coded defaults for every selector, and is immutable for the duration
//! of that request.

use serde::Deserialize;
use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

/// Default target page when no `url` query parameter is supplied.
pub const DEFAULT_TARGET_URL: &str = "https://install.doctor/blog";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid target URL '{url}': {source}")]
    InvalidTargetUrl {
        url: String,
        source: url::ParseError,
    },
}

/// Process-wide server configuration.
#[derive(Debug, Clone, Copy)]
pub struct ServerConfig {
    /// Port to listen on (all interfaces).
    pub port: u16,
}

impl ServerConfig {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

/// Raw `/rss` query parameters.
///
/// All fields use `#[serde(default)]` so any subset of parameters can be
/// specified; missing ones fall back to the defaults below. Parameter names
/// mirror the query string (`pubDate`, `fetchContent`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedQuery {
    pub url: String,
    pub item: String,
    pub title: String,
    pub description: String,
    pub link: String,
    #[serde(rename = "pubDate")]
    pub pub_date: String,
    pub image: String,
    pub modified: String,
    pub content: String,
    pub creator: String,
    /// Augmentation runs only when this is exactly the string `"true"`.
    #[serde(rename = "fetchContent")]
    pub fetch_content: String,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            url: DEFAULT_TARGET_URL.to_string(),
            item: ".post".to_string(),
            title: ".post-title".to_string(),
            description: ".paragraph-intro".to_string(),
            link: ".post-link".to_string(),
            pub_date: ".publish-date time".to_string(),
            image: ".featured-image".to_string(),
            modified: ".modified-date time".to_string(),
            content: ".post-content".to_string(),
            creator: ".author-date a".to_string(),
            fetch_content: String::new(),
        }
    }
}

/// Validated per-request extraction configuration.
#[derive(Debug, Clone)]
pub struct SelectorConfig {
    /// The page to convert into a feed.
    pub target: Url,
    pub item: String,
    pub title: String,
    pub description: String,
    pub link: String,
    pub pub_date: String,
    pub image: String,
    pub modified: String,
    pub content: String,
    pub creator: String,
    /// Whether to fetch each item's detail page for full content.
    pub fetch_content: bool,
}

impl SelectorConfig {
    /// Builds the request configuration from query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTargetUrl`] when the `url` parameter is
    /// not an absolute URL — the one input that cannot degrade gracefully.
    pub fn from_query(query: &FeedQuery) -> Result<Self, ConfigError> {
        let target = Url::parse(&query.url).map_err(|source| ConfigError::InvalidTargetUrl {
            url: query.url.clone(),
            source,
        })?;

        Ok(Self {
            target,
            item: query.item.clone(),
            title: query.title.clone(),
            description: query.description.clone(),
            link: query.link.clone(),
            pub_date: query.pub_date.clone(),
            image: query.image.clone(),
            modified: query.modified.clone(),
            content: query.content.clone(),
            creator: query.creator.clone(),
            fetch_content: query.fetch_content == "true",
        })
    }

    /// The target page's origin, e.g. `https://example.com`.
    ///
    /// Used as the base for relative link resolution and as the fallback
    /// item URL.
    pub fn site_url(&self) -> String {
        self.target.origin().ascii_serialization()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_query_defaults() {
        let query = FeedQuery::default();
        assert_eq!(query.url, DEFAULT_TARGET_URL);
        assert_eq!(query.item, ".post");
        assert_eq!(query.title, ".post-title");
        assert_eq!(query.pub_date, ".publish-date time");
        assert_eq!(query.fetch_content, "");
    }

    #[test]
    fn test_fetch_content_requires_exact_true() {
        let mut query = FeedQuery::default();
        for value in ["", "false", "TRUE", "True", "1", "yes"] {
            query.fetch_content = value.to_string();
            let config = SelectorConfig::from_query(&query).unwrap();
            assert!(
                !config.fetch_content,
                "{value:?} should not enable augmentation"
            );
        }

        query.fetch_content = "true".to_string();
        let config = SelectorConfig::from_query(&query).unwrap();
        assert!(config.fetch_content);
    }

    #[test]
    fn test_invalid_target_url_is_an_error() {
        let query = FeedQuery {
            url: "not a url".to_string(),
            ..FeedQuery::default()
        };
        let err = SelectorConfig::from_query(&query).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTargetUrl { .. }));
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn test_site_url_is_origin() {
        let query = FeedQuery {
            url: "https://example.com/blog/page/2?tag=rust".to_string(),
            ..FeedQuery::default()
        };
        let config = SelectorConfig::from_query(&query).unwrap();
        assert_eq!(config.site_url(), "https://example.com");
    }

    #[test]
    fn test_server_addr_binds_all_interfaces() {
        let config = ServerConfig { port: 3000 };
        assert_eq!(config.addr().to_string(), "0.0.0.0:3000");
    }
}
