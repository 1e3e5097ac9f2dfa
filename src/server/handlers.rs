//! Request handlers mapping HTTP requests onto the pipeline.

use axum::{
    extract::{Host, OriginalUri, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use tracing::error;

use crate::config::{FeedQuery, SelectorConfig, DEFAULT_TARGET_URL};
use crate::feed;

use super::types::{ErrorResponse, HealthResponse};

/// Shared application state: the pooled HTTP client.
#[derive(Clone)]
pub struct AppState {
    pub client: reqwest::Client,
}

/// `GET /rss` — run the pipeline and return the serialized feed.
///
/// The response is all-or-nothing: on any fatal pipeline failure a 500 JSON
/// error payload is returned and nothing is partially emitted.
pub async fn rss(
    State(state): State<AppState>,
    Host(host): Host,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<FeedQuery>,
) -> Response {
    let config = match SelectorConfig::from_query(&query) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Rejected feed request");
            return error_response(e.to_string());
        }
    };

    // The feed's self-referencing URL is the inbound request's own URL, an
    // external input independent of the target page.
    let self_url = format!("http://{}{}", host, uri);

    let channel = match feed::generate(&state.client, &config, &self_url).await {
        Ok(channel) => channel,
        Err(e) => {
            error!(error = %e, url = %config.target, "Error generating RSS feed");
            return error_response(e.to_string());
        }
    };

    match feed::to_xml(&channel) {
        Ok(xml) => (
            [(header::CONTENT_TYPE, "application/rss+xml; charset=utf-8")],
            xml,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to serialize feed");
            error_response(e.to_string())
        }
    }
}

fn error_response(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::feed_generation(message)),
    )
        .into_response()
}

/// `GET /health` — liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// `GET /` — service self-documentation.
pub async fn docs() -> impl IntoResponse {
    Json(json!({
        "name": "pagefeed",
        "description": "Transform any HTML page into an RSS feed",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/rss": {
                "method": "GET",
                "description": "Generate RSS feed from HTML page",
                "parameters": {
                    "url": format!("Target URL to scrape (default: {DEFAULT_TARGET_URL})"),
                    "item": "CSS selector for post items (default: .post)",
                    "title": "CSS selector for post titles (default: .post-title)",
                    "description": "CSS selector for post descriptions (default: .paragraph-intro)",
                    "link": "CSS selector for post links (default: .post-link)",
                    "pubDate": "CSS selector for publish dates (default: .publish-date time)",
                    "image": "CSS selector for featured images (default: .featured-image)",
                    "modified": "CSS selector for modified dates (default: .modified-date time)",
                    "content": "CSS selector for full content (default: .post-content)",
                    "creator": "CSS selector for authors (default: .author-date a)",
                    "fetchContent": "Set to \"true\" to fetch full article content (default: false)",
                },
                "example": "/rss?url=https://example.com/blog&item=.article&title=h2&description=.excerpt",
            }
        }
    }))
}
