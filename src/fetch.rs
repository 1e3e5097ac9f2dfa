//! HTTP page fetching.
//!
//! One fetch, one outcome: there is no retry policy at any level. A failed
//! primary fetch is fatal to the request; the secondary content fetch in
//! [`crate::content`] reuses this module with a shorter deadline and recovers
//! locally.

use futures::StreamExt;
use std::time::Duration;
use thiserror::Error;

/// Identifying user-agent sent with every outbound request.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (compatible; pagefeed/1.0; +https://github.com/pagefeed/pagefeed)";

/// Deadline for the primary page fetch.
pub const PRIMARY_TIMEOUT: Duration = Duration::from_secs(10);

/// Response body cap for the primary page fetch.
pub const MAX_PAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Errors that can occur while fetching a document.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded its deadline
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),
    /// Response body exceeded the size limit
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
}

/// Fetches a document body as text.
///
/// # Arguments
///
/// * `client` - Shared HTTP client carrying the fixed user-agent
/// * `url` - Document to fetch
/// * `deadline` - Overall deadline for the request
/// * `limit` - Maximum accepted body size in bytes
///
/// # Errors
///
/// Returns [`FetchError`] on network failure, timeout, non-2xx status, or an
/// oversized body. A single failed attempt is final.
pub async fn fetch_page(
    client: &reqwest::Client,
    url: &str,
    deadline: Duration,
    limit: usize,
) -> Result<String, FetchError> {
    let response = tokio::time::timeout(deadline, client.get(url).send())
        .await
        .map_err(|_| FetchError::Timeout(deadline.as_secs()))?
        .map_err(FetchError::Network)?;

    if !response.status().is_success() {
        return Err(FetchError::HttpStatus(response.status().as_u16()));
    }

    let bytes = read_limited_bytes(response, limit).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Reads a response body with a streaming size cap, so an oversized body is
/// rejected without buffering it whole.
async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
