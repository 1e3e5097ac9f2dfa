use url::Url;

/// Resolves a possibly-relative URL against a base URL.
///
/// Absolute candidates pass through (normalized by the `url` crate);
/// relative candidates are joined against the base. If the base cannot be
/// parsed or the join fails, the original candidate string is returned
/// unmodified — callers must tolerate a possibly-unresolved URL downstream.
pub fn resolve(candidate: &str, base: &str) -> String {
    match Url::parse(base).and_then(|b| b.join(candidate)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => candidate.to_string(),
    }
}
