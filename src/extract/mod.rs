//! Field extraction from parsed HTML item nodes.
//!
//! Each extractor takes an item node (a borrow into the parsed document) and
//! a CSS selector. An empty selector means "the node itself"; a non-empty
//! selector searches descendants and uses the first match only. A missing
//! match is the "field not present" case, never an error.

mod date;
mod url;

pub use date::parse_date;
pub use url::resolve;

use chrono::{DateTime, Utc};
use scraper::{ElementRef, Selector};

/// Locates the element a selector refers to within an item node.
///
/// An empty selector yields the node itself. A selector that fails to parse
/// as CSS behaves like a selector with no matches.
fn target<'a>(node: ElementRef<'a>, selector: &str) -> Option<ElementRef<'a>> {
    if selector.is_empty() {
        return Some(node);
    }
    let parsed = Selector::parse(selector).ok()?;
    node.select(&parsed).next()
}

/// Extracts the trimmed text content of the selected element.
///
/// Returns an empty string when the selector matches nothing.
pub fn extract_text(node: ElementRef<'_>, selector: &str) -> String {
    target(node, selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Extracts a link or image URL from the selected element.
///
/// Prefers an `href` attribute, falling back to `src`, then resolves the
/// value against the page's origin. An element with neither attribute (or an
/// empty one) yields an empty string without any resolution attempt.
pub fn extract_link(node: ElementRef<'_>, selector: &str, base: &str) -> String {
    let Some(el) = target(node, selector) else {
        return String::new();
    };
    let raw = el
        .value()
        .attr("href")
        .or_else(|| el.value().attr("src"))
        .filter(|v| !v.is_empty());
    match raw {
        Some(candidate) => resolve(candidate, base),
        None => String::new(),
    }
}

/// Extracts a date from the selected element.
///
/// Prefers a machine-readable `datetime` attribute over the element's
/// trimmed text. An empty or unparseable value yields `None`.
pub fn extract_date(node: ElementRef<'_>, selector: &str) -> Option<DateTime<Utc>> {
    let el = target(node, selector)?;
    let raw = el
        .value()
        .attr("datetime")
        .map(str::to_string)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| el.text().collect::<String>().trim().to_string());
    parse_date(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use scraper::Html;

    /// Parses a document and runs the test body with its first `.post` node.
    fn with_item<F: FnOnce(ElementRef<'_>)>(html: &str, f: F) {
        let doc = Html::parse_document(html);
        let sel = Selector::parse(".post").unwrap();
        let node = doc.select(&sel).next().expect("fixture has a .post node");
        f(node);
    }

    #[test]
    fn test_text_is_trimmed() {
        with_item(
            r#"<div class="post"><h2 class="title">  Hello World  </h2></div>"#,
            |node| {
                assert_eq!(extract_text(node, ".title"), "Hello World");
            },
        );
    }

    #[test]
    fn test_empty_selector_uses_node_itself() {
        with_item(r#"<div class="post"> direct text </div>"#, |node| {
            assert_eq!(extract_text(node, ""), "direct text");
        });
    }

    #[test]
    fn test_first_match_only() {
        with_item(
            r#"<div class="post"><p class="x">first</p><p class="x">second</p></div>"#,
            |node| {
                assert_eq!(extract_text(node, ".x"), "first");
            },
        );
    }

    #[test]
    fn test_no_match_yields_empty_text() {
        with_item(r#"<div class="post"><p>body</p></div>"#, |node| {
            assert_eq!(extract_text(node, ".missing"), "");
        });
    }

    #[test]
    fn test_invalid_selector_behaves_as_no_match() {
        with_item(r#"<div class="post"><p>body</p></div>"#, |node| {
            assert_eq!(extract_text(node, "[[["), "");
            assert_eq!(extract_link(node, "[[[", "https://example.com"), "");
            assert_eq!(extract_date(node, "[[["), None);
        });
    }

    #[test]
    fn test_link_prefers_href_and_resolves() {
        with_item(
            r#"<div class="post"><a class="link" href="/a/b">read</a></div>"#,
            |node| {
                assert_eq!(
                    extract_link(node, ".link", "https://example.com"),
                    "https://example.com/a/b"
                );
            },
        );
    }

    #[test]
    fn test_link_falls_back_to_src() {
        with_item(
            r#"<div class="post"><img class="pic" src="/img.png"></div>"#,
            |node| {
                assert_eq!(
                    extract_link(node, ".pic", "https://example.com"),
                    "https://example.com/img.png"
                );
            },
        );
    }

    #[test]
    fn test_link_without_attributes_is_empty() {
        with_item(r#"<div class="post"><span class="link">no url</span></div>"#, |node| {
            assert_eq!(extract_link(node, ".link", "https://example.com"), "");
        });
    }

    #[test]
    fn test_absolute_link_passes_through() {
        with_item(
            r#"<div class="post"><a class="link" href="https://other.example/x">x</a></div>"#,
            |node| {
                assert_eq!(
                    extract_link(node, ".link", "https://example.com"),
                    "https://other.example/x"
                );
            },
        );
    }

    #[test]
    fn test_date_prefers_datetime_attribute() {
        with_item(
            r#"<div class="post"><time class="when" datetime="2024-03-15T10:30:00Z">March 15</time></div>"#,
            |node| {
                assert_eq!(
                    extract_date(node, ".when"),
                    Some(Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap())
                );
            },
        );
    }

    #[test]
    fn test_date_falls_back_to_text() {
        with_item(
            r#"<div class="post"><span class="when">2024-03-15</span></div>"#,
            |node| {
                assert_eq!(
                    extract_date(node, ".when"),
                    Some(Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap())
                );
            },
        );
    }

    #[test]
    fn test_unparseable_date_is_absent() {
        with_item(
            r#"<div class="post"><span class="when">a while ago</span></div>"#,
            |node| {
                assert_eq!(extract_date(node, ".when"), None);
            },
        );
    }

    #[test]
    fn test_missing_date_element_is_absent() {
        with_item(r#"<div class="post"><p>no dates here</p></div>"#, |node| {
            assert_eq!(extract_date(node, ".when"), None);
        });
    }
}
