//! Feed-level metadata derivation and RSS channel assembly.

use super::{FeedItem, GENERATOR};
use chrono::{DateTime, Utc};
use rss::extension::atom::{AtomExtension, Link};
use rss::{Channel, Enclosure, Guid, Item};
use scraper::{Html, Selector};

/// Feed-level metadata derived from the target page.
#[derive(Debug, Clone)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub language: String,
}

/// First non-empty trimmed text matched by a selector.
fn first_text(doc: &Html, selector: &str) -> Option<String> {
    let parsed = Selector::parse(selector).ok()?;
    doc.select(&parsed)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// `content` attribute of the first element matched by a selector.
fn meta_content(doc: &Html, selector: &str) -> Option<String> {
    let parsed = Selector::parse(selector).ok()?;
    doc.select(&parsed)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Derives feed-level metadata from the parsed page.
///
/// Title comes from `<title>`, else the first `<h1>`, else a generic label.
/// Description comes from the standard description meta tag, else the Open
/// Graph one, else a generic label. Language comes from the root element's
/// `lang` attribute, defaulting to `en`.
pub fn page_meta(doc: &Html) -> PageMeta {
    let title = first_text(doc, "title")
        .or_else(|| first_text(doc, "h1"))
        .unwrap_or_else(|| "RSS Feed".to_string());

    let description = meta_content(doc, r#"meta[name="description"]"#)
        .or_else(|| meta_content(doc, r#"meta[property="og:description"]"#))
        .unwrap_or_else(|| "Generated RSS feed from HTML page".to_string());

    let language = doc
        .root_element()
        .value()
        .attr("lang")
        .map(str::to_string)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "en".to_string());

    PageMeta {
        title,
        description,
        language,
    }
}

/// Assembles the RSS channel.
///
/// Items are appended in the order given — document order of the matched
/// item nodes — with no re-sorting by date or any other key. The feed's
/// self-referencing URL comes from the inbound request (`self_url`), not
/// from the target page.
pub fn build_channel(
    meta: PageMeta,
    items: Vec<FeedItem>,
    site_url: &str,
    self_url: &str,
    now: DateTime<Utc>,
) -> Channel {
    let mut self_link = Link::default();
    self_link.set_rel("self");
    self_link.set_href(self_url);
    self_link.set_mime_type(Some("application/rss+xml".to_string()));

    let mut atom_ext = AtomExtension::default();
    atom_ext.set_links(vec![self_link]);

    let mut channel = Channel::default();
    channel.set_title(meta.title);
    channel.set_link(site_url.to_string());
    channel.set_description(meta.description);
    channel.set_language(Some(meta.language));
    channel.set_generator(Some(GENERATOR.to_string()));
    channel.set_pub_date(Some(now.to_rfc2822()));
    channel.set_last_build_date(Some(now.to_rfc2822()));
    channel.set_atom_ext(Some(atom_ext));
    channel.set_items(items.into_iter().map(rss_item).collect::<Vec<_>>());
    channel
}

fn rss_item(item: FeedItem) -> Item {
    let mut guid = Guid::default();
    guid.set_value(item.url.clone());
    guid.set_permalink(true);

    let mut out = Item::default();
    out.set_title(Some(item.title));
    out.set_description(Some(item.body));
    out.set_link(Some(item.url));
    out.set_author(item.author);
    out.set_pub_date(Some(item.date.to_rfc2822()));
    out.set_guid(Some(guid));

    if let Some(image) = item.image {
        let mut enclosure = Enclosure::default();
        enclosure.set_mime_type(image_mime_type(&image));
        enclosure.set_length("0".to_string());
        enclosure.set_url(image);
        out.set_enclosure(Some(enclosure));
    }

    out
}

/// Best-effort MIME type for an enclosure, from the URL's file extension.
fn image_mime_type(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let ext = path.rsplit('.').next().map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
    .to_string()
}

/// Serializes the channel as indented XML with a document declaration.
pub fn to_xml(channel: &Channel) -> Result<String, rss::Error> {
    let buf = channel.pretty_write_to(Vec::new(), b' ', 2)?;
    Ok(format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}",
        String::from_utf8_lossy(&buf)
    ))
}
