//! pagefeed — turn any HTML page into an RSS feed.
//!
//! The service fetches a target page, locates repeating item elements with a
//! user-supplied CSS selector, extracts typed fields from each (title,
//! description, link, author, dates, image), optionally augments items with
//! content fetched from their own detail pages, and assembles the result
//! into an RSS channel. Items appear in document order; an item is included
//! iff its title or description extracted non-empty text.

pub mod config;
pub mod content;
pub mod extract;
pub mod feed;
pub mod fetch;
pub mod server;
