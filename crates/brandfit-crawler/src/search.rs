//! Web search through Bing's RSS output.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::CrawlerError;

/// Build the RSS search URL for `query` under `base_url`.
#[must_use]
pub fn search_url(base_url: &str, query: &str) -> String {
    let encoded = utf8_percent_encode(query, NON_ALPHANUMERIC);
    format!(
        "{}/search?q={encoded}&format=rss&setlang=en&mkt=en-US",
        base_url.trim_end_matches('/')
    )
}

/// Collect up to `limit` result links from an RSS search feed.
///
/// Only `<link>` elements inside `<item>` count; the channel's own link is
/// ignored.
///
/// # Errors
///
/// Returns [`CrawlerError::Xml`] if the feed is not well-formed XML.
pub fn parse_search_links(xml: &str, limit: usize) -> Result<Vec<String>, CrawlerError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut links = Vec::new();
    let mut in_item = false;
    let mut in_link = false;
    let mut link = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"item" => {
                    in_item = true;
                    link.clear();
                }
                b"link" if in_item => in_link = true,
                _ => {}
            },
            Event::Text(e) if in_link => {
                link.push_str(&e.unescape().unwrap_or_default());
            }
            Event::CData(e) if in_link => {
                link.push_str(&String::from_utf8_lossy(e.as_ref()));
            }
            Event::End(e) => match e.name().as_ref() {
                b"link" => in_link = false,
                b"item" if in_item => {
                    in_item = false;
                    let url = link.trim();
                    if !url.is_empty() {
                        links.push(url.to_string());
                        if links.len() >= limit {
                            break;
                        }
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(links)
}
