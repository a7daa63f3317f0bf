//! Visible-text extraction from downloaded pages.

use scraper::Html;

const HIDDEN_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// Visible text of an HTML page.
///
/// Text inside `script`, `style`, and `noscript` is dropped, the remaining
/// words are joined with single spaces, and commas are removed.
#[must_use]
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut parts: Vec<&str> = Vec::new();
    for node in document.tree.root().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }
        parts.extend(text.split_whitespace());
    }

    parts.join(" ").replace(',', "")
}
