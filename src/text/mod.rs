//! Plain-text rendering of the HTML fragments found in article bodies.

use scraper::Html;

/// Elements that start a new line of text
const BLOCK_ELEMENTS: &[&str] = &[
    "p", "br", "div", "li", "blockquote", "pre", "h1", "h2", "h3", "h4", "h5", "h6", "tr",
];

/// Split an HTML fragment into whitespace-collapsed lines, one per block
fn text_lines(html: &str) -> Vec<String> {
    let document = Html::parse_fragment(html);
    let mut text = String::new();

    for node in document.root_element().descendants() {
        if let Some(element) = node.value().as_element() {
            if BLOCK_ELEMENTS.contains(&element.name()) {
                text.push('\n');
            }
        }
        if let Some(text_node) = node.value().as_text() {
            text.push_str(text_node);
        }
    }

    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect()
}

/// Extract plain text from HTML on a single line
pub fn html_to_text(html: &str) -> String {
    text_lines(html).join(" ")
}

/// Extract plain text from HTML, one paragraph per block element
pub fn html_to_paragraphs(html: &str) -> String {
    text_lines(html).join("\n\n")
}

/// Truncate string to at most `max_chars` characters, respecting char boundaries
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
