//! HTML to readable text

use scraper::{ElementRef, Html, Node, Selector};

/// Tags whose entire subtree is ignored
const SKIP_TAGS: [&str; 7] = [
    "script", "style", "noscript", "svg", "nav", "footer", "header",
];

/// Boilerplate phrases stripped from scraped medical pages
const NOISE_PHRASES: [&str; 6] = [
    "Cookie Policy",
    "Privacy Policy",
    "Terms of Service",
    "Subscribe to our newsletter",
    "Share on Facebook",
    "Share on Twitter",
];

/// Extract readable text from HTML, stripping tags, scripts, and styles
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);

    // Try to use <body>, fall back to the whole document
    let body = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next());
    let root = body.unwrap_or_else(|| document.root_element());

    let raw = collect_element_text(root).join(" ");
    clean_whitespace(&raw)
}

/// Page text with common site boilerplate removed
pub fn medical_page_text(html: &str) -> String {
    let mut text = html_to_text(html);
    for phrase in NOISE_PHRASES {
        text = text.replace(phrase, "");
    }
    clean_whitespace(&text)
}

/// Contents of the `<title>` element, if any
pub fn page_title(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;
    let title = document
        .select(&selector)
        .next()?
        .text()
        .collect::<String>();
    let title = title.split_whitespace().collect::<Vec<_>>().join(" ");
    (!title.is_empty()).then_some(title)
}

/// Recursively collect text from an element, skipping [`SKIP_TAGS`] subtrees
fn collect_element_text(element: ElementRef) -> Vec<String> {
    if SKIP_TAGS.contains(&element.value().name()) {
        return Vec::new();
    }

    let mut parts = Vec::new();
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let t = text.trim();
                if !t.is_empty() {
                    parts.push(t.to_string());
                }
            }
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    parts.extend(collect_element_text(child_el));
                }
            }
            _ => {}
        }
    }
    parts
}

/// Collapse runs of whitespace, keeping at most one blank line
pub(crate) fn clean_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_was_whitespace = false;
    let mut newline_count = 0;

    for ch in text.chars() {
        if ch == '\n' {
            newline_count += 1;
            if newline_count <= 2 {
                result.push('\n');
            }
            prev_was_whitespace = true;
        } else if ch.is_whitespace() {
            if !prev_was_whitespace {
                result.push(' ');
            }
            prev_was_whitespace = true;
            newline_count = 0;
        } else {
            result.push(ch);
            prev_was_whitespace = false;
            newline_count = 0;
        }
    }

    result.trim().to_string()
}
