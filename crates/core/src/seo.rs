//! SEO metadata helpers: extraction from stored raw markup and attribute
//! escaping for composed head tags.
//!
//! Stored page HTML is embedded verbatim at render time (writers to the
//! datastore are trusted), but values interpolated into head tag attributes
//! must still be escaped so a stray quote cannot break the document.

use std::sync::OnceLock;

use regex::Regex;

fn title_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid regex"))
}

fn meta_description_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)<meta\s[^>]*name\s*=\s*["']description["'][^>]*>"#)
            .expect("valid regex")
    })
}

fn content_attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)content\s*=\s*["']([^"']*)["']"#).expect("valid regex")
    })
}

/// Extract the `<title>` text from raw markup, if present and non-empty.
pub fn extract_title(html: &str) -> Option<String> {
    let captures = title_re().captures(html)?;
    let title = captures.get(1)?.as_str().trim();
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

/// Extract the `<meta name="description">` content from raw markup.
///
/// Attribute order within the tag does not matter; the tag is located by its
/// `name` attribute first, then the `content` attribute is pulled out of it.
pub fn extract_meta_description(html: &str) -> Option<String> {
    let tag = meta_description_re().find(html)?.as_str();
    let captures = content_attr_re().captures(tag)?;
    let description = captures.get(1)?.as_str().trim();
    if description.is_empty() {
        None
    } else {
        Some(description.to_string())
    }
}

/// Escape a value for interpolation into an HTML attribute or text node.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
