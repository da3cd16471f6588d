//! HTML escaping helpers

use lorelink_domain::parse_reference_tags;

/// Escape text for use in HTML content or a double-quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Escape everything except `{@...}` tags, which are copied verbatim.
///
/// Formatters use this so tags survive until the content is mounted and the
/// tag renderer turns them into anchors (escaping their payloads then).
pub fn escape_preserving_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for tag in parse_reference_tags(text) {
        out.push_str(&escape_html(&text[cursor..tag.start_offset]));
        out.push_str(&text[tag.start_offset..tag.end_offset]);
        cursor = tag.end_offset;
    }
    out.push_str(&escape_html(&text[cursor..]));
    out
}

/// Reverse `escape_html` (plus `&#x27;` and `&apos;`).
pub fn unescape_html(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
