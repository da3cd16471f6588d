//! Reference anchor attributes.

use regex_lite::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use lorelink_domain::{EntityKind, ReferenceLookup};

use super::escape::unescape_html;

pub const HOVER_TYPE: &str = "data-hover-type";
pub const HOVER_NAME: &str = "data-hover-name";
pub const HOVER_SOURCE: &str = "data-hover-source";

// Older content marks anchors with `data-tooltip-*`
pub const LEGACY_TOOLTIP_TYPE: &str = "data-tooltip-type";
pub const LEGACY_TOOLTIP_NAME: &str = "data-tooltip-name";
pub const LEGACY_TOOLTIP_SOURCE: &str = "data-tooltip-source";

static OPEN_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[A-Za-z][^>]*>").expect("valid regex"));
static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(data-(?:hover|tooltip)-(?:type|name|source))="([^"]*)""#).expect("valid regex")
});

/// Read a lookup from anchor attributes, preferring `data-hover-*`.
///
/// Returns `None` when the type or name is missing or the type is unknown.
pub fn lookup_from_attributes<F>(attribute: F) -> Option<ReferenceLookup>
where
    F: Fn(&str) -> Option<String>,
{
    let read = |current: &str, legacy: &str| {
        attribute(current)
            .or_else(|| attribute(legacy))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    let kind = EntityKind::from_tag_name(&read(HOVER_TYPE, LEGACY_TOOLTIP_TYPE)?)?;
    let lookup = ReferenceLookup::new(kind, read(HOVER_NAME, LEGACY_TOOLTIP_NAME)?).ok()?;
    Some(match read(HOVER_SOURCE, LEGACY_TOOLTIP_SOURCE) {
        Some(source) => lookup.with_source(source),
        None => lookup,
    })
}

/// Every anchor in rendered HTML, in document order.
pub fn extract_anchors(html: &str) -> Vec<ReferenceLookup> {
    OPEN_TAG_RE
        .find_iter(html)
        .filter_map(|open_tag| {
            let attributes: HashMap<&str, String> = ATTRIBUTE_RE
                .captures_iter(open_tag.as_str())
                .filter_map(|caps| {
                    let name = caps.get(1)?.as_str();
                    let value = caps.get(2)?.as_str();
                    Some((name, unescape_html(value)))
                })
                .collect();
            if attributes.is_empty() {
                return None;
            }
            lookup_from_attributes(|name| attributes.get(name).cloned())
        })
        .collect()
}
