//! Bounded rendering of nested rules text.

use lorelink_domain::{Entry, EntryBlock};
use serde_json::Value;

use crate::ui::presentation::text::{escape_html, escape_preserving_tags};

/// Caps that keep popups short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryLimits {
    pub top_level: usize,
    pub depth: usize,
    pub list_items: usize,
    pub table_rows: usize,
}

impl Default for EntryLimits {
    fn default() -> Self {
        Self {
            top_level: 6,
            depth: 3,
            list_items: 8,
            table_rows: 10,
        }
    }
}

/// Render rules text inside a `stat-block__entries` container.
///
/// Returns an empty string when nothing renders.
pub fn render_entries(entries: &[Entry], limits: &EntryLimits) -> String {
    let body: String = entries
        .iter()
        .take(limits.top_level)
        .map(|entry| render_entry(entry, 0, limits))
        .collect();
    if body.is_empty() {
        return String::new();
    }
    let more = if entries.len() > limits.top_level {
        r#"<p class="stat-block__more">…</p>"#
    } else {
        ""
    };
    format!(r#"<div class="stat-block__entries">{}{}</div>"#, body, more)
}

fn render_entry(entry: &Entry, depth: usize, limits: &EntryLimits) -> String {
    if depth > limits.depth {
        return String::new();
    }
    match entry {
        Entry::Text(text) => format!("<p>{}</p>", escape_preserving_tags(text)),
        Entry::Block(block) => render_block(block, depth, limits),
        Entry::Other(_) => String::new(),
    }
}

fn render_block(block: &EntryBlock, depth: usize, limits: &EntryLimits) -> String {
    match block.block_type.as_deref() {
        Some("list") => render_list(block, depth, limits),
        Some("table") => render_table(block, limits),
        Some("quote") => {
            let body = render_children(&block.entries, depth, limits);
            let by = block
                .by
                .as_deref()
                .map(|by| format!(r#"<p class="quote-by">— {}</p>"#, escape_preserving_tags(by)))
                .unwrap_or_default();
            format!("<blockquote>{}{}</blockquote>", body, by)
        }
        Some("item") | Some("itemSub") => {
            let name = block
                .name
                .as_deref()
                .map(|name| format!("<strong>{}</strong> ", escape_preserving_tags(name)))
                .unwrap_or_default();
            let text = match &block.entry {
                Some(entry) => inline_text(entry),
                None => block.entries.iter().map(inline_text).collect::<Vec<_>>().join(" "),
            };
            format!("<p>{}{}</p>", name, text)
        }
        _ => {
            // entries, section, inset, insetReadaloud, variant, ... and unknown
            // shapes that still carry nested entries
            let body = render_children(&block.entries, depth, limits);
            match block.name.as_deref() {
                Some(name) if !body.is_empty() => format!(
                    r#"<div class="entry-section"><p class="entry-title"><strong>{}.</strong></p>{}</div>"#,
                    escape_preserving_tags(name),
                    body
                ),
                _ => body,
            }
        }
    }
}

fn render_children(entries: &[Entry], depth: usize, limits: &EntryLimits) -> String {
    entries
        .iter()
        .map(|entry| render_entry(entry, depth + 1, limits))
        .collect()
}

fn render_list(block: &EntryBlock, depth: usize, limits: &EntryLimits) -> String {
    let items: String = block
        .items
        .iter()
        .take(limits.list_items)
        .map(|item| {
            let html = match item {
                Entry::Text(text) => escape_preserving_tags(text),
                other => render_entry(other, depth + 1, limits),
            };
            format!("<li>{}</li>", html)
        })
        .collect();
    let more = if block.items.len() > limits.list_items {
        "<li>…</li>"
    } else {
        ""
    };
    format!("<ul>{}{}</ul>", items, more)
}

fn render_table(block: &EntryBlock, limits: &EntryLimits) -> String {
    let mut out = String::from(r#"<table class="stat-block__table">"#);
    if let Some(caption) = &block.caption {
        out.push_str(&format!("<caption>{}</caption>", escape_preserving_tags(caption)));
    }
    if !block.col_labels.is_empty() {
        out.push_str("<tr>");
        for label in &block.col_labels {
            out.push_str(&format!("<th>{}</th>", escape_preserving_tags(label)));
        }
        out.push_str("</tr>");
    }
    for row in block.rows.iter().take(limits.table_rows) {
        out.push_str("<tr>");
        for cell in row {
            out.push_str(&format!("<td>{}</td>", cell_text(cell)));
        }
        out.push_str("</tr>");
    }
    out.push_str("</table>");
    out
}

fn inline_text(entry: &Entry) -> String {
    match entry {
        Entry::Text(text) => escape_preserving_tags(text),
        Entry::Block(block) => block
            .entries
            .iter()
            .map(inline_text)
            .collect::<Vec<_>>()
            .join(" "),
        Entry::Other(value) => cell_text(value),
    }
}

fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(text) => escape_preserving_tags(text),
        Value::Number(n) => n.to_string(),
        Value::Object(obj) => {
            // Roll cells: {"type": "cell", "roll": {"min": 1, "max": 5}} or {"exact": 6}
            let roll = obj.get("roll");
            let exact = roll.and_then(|r| r.get("exact")).and_then(Value::as_i64);
            let min = roll.and_then(|r| r.get("min")).and_then(Value::as_i64);
            let max = roll.and_then(|r| r.get("max")).and_then(Value::as_i64);
            match (exact, min, max) {
                (Some(exact), _, _) => exact.to_string(),
                (None, Some(min), Some(max)) => format!("{}–{}", min, max),
                _ => obj
                    .get("entry")
                    .and_then(Value::as_str)
                    .map(escape_preserving_tags)
                    .unwrap_or_default(),
            }
        }
        _ => escape_html(&cell.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entries(raw: Value) -> Vec<Entry> {
        serde_json::from_value(raw).expect("entries")
    }

    #[test]
    fn top_level_entries_are_capped() {
        let list: Vec<Entry> = (1..=9).map(|i| Entry::text(format!("line {}", i))).collect();
        let html = render_entries(&list, &EntryLimits::default());
        assert!(html.contains("line 6"));
        assert!(!html.contains("line 7"));
        assert!(html.contains("stat-block__more"));
    }

    #[test]
    fn list_items_are_capped() {
        let items: Vec<String> = (1..=12).map(|i| format!("item {}", i)).collect();
        let html = render_entries(
            &entries(json!([{"type": "list", "items": items}])),
            &EntryLimits::default(),
        );
        assert_eq!(html.matches("<li>").count(), 9);
        assert!(html.contains("item 8"));
        assert!(!html.contains("item 9<"));
    }

    #[test]
    fn depth_is_bounded() {
        let raw = json!([{"type": "entries", "name": "One", "entries": [
            {"type": "entries", "name": "Two", "entries": [
                {"type": "entries", "name": "Three", "entries": [
                    "deep text",
                    {"type": "entries", "name": "Four", "entries": ["too deep"]}
                ]}
            ]}
        ]}]);
        let html = render_entries(&entries(raw), &EntryLimits::default());
        assert!(html.contains("<strong>Two.</strong>"));
        assert!(!html.contains("too deep"));
        assert!(!html.contains("Four"));
    }

    #[test]
    fn tables_render_capped_rows() {
        let rows: Vec<Value> = (1..=15).map(|i| json!([i, format!("result {}", i)])).collect();
        let raw = json!([{"type": "table", "caption": "Wild Magic", "colLabels": ["d100", "Effect"], "rows": rows}]);
        let html = render_entries(&entries(raw), &EntryLimits::default());
        assert!(html.contains("<caption>Wild Magic</caption>"));
        assert!(html.contains("<th>d100</th>"));
        assert!(html.contains("result 10"));
        assert!(!html.contains("result 11"));
    }

    #[test]
    fn roll_cells_and_unknown_blocks() {
        let raw = json!([
            {"type": "table", "rows": [[{"type": "cell", "roll": {"min": 1, "max": 5}}, "Nothing"]]},
            {"type": "image", "href": {"path": "x.png"}},
            42
        ]);
        let html = render_entries(&entries(raw), &EntryLimits::default());
        assert!(html.contains("<td>1–5</td>"));
        assert!(!html.contains("x.png"));
    }

    #[test]
    fn empty_entries_render_nothing() {
        assert_eq!(render_entries(&[], &EntryLimits::default()), "");
    }
}
