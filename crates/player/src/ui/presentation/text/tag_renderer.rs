//! Tag renderer
//!
//! Replaces `{@type payload}` tags with either interactive reference anchors
//! or plain display text. Bytes outside tag spans are copied unchanged.

use lorelink_domain::{
    parse_reference_tags, EntityKind, FormatTag, ReferenceTag, TagType, DEFAULT_SOURCE,
};

use super::anchors::{HOVER_NAME, HOVER_SOURCE, HOVER_TYPE};
use super::escape::escape_html;

/// How reference tags in a piece of text are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Hoverable `<span class="reference-link" data-hover-*>` anchors.
    #[default]
    Tooltip,
    /// Display text only (dropdown options, titles).
    DisplayName,
}

#[derive(Debug, Clone)]
pub struct TagRenderer {
    default_source: String,
}

impl Default for TagRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE)
    }
}

impl TagRenderer {
    /// `default_source` fills `data-hover-source` for tags that name none.
    pub fn new(default_source: impl Into<String>) -> Self {
        Self {
            default_source: default_source.into(),
        }
    }

    pub fn default_source(&self) -> &str {
        &self.default_source
    }

    /// Replace every top-level tag in `text`.
    ///
    /// Text outside tags is not escaped: callers pass HTML (or text they have
    /// already escaped with `escape_preserving_tags`).
    pub fn process_string(&self, text: &str, mode: RenderMode) -> String {
        let tags = parse_reference_tags(text);
        if tags.is_empty() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len() + tags.len() * 64);
        let mut cursor = 0;
        for tag in &tags {
            out.push_str(&text[cursor..tag.start_offset]);
            out.push_str(&self.render_tag(tag, mode));
            cursor = tag.end_offset;
        }
        out.push_str(&text[cursor..]);
        out
    }

    fn render_tag(&self, tag: &ReferenceTag, mode: RenderMode) -> String {
        match tag.tag_type {
            TagType::Reference(kind) => self.render_reference(tag, kind, mode),
            TagType::Format(format) => self.render_format(tag, format, mode),
            TagType::Unknown => {
                tracing::warn!(tag_type = %tag.raw_type, payload = %tag.payload, "Unknown tag type");
                escape_html(tag.display_text())
            }
        }
    }

    fn render_reference(&self, tag: &ReferenceTag, kind: EntityKind, mode: RenderMode) -> String {
        let display = escape_html(tag.display_text());
        if mode == RenderMode::DisplayName || tag.name().is_empty() {
            return display;
        }

        let source = tag
            .source()
            .unwrap_or_else(|| kind.default_source(&self.default_source));
        format!(
            r#"<span class="reference-link" {}="{}" {}="{}" {}="{}">{}</span>"#,
            HOVER_TYPE,
            kind.tag_name(),
            HOVER_NAME,
            escape_html(tag.name()),
            HOVER_SOURCE,
            escape_html(source),
            display
        )
    }

    fn render_format(&self, tag: &ReferenceTag, format: FormatTag, mode: RenderMode) -> String {
        match format {
            FormatTag::Bold => format!("<strong>{}</strong>", self.inner(&tag.payload, mode)),
            FormatTag::Italic => format!("<em>{}</em>", self.inner(&tag.payload, mode)),
            FormatTag::Note => format!(
                r#"<span class="note">{}</span>"#,
                self.inner(&tag.payload, mode)
            ),
            FormatTag::Dice => format!(
                r#"<span class="dice">{}</span>"#,
                escape_html(tag.display_text())
            ),
            FormatTag::Damage => format!(
                r#"<span class="damage">{}</span>"#,
                escape_html(tag.display_text())
            ),
            FormatTag::Hit => {
                let bonus = tag.display_text();
                let signed = if bonus.starts_with('+') || bonus.starts_with('-') {
                    bonus.to_string()
                } else {
                    format!("+{}", bonus)
                };
                format!(r#"<span class="hit">{}</span>"#, escape_html(&signed))
            }
            FormatTag::Dc => format!(
                r#"<span class="dc">DC {}</span>"#,
                escape_html(tag.display_text())
            ),
            FormatTag::QuickRef => format!(
                r#"<span class="quickref">{}</span>"#,
                escape_html(tag.display_text())
            ),
        }
    }

    // Payload text of a wrapping format tag: escaped, with nested tags rendered.
    fn inner(&self, payload: &str, mode: RenderMode) -> String {
        let mut out = String::with_capacity(payload.len());
        let mut cursor = 0;
        for tag in parse_reference_tags(payload) {
            out.push_str(&escape_html(&payload[cursor..tag.start_offset]));
            out.push_str(&self.render_tag(&tag, mode));
            cursor = tag.end_offset;
        }
        out.push_str(&escape_html(&payload[cursor..]));
        out
    }
}
