//! Rules-text processing: tags to anchors, inline markdown, escaping.

mod anchors;
mod escape;
mod markdown;
mod tag_renderer;

pub use anchors::{
    extract_anchors, lookup_from_attributes, HOVER_NAME, HOVER_SOURCE, HOVER_TYPE,
    LEGACY_TOOLTIP_NAME, LEGACY_TOOLTIP_SOURCE, LEGACY_TOOLTIP_TYPE,
};
pub use escape::{escape_html, escape_preserving_tags, unescape_html};
pub use markdown::apply_inline_markdown;
pub use tag_renderer::{RenderMode, TagRenderer};
