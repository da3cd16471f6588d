//! Embedded reference tag parsing
//!
//! Rules text embeds references and inline formatting as `{@type payload}`
//! tags. The payload is pipe-separated: segment 0 is the display / lookup
//! name, segment 1 is usually the source book, and later segments carry
//! tag-specific extras. Payloads may themselves contain tags, so closing
//! braces are matched by depth.
//!
//! # Example
//!
//! ```
//! use lorelink_domain::{parse_reference_tags, EntityKind, TagType};
//!
//! let text = "You can cast {@spell fireball|PHB} at will.";
//! let tags = parse_reference_tags(text);
//!
//! assert_eq!(tags.len(), 1);
//! assert_eq!(tags[0].tag_type, TagType::Reference(EntityKind::Spell));
//! assert_eq!(tags[0].name(), "fireball");
//! assert_eq!(tags[0].source(), Some("PHB"));
//! assert_eq!(&text[tags[0].start_offset..tags[0].end_offset], "{@spell fireball|PHB}");
//! ```

use serde::{Deserialize, Serialize};

use super::lookup::ReferenceLookup;
use crate::entities::EntityKind;

/// Inline formatting tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatTag {
    Note,
    Bold,
    Italic,
    Dice,
    Damage,
    /// Attack bonus (`{@hit 5}` renders "+5")
    Hit,
    /// Save DC (`{@dc 15}` renders "DC 15")
    Dc,
    QuickRef,
}

impl FormatTag {
    pub fn from_tag_name(name: &str) -> Option<Self> {
        let tag = match name.to_ascii_lowercase().as_str() {
            "note" => FormatTag::Note,
            "b" | "bold" => FormatTag::Bold,
            "i" | "italic" => FormatTag::Italic,
            "dice" => FormatTag::Dice,
            "damage" => FormatTag::Damage,
            "hit" => FormatTag::Hit,
            "dc" => FormatTag::Dc,
            "quickref" => FormatTag::QuickRef,
            _ => return None,
        };
        Some(tag)
    }
}

/// What a tag's type name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagType {
    /// A reference to an entity of the given kind.
    Reference(EntityKind),
    /// Inline formatting.
    Format(FormatTag),
    /// A tag type this system does not understand.
    Unknown,
}

impl TagType {
    pub fn classify(raw_type: &str) -> Self {
        if let Some(format) = FormatTag::from_tag_name(raw_type) {
            TagType::Format(format)
        } else if let Some(kind) = EntityKind::from_tag_name(raw_type) {
            TagType::Reference(kind)
        } else {
            TagType::Unknown
        }
    }
}

/// A parsed `{@type payload}` occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceTag {
    /// The type name as written (`spell`, `b`, `classFeature`, ...)
    pub raw_type: String,

    pub tag_type: TagType,

    /// Everything between the type name and the closing brace
    pub payload: String,

    /// Payload split on top-level pipes
    pub segments: Vec<String>,

    /// Byte offset of the opening brace
    pub start_offset: usize,

    /// Byte offset just past the closing brace
    pub end_offset: usize,
}

impl ReferenceTag {
    /// Segment 0, trimmed: the lookup name and default display text.
    pub fn name(&self) -> &str {
        self.segments.first().map(|s| s.trim()).unwrap_or("")
    }

    /// Text shown in place of the tag.
    pub fn display_text(&self) -> &str {
        self.name()
    }

    /// The source book, if the tag names one.
    pub fn source(&self) -> Option<&str> {
        self.segment(self.source_segment_index())
    }

    /// A non-empty, trimmed segment.
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments
            .get(index)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    pub fn kind(&self) -> Option<EntityKind> {
        match self.tag_type {
            TagType::Reference(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_reference(&self) -> bool {
        self.kind().is_some()
    }

    /// The lookup this tag asks for, if it is a reference with a name.
    pub fn lookup(&self) -> Option<ReferenceLookup> {
        let kind = self.kind()?;
        let lookup = ReferenceLookup::new(kind, self.name()).ok()?;
        Some(match self.source() {
            Some(source) => lookup.with_source(source),
            None => lookup,
        })
    }

    /// Length of the tag in bytes
    pub fn len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Class features are written `name|className|classSource|level|source`.
    fn source_segment_index(&self) -> usize {
        match self.kind() {
            Some(EntityKind::ClassFeature) => 4,
            _ => 1,
        }
    }
}

/// Quick check for whether text contains anything tag-shaped.
pub fn contains_tags(text: &str) -> bool {
    text.contains("{@")
}

/// Parse all top-level tags in `text`, in order.
///
/// Tags nested inside a payload are not returned separately; parse the
/// payload again to reach them. Unclosed tags are left as literal text.
pub fn parse_reference_tags(text: &str) -> Vec<ReferenceTag> {
    let bytes = text.as_bytes();
    let mut tags = Vec::new();
    let mut pos = 0;

    while let Some(rel) = text[pos..].find("{@") {
        let start = pos + rel;
        match parse_tag_at(text, bytes, start) {
            Some(tag) => {
                pos = tag.end_offset;
                tags.push(tag);
            }
            None => pos = start + 2,
        }
    }

    tags
}

fn parse_tag_at(text: &str, bytes: &[u8], start: usize) -> Option<ReferenceTag> {
    let type_start = start + 2;
    let mut idx = type_start;
    while idx < bytes.len() && !bytes[idx].is_ascii_whitespace() && bytes[idx] != b'}' {
        if bytes[idx] == b'{' {
            return None;
        }
        idx += 1;
    }
    if idx == type_start || idx >= bytes.len() {
        return None;
    }
    let raw_type = &text[type_start..idx];

    // `{@b}` style: no payload
    if bytes[idx] == b'}' {
        return Some(build_tag(raw_type, "", start, idx + 1));
    }

    let payload_start = idx + 1;
    let mut depth = 1usize;
    let mut cursor = payload_start;
    while cursor < bytes.len() {
        match bytes[cursor] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    let payload = &text[payload_start..cursor];
                    return Some(build_tag(raw_type, payload, start, cursor + 1));
                }
            }
            _ => {}
        }
        cursor += 1;
    }

    None
}

fn build_tag(raw_type: &str, payload: &str, start: usize, end: usize) -> ReferenceTag {
    ReferenceTag {
        raw_type: raw_type.to_string(),
        tag_type: TagType::classify(raw_type),
        payload: payload.to_string(),
        segments: split_segments(payload),
        start_offset: start,
        end_offset: end,
    }
}

/// Split a payload on pipes that are not inside a nested tag.
pub fn split_segments(payload: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();

    for ch in payload.chars() {
        match ch {
            '{' => {
                depth += 1;
                current.push(ch);
            }
            '}' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            '|' if depth == 0 => segments.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    segments.push(current);

    segments
}
