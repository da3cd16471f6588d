//! Rules text ("entries").
//!
//! Rules text is an ordered, recursively nested sequence of literal strings
//! and block objects (named sections, lists, tables, insets, quotes). Strings
//! may contain embedded `{@tag ...}` references; they are kept verbatim here
//! and only interpreted by the tag renderer.

use serde::{Deserialize, Serialize};

/// One element of rules text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    /// Literal text, possibly containing tags.
    Text(String),
    /// A structured block.
    Block(Box<EntryBlock>),
    /// Anything else the data contains (numbers, exotic shapes); skipped by renderers.
    Other(serde_json::Value),
}

impl Entry {
    /// Create a literal text entry.
    pub fn text(text: impl Into<String>) -> Self {
        Entry::Text(text.into())
    }

    /// Create a named `entries` block.
    pub fn section(name: impl Into<String>, entries: Vec<Entry>) -> Self {
        Entry::Block(Box::new(EntryBlock {
            block_type: Some("entries".to_string()),
            name: Some(name.into()),
            entries,
            ..EntryBlock::default()
        }))
    }

    /// Create a bullet list block.
    pub fn list(items: Vec<Entry>) -> Self {
        Entry::Block(Box::new(EntryBlock {
            block_type: Some("list".to_string()),
            items,
            ..EntryBlock::default()
        }))
    }

    /// Literal text, if this is a text entry.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Entry::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// A structured block inside rules text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryBlock {
    /// Block type (`entries`, `list`, `table`, `inset`, `quote`, `item`, ...).
    #[serde(rename = "type", default)]
    pub block_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub entries: Vec<Entry>,
    /// List items.
    #[serde(default)]
    pub items: Vec<Entry>,
    /// Single-entry form used by `item` blocks.
    #[serde(default)]
    pub entry: Option<Box<Entry>>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub col_labels: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<serde_json::Value>>,
    /// Attribution for quotes.
    #[serde(default)]
    pub by: Option<String>,
}

impl EntryBlock {
    /// The block type, defaulting to `entries` when the data omits it.
    pub fn block_type(&self) -> &str {
        self.block_type.as_deref().unwrap_or("entries")
    }
}
