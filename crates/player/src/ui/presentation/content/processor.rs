//! Page content processor
//!
//! Walks a content subtree and renders tags (or inline markdown) in each
//! element's HTML once, flagging processed elements so repeated passes over
//! the same page are cheap. The host calls `content_mounted` whenever it
//! inserts new content, including popup bodies.

use lorelink_domain::contains_tags;

use super::rules::RenderModeRules;
use super::tree::{ContentTree, ElementId};
use crate::ui::presentation::text::{
    apply_inline_markdown, RenderMode, TagRenderer, HOVER_NAME, HOVER_SOURCE, HOVER_TYPE,
    LEGACY_TOOLTIP_NAME, LEGACY_TOOLTIP_SOURCE, LEGACY_TOOLTIP_TYPE,
};

/// Set on elements whose HTML has been processed.
pub const PROCESSED_ATTRIBUTE: &str = "data-processed";

const LEGACY_TO_CURRENT: [(&str, &str); 3] = [
    (LEGACY_TOOLTIP_TYPE, HOVER_TYPE),
    (LEGACY_TOOLTIP_NAME, HOVER_NAME),
    (LEGACY_TOOLTIP_SOURCE, HOVER_SOURCE),
];

#[derive(Debug, Clone, Default)]
pub struct PageContentProcessor {
    renderer: TagRenderer,
    rules: RenderModeRules,
}

impl PageContentProcessor {
    pub fn new(renderer: TagRenderer, rules: RenderModeRules) -> Self {
        Self { renderer, rules }
    }

    pub fn renderer(&self) -> &TagRenderer {
        &self.renderer
    }

    /// Process every unprocessed element under (and including) `root`.
    ///
    /// Returns how many elements were processed.
    pub fn process_page_content(&self, tree: &mut ContentTree, root: ElementId) -> usize {
        let processed = tree
            .descendants(root)
            .into_iter()
            .filter(|id| self.process_element(tree, *id, false))
            .count();
        tracing::debug!(processed, "Processed page content");
        processed
    }

    /// Process one element. `force` reprocesses an element already flagged.
    ///
    /// Returns false for unknown ids and for skipped elements.
    pub fn process_element(&self, tree: &mut ContentTree, id: ElementId, force: bool) -> bool {
        let mode = self.rules.mode_for(tree, id);
        let Some(element) = tree.get_mut(id) else {
            return false;
        };
        if !force && element.attribute(PROCESSED_ATTRIBUTE).is_some() {
            return false;
        }

        if contains_tags(&element.inner_html) {
            element.inner_html = self.renderer.process_string(&element.inner_html, mode);
        } else if !element.inner_html.is_empty() {
            element.inner_html = apply_inline_markdown(&element.inner_html);
        }
        element.set_attribute(PROCESSED_ATTRIBUTE, "true");
        true
    }

    /// Newly mounted content: upgrade legacy anchors, then process.
    pub fn content_mounted(&self, tree: &mut ContentTree, root: ElementId) -> usize {
        let upgraded = upgrade_legacy_attributes(tree, root);
        if upgraded > 0 {
            tracing::debug!(upgraded, "Upgraded legacy tooltip attributes");
        }
        self.process_page_content(tree, root)
    }

    /// Render a standalone string the way an element in `mode` would be.
    pub fn process_string(&self, text: &str, mode: RenderMode) -> String {
        self.renderer.process_string(text, mode)
    }
}

/// Rewrite `data-tooltip-*` to `data-hover-*` on elements and inside their HTML.
///
/// Returns how many elements changed.
pub fn upgrade_legacy_attributes(tree: &mut ContentTree, root: ElementId) -> usize {
    let mut changed = 0;
    for id in tree.descendants(root) {
        let Some(element) = tree.get_mut(id) else {
            continue;
        };
        let mut touched = false;

        for (legacy, current) in LEGACY_TO_CURRENT {
            if let Some(value) = element.remove_attribute(legacy) {
                if element.attribute(current).is_none() {
                    element.set_attribute(current, value);
                }
                touched = true;
            }
            if element.inner_html.contains(legacy) {
                element.inner_html = element.inner_html.replace(legacy, current);
                touched = true;
            }
        }

        if touched {
            changed += 1;
        }
    }
    changed
}
