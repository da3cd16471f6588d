//! Which elements render references as anchors and which as plain names.

use super::selector::{Selector, SelectorError};
use super::tree::{ContentTree, ElementId};
use crate::ui::presentation::text::RenderMode;

// Dropdown options, headings and explicitly marked containers show names only
const DISPLAY_NAME_SELECTORS: &[&str] = &[
    "option",
    "title",
    "h1",
    "h2",
    "h3",
    ".display-name",
    "[data-render-mode=name]",
];

const TOOLTIP_SELECTORS: &[&str] = &[
    ".tooltip-enabled",
    ".stat-block",
    "[data-render-mode=tooltip]",
];

/// Ordered selector lists deciding the render mode of an element.
///
/// The element and then its ancestors (nearest first) are checked; at each
/// level the display-name selectors are tried before the tooltip selectors
/// and the first match wins. Nothing matching means tooltip mode.
#[derive(Debug, Clone)]
pub struct RenderModeRules {
    display_name: Vec<Selector>,
    tooltip: Vec<Selector>,
}

impl Default for RenderModeRules {
    fn default() -> Self {
        let parse = |list: &[&str]| {
            list.iter()
                .filter_map(|s| s.parse::<Selector>().ok())
                .collect::<Vec<_>>()
        };
        Self {
            display_name: parse(DISPLAY_NAME_SELECTORS),
            tooltip: parse(TOOLTIP_SELECTORS),
        }
    }
}

impl RenderModeRules {
    /// Rules from selector strings.
    pub fn new<S: AsRef<str>>(display_name: &[S], tooltip: &[S]) -> Result<Self, SelectorError> {
        let parse = |list: &[S]| {
            list.iter()
                .map(|s| s.as_ref().parse::<Selector>())
                .collect::<Result<Vec<_>, _>>()
        };
        Ok(Self {
            display_name: parse(display_name)?,
            tooltip: parse(tooltip)?,
        })
    }

    pub fn mode_for(&self, tree: &ContentTree, id: ElementId) -> RenderMode {
        for node in tree.ancestry(id) {
            let Some(element) = tree.get(node) else {
                continue;
            };
            if self.display_name.iter().any(|s| s.matches(element)) {
                return RenderMode::DisplayName;
            }
            if self.tooltip.iter().any(|s| s.matches(element)) {
                return RenderMode::Tooltip;
            }
        }
        RenderMode::Tooltip
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::presentation::content::Element;

    #[test]
    fn defaults_parse_completely() {
        let rules = RenderModeRules::default();
        assert_eq!(rules.display_name.len(), DISPLAY_NAME_SELECTORS.len());
        assert_eq!(rules.tooltip.len(), TOOLTIP_SELECTORS.len());
    }

    #[test]
    fn nearest_match_wins() {
        let mut tree = ContentTree::new(Element::new("div"));
        let root = tree.root();
        let select = tree.append(root, Element::new("select")).expect("select");
        let option = tree.append(select, Element::new("option")).expect("option");
        let names = tree
            .append(root, Element::new("div").with_class("display-name"))
            .expect("names");
        let opted_in = tree
            .append(names, Element::new("span").with_class("tooltip-enabled"))
            .expect("span");
        let inherits = tree.append(names, Element::new("span")).expect("span");
        let plain = tree.append(root, Element::new("p")).expect("p");

        let rules = RenderModeRules::default();
        assert_eq!(rules.mode_for(&tree, option), RenderMode::DisplayName);
        assert_eq!(rules.mode_for(&tree, opted_in), RenderMode::Tooltip);
        assert_eq!(rules.mode_for(&tree, inherits), RenderMode::DisplayName);
        assert_eq!(rules.mode_for(&tree, plain), RenderMode::Tooltip);
    }

    #[test]
    fn custom_rules_reject_bad_selectors() {
        assert!(RenderModeRules::new(&["li"], &["div p"]).is_err());
        let rules = RenderModeRules::new(&["li"], &[]).expect("rules");
        let tree = ContentTree::new(Element::new("li"));
        assert_eq!(rules.mode_for(&tree, tree.root()), RenderMode::DisplayName);
    }
}
