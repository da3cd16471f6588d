//! Page content: an element tree standing in for the DOM, and the processor
//! that renders tags inside it.

mod processor;
mod rules;
mod selector;
mod tree;

pub use processor::{upgrade_legacy_attributes, PageContentProcessor, PROCESSED_ATTRIBUTE};
pub use rules::RenderModeRules;
pub use selector::{Selector, SelectorError};
pub use tree::{ContentTree, Element, ElementId};
