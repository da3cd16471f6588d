//! PopupHost - where popups physically live
//!
//! The host owns the popup containers (pin button, close button, drag handle
//! and content region). The engine decides *what* is open and *where*; the
//! host draws it.

use crate::domain::{Point, PopupId, Size};

/// Visual state of a popup container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupVisual {
    pub shown: bool,
    pub pinned: bool,
}

impl PopupVisual {
    pub fn shown(pinned: bool) -> Self {
        Self {
            shown: true,
            pinned,
        }
    }

    /// CSS classes for the container. The drag handle is visible only with `pinned`.
    pub fn classes(&self) -> Vec<&'static str> {
        let mut classes = vec![if self.shown { "show" } else { "hide" }];
        if self.pinned {
            classes.push("pinned");
        }
        classes
    }
}

/// Host side of the popup contract.
///
/// Unknown popup ids must be ignored by implementations.
pub trait PopupHost: Send + Sync {
    /// Current viewport size.
    fn viewport(&self) -> Size;

    /// Create a container for `id` holding `html` and return its measured size.
    ///
    /// `None` means no container could be created (host not ready, document
    /// gone); the engine then abandons the open.
    fn mount_popup(&self, id: PopupId, html: &str) -> Option<Size>;

    /// Move the container's top-left corner.
    fn place_popup(&self, id: PopupId, position: Point);

    fn set_visual(&self, id: PopupId, visual: PopupVisual);

    fn remove_popup(&self, id: PopupId);
}
