//! In-memory popup host that records every call.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::{Point, PopupId, Size};
use crate::ports::outbound::{PopupHost, PopupVisual};

#[derive(Debug, Clone)]
struct MountedPopup {
    html: String,
    position: Option<Point>,
    visual: Option<PopupVisual>,
}

struct State {
    viewport: Size,
    popup_size: Size,
    refuse_mounts: bool,
    mounted: HashMap<PopupId, MountedPopup>,
    mount_order: Vec<PopupId>,
    removed: Vec<PopupId>,
}

/// Fake `PopupHost` with a fixed viewport and a fixed measured popup size.
pub struct RecordingPopupHost {
    state: Mutex<State>,
}

impl Default for RecordingPopupHost {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingPopupHost {
    /// 1024x768 viewport, 300x200 popups.
    pub fn new() -> Self {
        Self::with_sizes(Size::new(1024.0, 768.0), Size::new(300.0, 200.0))
    }

    pub fn with_sizes(viewport: Size, popup_size: Size) -> Self {
        Self {
            state: Mutex::new(State {
                viewport,
                popup_size,
                refuse_mounts: false,
                mounted: HashMap::new(),
                mount_order: Vec::new(),
                removed: Vec::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Simulate a host that cannot create containers.
    pub fn refuse_mounts(&self, refuse: bool) {
        self.state().refuse_mounts = refuse;
    }

    pub fn mounted_html(&self, id: PopupId) -> Option<String> {
        self.state().mounted.get(&id).map(|popup| popup.html.clone())
    }

    pub fn position(&self, id: PopupId) -> Option<Point> {
        self.state().mounted.get(&id).and_then(|popup| popup.position)
    }

    pub fn visual(&self, id: PopupId) -> Option<PopupVisual> {
        self.state().mounted.get(&id).and_then(|popup| popup.visual)
    }

    /// Popups ever mounted, in mount order.
    pub fn mounted(&self) -> Vec<PopupId> {
        self.state().mount_order.clone()
    }

    pub fn mounted_count(&self) -> usize {
        self.state().mount_order.len()
    }

    /// Popups removed, in removal order.
    pub fn removed(&self) -> Vec<PopupId> {
        self.state().removed.clone()
    }
}

impl PopupHost for RecordingPopupHost {
    fn viewport(&self) -> Size {
        self.state().viewport
    }

    fn mount_popup(&self, id: PopupId, html: &str) -> Option<Size> {
        let mut state = self.state();
        if state.refuse_mounts {
            return None;
        }
        state.mounted.insert(
            id,
            MountedPopup {
                html: html.to_string(),
                position: None,
                visual: None,
            },
        );
        state.mount_order.push(id);
        Some(state.popup_size)
    }

    fn place_popup(&self, id: PopupId, position: Point) {
        if let Some(popup) = self.state().mounted.get_mut(&id) {
            popup.position = Some(position);
        }
    }

    fn set_visual(&self, id: PopupId, visual: PopupVisual) {
        if let Some(popup) = self.state().mounted.get_mut(&id) {
            popup.visual = Some(visual);
        }
    }

    fn remove_popup(&self, id: PopupId) {
        let mut state = self.state();
        if state.mounted.remove(&id).is_some() {
            state.removed.push(id);
        }
    }
}
