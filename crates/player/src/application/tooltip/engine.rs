//! Tooltip stack engine.
//!
//! Owns the ordered stack of open popups and every rule about it: depth,
//! cycle suppression, pin-aware truncation, grace and boundary timers,
//! keyboard handling and dragging. Resolution happens outside the engine:
//! `begin_hover` hands out an [`OpenTicket`], the caller resolves the lookup
//! and passes the result to `complete_open`, which drops the ticket if the
//! stack moved on in the meantime.
//!
//! Synchronous on purpose; `TooltipService` drives it from async code.

use std::sync::Arc;

use lorelink_domain::{ReferenceKey, ReferenceLookup, ResolvedReference};
use serde::Serialize;
use tracing::{debug, warn};

use super::config::TooltipConfig;
use super::error::{StaleReason, TooltipError};
use super::positioning::{clamp_to_viewport, place_near_pointer};
use crate::domain::{AnchorId, Point, PopupId, Size, TimerId};
use crate::ports::outbound::{PopupHost, PopupVisual, TimerPort};
use crate::ui::presentation::stat_blocks::render_resolved;
use crate::ui::presentation::text::{lookup_from_attributes, RenderMode, TagRenderer};

/// One open popup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub id: PopupId,
    pub key: ReferenceKey,
    pub lookup: ReferenceLookup,
    pub anchor: AnchorId,
    pub pinned: bool,
    pub position: Point,
    pub size: Size,
}

/// Pointer entered a reference anchor.
#[derive(Debug, Clone)]
pub struct HoverEvent {
    pub anchor: AnchorId,
    /// `None` when the anchor's attributes do not form a valid lookup
    pub lookup: Option<ReferenceLookup>,
    /// Popup whose content holds the anchor; `None` for the main document
    pub container: Option<PopupId>,
    pub pointer: Point,
}

impl HoverEvent {
    /// Build an event from the anchor's attribute accessor.
    pub fn from_attributes<F>(
        anchor: AnchorId,
        attribute: F,
        container: Option<PopupId>,
        pointer: Point,
    ) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            anchor,
            lookup: lookup_from_attributes(attribute),
            container,
            pointer,
        }
    }
}

/// Permission to push one popup once its lookup has resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenTicket {
    generation: u64,
    depth: usize,
    parent: Option<PopupId>,
    lookup: ReferenceLookup,
    anchor: AnchorId,
    pointer: Point,
}

impl OpenTicket {
    pub fn lookup(&self) -> &ReferenceLookup {
        &self.lookup
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HoverDecision {
    /// Resolve the ticket's lookup, then call `complete_open`
    Resolve(OpenTicket),
    /// Not a usable anchor, or its popup is gone
    Ignored,
    /// The reference is already open somewhere in the stack
    CycleSuppressed,
    /// This anchor already owns the popup at the target depth
    AlreadyOpen,
    /// A pinned popup occupies the target depth
    BlockedByPin,
}

/// Where the pointer went after leaving an anchor or popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// Somewhere outside every anchor and popup
    Outside,
    Anchor,
    Popup(PopupId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipKey {
    Escape,
    /// Pin shortcut
    Pin,
    /// Copy shortcut; bound but does nothing yet
    Copy,
    Other,
}

#[derive(Debug, Clone, Copy)]
struct PendingBoundary {
    timer: TimerId,
    depth: usize,
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    popup: PopupId,
    grab: Point,
}

pub struct TooltipEngine {
    host: Arc<dyn PopupHost>,
    timers: Arc<dyn TimerPort>,
    renderer: TagRenderer,
    config: TooltipConfig,
    stack: Vec<Popup>,
    generation: u64,
    pending: Option<u64>,
    grace: Option<TimerId>,
    boundary: Option<PendingBoundary>,
    drag: Option<DragState>,
}

impl TooltipEngine {
    pub fn new(
        host: Arc<dyn PopupHost>,
        timers: Arc<dyn TimerPort>,
        renderer: TagRenderer,
        config: TooltipConfig,
    ) -> Self {
        Self {
            host,
            timers,
            renderer,
            config,
            stack: Vec::new(),
            generation: 0,
            pending: None,
            grace: None,
            boundary: None,
            drag: None,
        }
    }

    pub fn stack(&self) -> &[Popup] {
        &self.stack
    }

    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        !self.stack.is_empty()
    }

    fn index_of(&self, id: PopupId) -> Option<usize> {
        self.stack.iter().position(|popup| popup.id == id)
    }

    // =========================================================================
    // Opening
    // =========================================================================

    /// First half of an open: decide whether the hovered anchor gets a popup.
    ///
    /// Truncation happens here, before anything is resolved, so a ticket
    /// always targets the top of the stack. A pinned popup at or below the
    /// target depth refuses the open rather than stacking above it; this
    /// includes a pinned root against hovers in the main document, which
    /// stay blocked until it is unpinned or closed.
    pub fn begin_hover(&mut self, event: HoverEvent) -> HoverDecision {
        self.cancel_grace();

        let Some(lookup) = event.lookup else {
            debug!(anchor = %event.anchor, "Anchor has no usable reference attributes");
            return HoverDecision::Ignored;
        };

        let depth = match event.container {
            None => 0,
            Some(container) => match self.index_of(container) {
                Some(index) => index + 1,
                None => {
                    debug!(%container, "Anchor belongs to a popup that is no longer open");
                    return HoverDecision::Ignored;
                }
            },
        };

        if self
            .stack
            .get(depth)
            .is_some_and(|popup| popup.anchor == event.anchor)
        {
            return HoverDecision::AlreadyOpen;
        }

        let key = lookup.key();
        if self.stack.iter().any(|popup| popup.key == key) {
            debug!(%key, "Reference already open, suppressing cycle");
            return HoverDecision::CycleSuppressed;
        }

        // A pending boundary close at or above this depth would tear down the new popup
        if self.boundary.is_some_and(|boundary| depth <= boundary.depth) {
            self.cancel_boundary();
        }

        if !self.truncate(depth) {
            debug!(depth, "Pinned popup blocks the open");
            return HoverDecision::BlockedByPin;
        }

        self.generation += 1;
        self.pending = Some(self.generation);
        HoverDecision::Resolve(OpenTicket {
            generation: self.generation,
            depth,
            parent: event.container,
            lookup,
            anchor: event.anchor,
            pointer: event.pointer,
        })
    }

    /// Second half of an open: render, mount, position and push.
    pub fn complete_open(
        &mut self,
        ticket: OpenTicket,
        resolved: ResolvedReference,
    ) -> Result<PopupId, TooltipError> {
        self.validate(&ticket)?;
        self.pending = None;

        let html = self
            .renderer
            .process_string(&render_resolved(&resolved), RenderMode::Tooltip);

        let id = PopupId::new();
        let Some(size) = self.host.mount_popup(id, &html) else {
            debug!(name = %ticket.lookup.name, "Popup host unavailable, abandoning open");
            return Err(TooltipError::HostUnavailable {
                name: ticket.lookup.name,
            });
        };

        let position = place_near_pointer(
            ticket.pointer,
            size,
            self.host.viewport(),
            self.config.pointer_offset,
            self.config.viewport_margin,
        );
        self.host.place_popup(id, position);
        self.host.set_visual(id, PopupVisual::shown(false));

        let key = ticket.lookup.key();
        debug!(%id, %key, depth = ticket.depth, "Popup opened");
        self.stack.push(Popup {
            id,
            key,
            lookup: ticket.lookup,
            anchor: ticket.anchor,
            pinned: false,
            position,
            size,
        });
        Ok(id)
    }

    fn validate(&self, ticket: &OpenTicket) -> Result<(), TooltipError> {
        let stale = |reason| TooltipError::StaleTicket {
            generation: ticket.generation,
            reason,
        };

        if self.pending != Some(ticket.generation) {
            return Err(stale(StaleReason::Superseded));
        }
        if self.stack.len() != ticket.depth {
            return Err(stale(StaleReason::DepthChanged));
        }
        let parent = ticket
            .depth
            .checked_sub(1)
            .and_then(|index| self.stack.get(index))
            .map(|popup| popup.id);
        if parent != ticket.parent {
            return Err(stale(StaleReason::ParentChanged));
        }
        let key = ticket.lookup.key();
        if self.stack.iter().any(|popup| popup.key == key) {
            return Err(stale(StaleReason::AlreadyOpen));
        }
        Ok(())
    }

    // =========================================================================
    // Pointer movement and timers
    // =========================================================================

    pub fn pointer_left(&mut self, to: PointerTarget) {
        match to {
            PointerTarget::Outside => self.start_grace(),
            PointerTarget::Anchor => self.cancel_grace(),
            PointerTarget::Popup(id) => self.pointer_entered_popup(id),
        }
    }

    /// Pointer moved into popup `id`.
    ///
    /// Popups deeper than `id` are truncated after the boundary delay unless
    /// the pointer returns into one of them first.
    pub fn pointer_entered_popup(&mut self, id: PopupId) {
        self.cancel_grace();
        let Some(index) = self.index_of(id) else {
            return;
        };

        if let Some(boundary) = self.boundary {
            if index >= boundary.depth {
                self.timers.cancel(boundary.timer);
                self.boundary = None;
                return;
            }
        }

        if self.stack.len() > index + 1 {
            self.cancel_boundary();
            let timer = TimerId::new();
            self.timers.schedule(timer, self.config.boundary_delay());
            self.boundary = Some(PendingBoundary {
                timer,
                depth: index + 1,
            });
        }
    }

    /// A scheduled timer fired. Returns `false` for timers that are no longer current.
    pub fn timer_fired(&mut self, timer: TimerId) -> bool {
        if self.grace == Some(timer) {
            self.grace = None;
            self.pending = None;
            self.close_unpinned();
            return true;
        }
        if let Some(boundary) = self.boundary.filter(|b| b.timer == timer) {
            self.boundary = None;
            self.truncate(boundary.depth);
            return true;
        }
        debug!(%timer, "Ignoring stale timer");
        false
    }

    fn start_grace(&mut self) {
        self.cancel_grace();
        if self.stack.is_empty() && self.pending.is_none() {
            return;
        }
        let timer = TimerId::new();
        self.timers.schedule(timer, self.config.grace());
        self.grace = Some(timer);
    }

    fn cancel_grace(&mut self) {
        if let Some(timer) = self.grace.take() {
            self.timers.cancel(timer);
        }
    }

    fn cancel_boundary(&mut self) {
        if let Some(boundary) = self.boundary.take() {
            self.timers.cancel(boundary.timer);
        }
    }

    // =========================================================================
    // Closing
    // =========================================================================

    /// Remove unpinned popups from the top until the stack is `depth` long,
    /// stopping at the first pinned one. Returns whether `depth` was reached.
    fn truncate(&mut self, depth: usize) -> bool {
        while self.stack.len() > depth {
            if self.stack.last().is_some_and(|popup| popup.pinned) {
                return false;
            }
            let top = self.stack.len() - 1;
            self.remove_at(top);
        }
        true
    }

    fn close_unpinned(&mut self) {
        for index in (0..self.stack.len()).rev() {
            if !self.stack[index].pinned {
                self.remove_at(index);
            }
        }
    }

    fn remove_at(&mut self, index: usize) -> Popup {
        let popup = self.stack.remove(index);
        self.host.remove_popup(popup.id);
        if self.drag.is_some_and(|drag| drag.popup == popup.id) {
            self.drag = None;
        }
        debug!(id = %popup.id, key = %popup.key, "Popup closed");
        popup
    }

    /// Close `id` plus every unpinned popup deeper than it.
    pub fn close(&mut self, id: PopupId) -> Result<(), TooltipError> {
        let index = self.index_of(id).ok_or(TooltipError::UnknownPopup(id))?;
        for deeper in (index + 1..self.stack.len()).rev() {
            if !self.stack[deeper].pinned {
                self.remove_at(deeper);
            }
        }
        self.remove_at(index);
        Ok(())
    }

    // =========================================================================
    // Pinning, keyboard and dragging
    // =========================================================================

    /// Flip the pin state; returns the new state.
    pub fn toggle_pin(&mut self, id: PopupId) -> Result<bool, TooltipError> {
        let index = self.index_of(id).ok_or(TooltipError::UnknownPopup(id))?;
        let popup = &mut self.stack[index];
        popup.pinned = !popup.pinned;
        let pinned = popup.pinned;
        self.host.set_visual(id, PopupVisual::shown(pinned));
        if !pinned && self.drag.is_some_and(|drag| drag.popup == id) {
            self.drag = None;
        }
        debug!(%id, pinned, "Popup pin toggled");
        Ok(pinned)
    }

    /// Handle a key press. Returns whether the key was consumed.
    pub fn key_pressed(&mut self, key: TooltipKey) -> bool {
        let Some(top) = self.stack.last().map(|popup| popup.id) else {
            return false;
        };
        match key {
            TooltipKey::Escape => {
                let index = self.stack.len() - 1;
                self.remove_at(index);
                true
            }
            TooltipKey::Pin => self.toggle_pin(top).is_ok(),
            TooltipKey::Copy => {
                debug!(id = %top, "Copy shortcut pressed");
                true
            }
            TooltipKey::Other => false,
        }
    }

    /// Start dragging a pinned popup.
    pub fn begin_drag(&mut self, id: PopupId, pointer: Point) -> bool {
        let Some(popup) = self.stack.iter().find(|popup| popup.id == id) else {
            return false;
        };
        if !popup.pinned {
            return false;
        }
        self.drag = Some(DragState {
            popup: id,
            grab: pointer.delta_from(popup.position),
        });
        true
    }

    /// Move the dragged popup; returns its clamped position.
    pub fn drag_to(&mut self, pointer: Point) -> Option<Point> {
        let drag = self.drag?;
        let viewport = self.host.viewport();
        let margin = self.config.viewport_margin;
        let Some(popup) = self.stack.iter_mut().find(|popup| popup.id == drag.popup) else {
            warn!(id = %drag.popup, "Drag target vanished");
            self.drag = None;
            return None;
        };
        let position = clamp_to_viewport(pointer.delta_from(drag.grab), popup.size, viewport, margin);
        popup.position = position;
        self.host.place_popup(drag.popup, position);
        Some(position)
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }
}
