//! Async front for the tooltip engine.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

use super::engine::{HoverDecision, HoverEvent, PointerTarget, Popup, TooltipEngine, TooltipKey};
use super::error::TooltipError;
use crate::domain::{Point, PopupId, TimerId};
use crate::ports::outbound::ReferenceLookupPort;

/// Tooltip stack service.
///
/// All engine mutation happens under one mutex. The lock is released while a
/// lookup resolves, so the stack may change in the meantime; the engine's
/// ticket check discards opens that no longer fit.
pub struct TooltipService {
    engine: Mutex<TooltipEngine>,
    lookup: Arc<dyn ReferenceLookupPort>,
}

impl TooltipService {
    pub fn new(engine: TooltipEngine, lookup: Arc<dyn ReferenceLookupPort>) -> Self {
        Self {
            engine: Mutex::new(engine),
            lookup,
        }
    }

    /// Pointer entered an anchor. Returns the new popup, if one was opened.
    pub async fn hover_enter(&self, event: HoverEvent) -> Option<PopupId> {
        let decision = self.engine.lock().await.begin_hover(event);
        let ticket = match decision {
            HoverDecision::Resolve(ticket) => ticket,
            other => {
                debug!(decision = ?other, "Hover did not open a popup");
                return None;
            }
        };

        let resolved = self.lookup.lookup(ticket.lookup()).await;

        match self.engine.lock().await.complete_open(ticket, resolved) {
            Ok(id) => Some(id),
            Err(error) => {
                debug!(%error, "Discarded popup open");
                None
            }
        }
    }

    pub async fn pointer_left(&self, to: PointerTarget) {
        self.engine.lock().await.pointer_left(to);
    }

    pub async fn pointer_entered_popup(&self, id: PopupId) {
        self.engine.lock().await.pointer_entered_popup(id);
    }

    pub async fn timer_fired(&self, timer: TimerId) -> bool {
        self.engine.lock().await.timer_fired(timer)
    }

    pub async fn key_pressed(&self, key: TooltipKey) -> bool {
        self.engine.lock().await.key_pressed(key)
    }

    pub async fn toggle_pin(&self, id: PopupId) -> Result<bool, TooltipError> {
        self.engine.lock().await.toggle_pin(id)
    }

    pub async fn close(&self, id: PopupId) -> Result<(), TooltipError> {
        self.engine.lock().await.close(id)
    }

    pub async fn begin_drag(&self, id: PopupId, pointer: Point) -> bool {
        self.engine.lock().await.begin_drag(id, pointer)
    }

    pub async fn drag_to(&self, pointer: Point) -> Option<Point> {
        self.engine.lock().await.drag_to(pointer)
    }

    pub async fn end_drag(&self) {
        self.engine.lock().await.end_drag();
    }

    /// Copy of the current stack, bottom first.
    pub async fn snapshot(&self) -> Vec<Popup> {
        self.engine.lock().await.stack().to_vec()
    }

    /// Feed fired timers back into the engine until the channel closes.
    pub fn spawn_timer_loop(
        self: &Arc<Self>,
        mut fired: mpsc::UnboundedReceiver<TimerId>,
    ) -> JoinHandle<()> {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            while let Some(timer) = fired.recv().await {
                service.timer_fired(timer).await;
            }
            debug!("Tooltip timer loop stopped");
        })
    }
}
