//! Tokio-backed debounce timers.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::TimerId;
use crate::ports::outbound::TimerPort;

/// Each scheduled timer is a spawned sleep that sends its id on a channel
/// when it elapses. Cancelling aborts the sleep.
///
/// Must be used from within a tokio runtime.
pub struct TokioTimers {
    fired: mpsc::UnboundedSender<TimerId>,
    running: Mutex<HashMap<TimerId, JoinHandle<()>>>,
}

impl TokioTimers {
    /// Timers plus the receiving end for `TooltipService::spawn_timer_loop`.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerId>) {
        let (fired, receiver) = mpsc::unbounded_channel();
        (
            Self {
                fired,
                running: Mutex::new(HashMap::new()),
            },
            receiver,
        )
    }

    fn running(&self) -> MutexGuard<'_, HashMap<TimerId, JoinHandle<()>>> {
        self.running.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TimerPort for TokioTimers {
    fn schedule(&self, id: TimerId, delay: Duration) {
        let fired = self.fired.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if fired.send(id).is_err() {
                tracing::debug!(timer = %id, "Timer fired after the receiver closed");
            }
        });

        let mut running = self.running();
        running.retain(|_, handle| !handle.is_finished());
        if let Some(previous) = running.insert(id, handle) {
            previous.abort();
        }
    }

    fn cancel(&self, id: TimerId) {
        if let Some(handle) = self.running().remove(&id) {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATIENCE: Duration = Duration::from_secs(2);

    #[tokio::test]
    async fn fires_after_delay() {
        let (timers, mut fired) = TokioTimers::new();
        let id = TimerId::new();
        timers.schedule(id, Duration::from_millis(20));
        assert!(fired.try_recv().is_err());

        let received = tokio::time::timeout(PATIENCE, fired.recv())
            .await
            .expect("timer fired in time");
        assert_eq!(received, Some(id));
    }

    #[tokio::test]
    async fn cancelled_timer_never_fires() {
        let (timers, mut fired) = TokioTimers::new();
        let cancelled = TimerId::new();
        let kept = TimerId::new();
        timers.schedule(cancelled, Duration::from_millis(5));
        timers.schedule(kept, Duration::from_millis(40));
        timers.cancel(cancelled);

        let received = tokio::time::timeout(PATIENCE, fired.recv())
            .await
            .expect("timer fired in time");
        assert_eq!(received, Some(kept));
        assert!(fired.try_recv().is_err());
    }
}
