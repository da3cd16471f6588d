//! Timers that only fire when a test says so.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::domain::TimerId;
use crate::ports::outbound::TimerPort;

#[derive(Default)]
struct State {
    scheduled: Vec<(TimerId, Duration)>,
    cancelled: Vec<TimerId>,
}

/// Fake `TimerPort`. Nothing fires by itself; tests pass the ids they want
/// to fire to `TooltipEngine::timer_fired` or the service's timer channel.
#[derive(Default)]
pub struct ManualTimers {
    state: Mutex<State>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn scheduled(&self) -> Vec<TimerId> {
        self.state().scheduled.iter().map(|(id, _)| *id).collect()
    }

    pub fn last_scheduled(&self) -> Option<TimerId> {
        self.state().scheduled.last().map(|(id, _)| *id)
    }

    pub fn delay(&self, id: TimerId) -> Option<Duration> {
        self.state()
            .scheduled
            .iter()
            .find(|(scheduled, _)| *scheduled == id)
            .map(|(_, delay)| *delay)
    }

    pub fn was_cancelled(&self, id: TimerId) -> bool {
        self.state().cancelled.contains(&id)
    }

    /// Scheduled and not cancelled.
    pub fn pending(&self) -> Vec<TimerId> {
        let state = self.state();
        state
            .scheduled
            .iter()
            .map(|(id, _)| *id)
            .filter(|id| !state.cancelled.contains(id))
            .collect()
    }
}

impl TimerPort for ManualTimers {
    fn schedule(&self, id: TimerId, delay: Duration) {
        self.state().scheduled.push((id, delay));
    }

    fn cancel(&self, id: TimerId) {
        self.state().cancelled.push(id);
    }
}
