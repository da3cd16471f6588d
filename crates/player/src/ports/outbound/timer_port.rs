//! TimerPort - one-shot debounce timers
//!
//! Fired timers are delivered back to the tooltip service by id; see
//! `infrastructure::timers` for the tokio implementation.

use std::time::Duration;

use crate::domain::TimerId;

pub trait TimerPort: Send + Sync {
    /// Fire `id` once after `delay`.
    fn schedule(&self, id: TimerId, delay: Duration);

    /// Cancel a pending timer. Unknown or already-fired ids are ignored.
    fn cancel(&self, id: TimerId);
}
