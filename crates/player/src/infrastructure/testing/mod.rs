//! Recording fakes for the outbound ports
//!
//! Available to unit tests and, with the `testing` feature, to downstream
//! crates. Every fake records what the engine asked of it so tests can
//! assert on host calls and scheduled timers.

mod manual_timers;
mod recording_popup_host;
mod static_lookup;

pub use manual_timers::ManualTimers;
pub use recording_popup_host::RecordingPopupHost;
pub use static_lookup::StaticReferenceLookup;
