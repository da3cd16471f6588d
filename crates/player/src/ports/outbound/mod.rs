//! Outbound ports - Interfaces for the host UI, timers and reference data
//!
//! The tooltip engine only talks to the outside world through these traits,
//! so it can run against a real desktop shell or against recording fakes.

pub mod popup_host;
pub mod reference_lookup_port;
pub mod timer_port;

pub use popup_host::{PopupHost, PopupVisual};
pub use reference_lookup_port::ReferenceLookupPort;
pub use timer_port::TimerPort;

#[cfg(any(test, feature = "testing"))]
pub use reference_lookup_port::MockReferenceLookupPort;
