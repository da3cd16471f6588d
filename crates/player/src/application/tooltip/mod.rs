//! Tooltip stack: engine, async service and configuration

mod config;
mod engine;
mod error;
mod positioning;
mod service;

pub use config::{TooltipConfig, ENV_BOUNDARY_MS, ENV_GRACE_MS};
pub use engine::{
    HoverDecision, HoverEvent, OpenTicket, PointerTarget, Popup, TooltipEngine, TooltipKey,
};
pub use error::{StaleReason, TooltipError};
pub use positioning::{clamp_to_viewport, place_near_pointer};
pub use service::TooltipService;
