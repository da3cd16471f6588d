//! Lorelink Player.
//!
//! Client side of reference tooltips: tag rendering, page-content
//! processing, stat-block formatting and the tooltip stack.
//!
//! ## Structure
//!
//! - `domain/` - Identifiers and screen geometry
//! - `ports/` - Popup host, timer and reference lookup traits
//! - `application/` - Tooltip engine and its async service
//! - `infrastructure/` - Tokio timers, engine lookup adapter, test fakes
//! - `ui/presentation/` - Text rendering, stat blocks, content processing

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod ui;

#[cfg(test)]
mod e2e_tests;

pub use ui::presentation;
