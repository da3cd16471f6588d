//! Player-side value types: identifiers and screen geometry.

pub mod geometry;
pub mod ids;

pub use geometry::{Point, Size};
pub use ids::{AnchorId, PopupId, TimerId};
