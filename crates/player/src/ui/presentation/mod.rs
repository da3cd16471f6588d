//! Presentation layer: tag rendering, stat blocks and page-content processing

pub mod content;
pub mod stat_blocks;
pub mod text;

pub use content::{PageContentProcessor, RenderModeRules};
pub use stat_blocks::{render_entity, render_resolved};
pub use text::{RenderMode, TagRenderer};
