pub mod tooltip;

pub use tooltip::{TooltipConfig, TooltipEngine, TooltipError, TooltipService};
