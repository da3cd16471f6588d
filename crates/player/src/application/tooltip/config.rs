//! Tooltip timing and placement settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Delay before an abandoned stack closes (milliseconds)
pub const ENV_GRACE_MS: &str = "LORELINK_TOOLTIP_GRACE_MS";
/// Delay before popups deeper than the hovered one are truncated (milliseconds)
pub const ENV_BOUNDARY_MS: &str = "LORELINK_TOOLTIP_BOUNDARY_MS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    pub grace_ms: u64,
    pub boundary_ms: u64,
    /// Distance between the pointer and the popup's near corner
    pub pointer_offset: f64,
    /// Minimum gap kept between a popup and the viewport edge
    pub viewport_margin: f64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            grace_ms: 300,
            boundary_ms: 150,
            pointer_offset: 10.0,
            viewport_margin: 10.0,
        }
    }
}

impl TooltipConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Defaults with environment overrides. Unparseable values are logged and ignored.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let millis = |key: &str, default: u64| match var(key) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(value) => value,
                Err(_) => {
                    tracing::warn!(key, value = %raw, default, "Ignoring invalid tooltip delay");
                    default
                }
            },
            None => default,
        };

        Self {
            grace_ms: millis(ENV_GRACE_MS, defaults.grace_ms),
            boundary_ms: millis(ENV_BOUNDARY_MS, defaults.boundary_ms),
            ..defaults
        }
    }

    pub fn grace(&self) -> Duration {
        Duration::from_millis(self.grace_ms)
    }

    pub fn boundary_delay(&self) -> Duration {
        Duration::from_millis(self.boundary_ms)
    }
}
