use std::fmt;

use crate::domain::PopupId;

/// Why a pending open was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleReason {
    /// A newer hover (or a grace expiry) replaced this ticket
    Superseded,
    /// The stack no longer ends where the ticket expects to push
    DepthChanged,
    /// The popup that contained the anchor was replaced
    ParentChanged,
    /// The same reference was opened in the meantime
    AlreadyOpen,
}

impl fmt::Display for StaleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            StaleReason::Superseded => "superseded by a newer hover",
            StaleReason::DepthChanged => "stack depth changed",
            StaleReason::ParentChanged => "parent popup changed",
            StaleReason::AlreadyOpen => "reference already open",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TooltipError {
    #[error("Open ticket {generation} is stale: {reason}")]
    StaleTicket { generation: u64, reason: StaleReason },
    #[error("Popup host could not mount a container for '{name}'")]
    HostUnavailable { name: String },
    #[error("Popup not in stack: {0}")]
    UnknownPopup(PopupId),
}

impl TooltipError {
    pub fn is_stale(&self) -> bool {
        matches!(self, TooltipError::StaleTicket { .. })
    }
}
