use std::fmt;

use crate::model::submittal::{GroupKey, SubmittalId};

/// Machine-readable error codes for the service layer's decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderErrorCode {
    InvalidOrder,
    ItemNotFoundInGroup,
    NotEligible,
}

impl OrderErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidOrder => "E2101",
            Self::ItemNotFoundInGroup => "E2102",
            Self::NotEligible => "E2103",
        }
    }

    /// Short human-facing summary for logs and API responses.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidOrder => "Invalid order value",
            Self::ItemNotFoundInGroup => "Item not found in group snapshot",
            Self::NotEligible => "Item not eligible for promotion",
        }
    }

    /// Optional remediation hint surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidOrder => {
                Some("Send null, one of 0.1-0.9, or a rank of 1 or greater.")
            }
            Self::ItemNotFoundInGroup => {
                Some("Re-read the group before retrying; the snapshot is stale.")
            }
            // Expected outcome, not a fault: skip the item.
            Self::NotEligible => None,
        }
    }
}

impl fmt::Display for OrderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors from the ordering engines.
///
/// All variants are pure function outcomes: no mutation was computed, nothing
/// needs retrying. `NotEligible` in particular is a normal result of the
/// promotion sweep, not a failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("invalid order value {value}: {reason}")]
    InvalidOrder { value: f64, reason: String },

    #[error("item {id} not found in group '{group}'")]
    ItemNotFoundInGroup { id: SubmittalId, group: GroupKey },

    #[error("item {id} not eligible for promotion: {reason}")]
    NotEligible {
        id: SubmittalId,
        reason: &'static str,
    },
}

impl OrderError {
    /// The machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> OrderErrorCode {
        match self {
            Self::InvalidOrder { .. } => OrderErrorCode::InvalidOrder,
            Self::ItemNotFoundInGroup { .. } => OrderErrorCode::ItemNotFoundInGroup,
            Self::NotEligible { .. } => OrderErrorCode::NotEligible,
        }
    }
}
