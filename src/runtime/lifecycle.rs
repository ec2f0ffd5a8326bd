use crate::error::AirdropError;
use crate::types::AirdropReceipt;

/// Where the single in-flight request currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleState {
    Idle,
    Validating,
    Requesting,
    Confirming,
    Succeeded,
    Failed(AirdropError),
}

impl LifecycleState {
    /// Idle, Succeeded and Failed are the only states that accept a new submission.
    ///
    /// Accepting from a terminal state is the reset to `Idle`; the controller
    /// moves straight on to `Validating` without publishing `Idle` in between.
    pub fn accepts_submit(&self) -> bool {
        matches!(self, Self::Idle | Self::Succeeded | Self::Failed(_))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Requesting => "requesting",
            Self::Confirming => "confirming",
            Self::Succeeded => "succeeded",
            Self::Failed(_) => "failed",
        }
    }
}

/// Message for the presentation layer. Display only, never parsed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    Status(String),
    Success(String),
    Error(String),
}

impl StatusEvent {
    pub fn message(&self) -> &str {
        match self {
            Self::Status(m) | Self::Success(m) | Self::Error(m) => m,
        }
    }

    /// Each accepted submission ends with exactly one terminal event.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Status(_))
    }
}

/// Result of a call to `submit`.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Another request was in flight; nothing happened
    Ignored,
    Succeeded(AirdropReceipt),
    Failed(AirdropError),
}

impl SubmitOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }
}
