//! AI workflow transition table
//!
//! | event           | from                        | to               |
//! |-----------------|-----------------------------|------------------|
//! | `Run`           | pending, requires_oauth     | running          |
//! | `Run`           | blocked                     | refused (guard)  |
//! | `Success`       | running                     | success          |
//! | `Fail`          | running                     | failed           |
//! | `Retry`         | failed, blocked             | running          |
//! | `Cancel`        | running                     | pending          |
//! | `RequireOauth`  | any                         | requires_oauth   |
//! | `ResolveOauth`  | requires_oauth              | pending          |
//! | `SetBlocked`    | any                         | blocked          |
//! | `SetPending`    | any                         | pending          |
//!
//! Every other pair is refused and leaves the task untouched. `Run` from
//! blocked is refused until the missing parameters are supplied, while
//! `Retry` from blocked goes ahead.

use crate::activity::Operation;
use crate::types::AiState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An event driving the AI workflow state machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AiEvent {
    Run,
    Success,
    Fail { error: String },
    Retry,
    Cancel,
    RequireOauth,
    ResolveOauth,
    SetBlocked { missing: Vec<String> },
    SetPending,
}

impl AiEvent {
    pub fn fail(error: impl Into<String>) -> Self {
        Self::Fail {
            error: error.into(),
        }
    }

    pub fn set_blocked<I, S>(missing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::SetBlocked {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }
}

impl Operation for AiEvent {
    fn verb(&self) -> &'static str {
        match self {
            Self::Run => "run",
            Self::Success => "succeed",
            Self::Fail { .. } => "fail",
            Self::Retry => "retry",
            Self::Cancel => "cancel",
            Self::RequireOauth => "require_oauth",
            Self::ResolveOauth => "resolve_oauth",
            Self::SetBlocked { .. } => "block",
            Self::SetPending => "reset",
        }
    }

    fn noun(&self) -> &'static str {
        "workflow"
    }
}

/// Why an event did not change the state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefusalReason {
    /// `Run` while blocked on missing parameters
    MissingParams,
    /// The event is not valid from the current state
    InvalidFromState,
}

impl fmt::Display for RefusalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingParams => f.write_str("required parameters are missing"),
            Self::InvalidFromState => f.write_str("event not valid from current state"),
        }
    }
}

/// Result of feeding an event to a task's workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransitionOutcome {
    Applied { from: AiState, to: AiState },
    Refused { state: AiState, reason: RefusalReason },
}

impl TransitionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// State after the event
    pub fn state(&self) -> AiState {
        match self {
            Self::Applied { to, .. } => *to,
            Self::Refused { state, .. } => *state,
        }
    }
}

/// Look up the transition for `event` from `state`
pub fn next_state(state: AiState, event: &AiEvent) -> Result<AiState, RefusalReason> {
    use AiState::*;

    match (event, state) {
        (AiEvent::Run, Pending | RequiresOauth) => Ok(Running),
        (AiEvent::Run, Blocked) => Err(RefusalReason::MissingParams),
        (AiEvent::Success, Running) => Ok(Success),
        (AiEvent::Fail { .. }, Running) => Ok(Failed),
        (AiEvent::Retry, Failed | Blocked) => Ok(Running),
        (AiEvent::Cancel, Running) => Ok(Pending),
        (AiEvent::RequireOauth, _) => Ok(RequiresOauth),
        (AiEvent::ResolveOauth, RequiresOauth) => Ok(Pending),
        (AiEvent::SetBlocked { .. }, _) => Ok(Blocked),
        (AiEvent::SetPending, _) => Ok(Pending),
        _ => Err(RefusalReason::InvalidFromState),
    }
}
