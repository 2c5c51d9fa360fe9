//! Triggerable actions and the state machine behind their buttons.
//!
//! Two actions can be requested from the dashboard: a hardware self-test of
//! the whole pool and a reload of the relay configuration. Both are
//! fire-and-forget on the backend: the trigger request only queues the work,
//! and progress is observed through the flags of later board polls.
//!
//! ```text
//!            click                 trigger ok
//!   Idle ────────────▶ Submitting ────────────▶ ServerQueued
//!    ▲                     │                        │
//!    │  cooldown elapsed   │ trigger rejected       │ poll: running
//!    ├──────────────── Rejected ◀─┘                 ▼
//!    │                                        ServerRunning
//!    └──────────── poll: neither queued nor running ┘
//! ```
//!
//! Poll observations override any local state: `running` always wins,
//! `queued` wins over everything but `running`. An idle observation only
//! resets states the server could have seen; it is ignored while a trigger
//! request is still in flight and while a rejection is on display.

use serde::{Deserialize, Serialize};

/// Label shown while the trigger request is in flight.
pub const SUBMITTING_LABEL: &str = "Queuing...";

/// Label shown for a rejection that came without an error message.
pub const GENERIC_ERROR_LABEL: &str = "Error";

/// An operation the dashboard user can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    HardwareTest,
    ConfigReload,
}

impl ActionKind {
    pub const ALL: [Self; 2] = [Self::HardwareTest, Self::ConfigReload];

    /// Stable short name, used in routes and element ids.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::HardwareTest => "hwtest",
            Self::ConfigReload => "config-reload",
        }
    }

    /// Button label when the action can be requested.
    #[must_use]
    pub fn idle_label(self) -> &'static str {
        match self {
            Self::HardwareTest => "Run HW Test",
            Self::ConfigReload => "Reload Config",
        }
    }

    /// Button label once the server has accepted the request.
    #[must_use]
    pub fn queued_label(self) -> &'static str {
        match self {
            Self::HardwareTest => "Queued...",
            Self::ConfigReload => "Reloading...",
        }
    }

    /// Button label while the server reports the action as executing.
    #[must_use]
    pub fn running_label(self) -> &'static str {
        match self {
            Self::HardwareTest => "Testing...",
            Self::ConfigReload => "Reloading...",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// Server-reported progress of an action, recomputed from every board poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionStatus {
    #[default]
    Idle,
    /// Requested but not yet picked up (`hwtest_trigger`, `config_reload_pending`).
    Requested,
    /// Currently executing (`hwtest_running`).
    Running,
}

impl ActionStatus {
    /// Fold the backend's two booleans; `running` takes precedence.
    #[must_use]
    pub fn from_flags(running: bool, requested: bool) -> Self {
        if running {
            Self::Running
        } else if requested {
            Self::Requested
        } else {
            Self::Idle
        }
    }
}

/// Body of `POST /api/hwtest/trigger` and `POST /api/config/reload`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// What became of a trigger request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    Accepted,
    /// Rejected by the backend or lost in transport; carries the text to show.
    Rejected(String),
}

impl TriggerOutcome {
    /// A rejection with the generic error label.
    #[must_use]
    pub fn failed() -> Self {
        Self::Rejected(GENERIC_ERROR_LABEL.to_string())
    }
}

impl From<TriggerResponse> for TriggerOutcome {
    fn from(response: TriggerResponse) -> Self {
        if response.ok {
            return Self::Accepted;
        }
        match response.error.filter(|message| !message.trim().is_empty()) {
            Some(message) => Self::Rejected(message),
            None => Self::failed(),
        }
    }
}

/// Proof that a click was accepted; identifies the request it started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub kind: ActionKind,
    ticket: u64,
}

/// Current state of an action button.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActionState {
    #[default]
    Idle,
    Submitting {
        ticket: u64,
    },
    Rejected {
        ticket: u64,
        message: String,
    },
    ServerQueued,
    ServerRunning,
}

/// What the button should look like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonView {
    pub label: String,
    pub disabled: bool,
}

/// State machine for one action button.
///
/// Every method is a transition attempt; transitions that are not valid for
/// the current state are no-ops and report `false`.
#[derive(Debug, Clone)]
pub struct ActionMachine {
    kind: ActionKind,
    state: ActionState,
    next_ticket: u64,
}

impl ActionMachine {
    #[must_use]
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            state: ActionState::Idle,
            next_ticket: 0,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    #[must_use]
    pub fn state(&self) -> &ActionState {
        &self.state
    }

    /// User click. Only accepted from [`ActionState::Idle`]; the returned
    /// [`Submission`] is the licence to send exactly one trigger request.
    pub fn click(&mut self) -> Option<Submission> {
        if self.state != ActionState::Idle {
            return None;
        }
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.state = ActionState::Submitting { ticket };
        Some(Submission {
            kind: self.kind,
            ticket,
        })
    }

    /// The trigger request for `submission` completed.
    ///
    /// Ignored unless the machine is still waiting on that very request (a
    /// poll may already have moved it on).
    pub fn resolve(&mut self, submission: Submission, outcome: TriggerOutcome) -> bool {
        let ActionState::Submitting { ticket } = self.state else {
            return false;
        };
        if ticket != submission.ticket {
            return false;
        }
        self.state = match outcome {
            TriggerOutcome::Accepted => ActionState::ServerQueued,
            TriggerOutcome::Rejected(message) => ActionState::Rejected { ticket, message },
        };
        true
    }

    /// The error cooldown started by rejecting `submission` is over.
    pub fn cooldown_elapsed(&mut self, submission: Submission) -> bool {
        match self.state {
            ActionState::Rejected { ticket, .. } if ticket == submission.ticket => {
                self.state = ActionState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Apply the server-side status seen by a board poll.
    pub fn observe(&mut self, status: ActionStatus) -> bool {
        let next = match status {
            ActionStatus::Running => ActionState::ServerRunning,
            ActionStatus::Requested => ActionState::ServerQueued,
            ActionStatus::Idle => match self.state {
                ActionState::Submitting { .. } | ActionState::Rejected { .. } => return false,
                _ => ActionState::Idle,
            },
        };
        if next == self.state {
            return false;
        }
        self.state = next;
        true
    }

    /// Presentation of the current state.
    #[must_use]
    pub fn button(&self) -> ButtonView {
        let (label, disabled) = match &self.state {
            ActionState::Idle => (self.kind.idle_label(), false),
            ActionState::Submitting { .. } => (SUBMITTING_LABEL, true),
            ActionState::Rejected { message, .. } => (message.as_str(), true),
            ActionState::ServerQueued => (self.kind.queued_label(), true),
            ActionState::ServerRunning => (self.kind.running_label(), true),
        };
        ButtonView {
            label: label.to_string(),
            disabled,
        }
    }
}
