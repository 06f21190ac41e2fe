use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::models::slot::Slot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Schedule,
    Reschedule,
    Cancel,
    Unknown,
}

/// Structured reading of one raw command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    Schedule {
        event_text: String,
        time_text: String,
    },
    Reschedule {
        event_query: String,
        from_time_text: Option<String>,
        time_text: String,
    },
    /// `target` is either an event query or a time expression. When
    /// `event_text` is present, `target` is the time and the event at that
    /// time must contain `event_text`.
    Cancel {
        target: String,
        event_text: Option<String>,
    },
    Unrecognized {
        original_text: String,
    },
}

impl ParsedCommand {
    pub fn intent(&self) -> Intent {
        match self {
            Self::Schedule { .. } => Intent::Schedule,
            Self::Reschedule { .. } => Intent::Reschedule,
            Self::Cancel { .. } => Intent::Cancel,
            Self::Unrecognized { .. } => Intent::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// Result of processing one command or manual edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Scheduled {
        label: String,
        slot: Slot,
    },
    Rescheduled {
        label: String,
        from: Slot,
        to: Slot,
    },
    Cancelled {
        label: String,
        slot: Slot,
    },
    Edited {
        slot: Slot,
        label: Option<String>,
    },
    Cleared {
        count: usize,
    },
    ConflictAtSlot {
        slot: Slot,
        existing: String,
    },
    EventNotFound {
        query: String,
    },
    TimeUnparseable {
        time_text: String,
    },
    NoSlotWithinRange {
        time_text: String,
        time: NaiveTime,
    },
    CommandUnrecognized {
        text: String,
    },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Self::Scheduled { .. }
                | Self::Rescheduled { .. }
                | Self::Cancelled { .. }
                | Self::Edited { .. }
                | Self::Cleared { .. }
        )
    }

    /// True when the outcome changed the schedule and must be persisted.
    pub fn is_mutation(&self) -> bool {
        match self {
            Self::Rescheduled { from, to, .. } => from != to,
            Self::Cleared { count } => *count > 0,
            other => other.is_success(),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::Cleared { .. } => Severity::Info,
            other if other.is_success() => Severity::Success,
            _ => Severity::Error,
        }
    }
}
