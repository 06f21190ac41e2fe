//! Pure command resolution.
//!
//! Decides what a parsed command would do to the schedule without touching
//! it. Failures come back as finished [`Outcome`]s; successes as a
//! [`Mutation`] for [`ScheduleService::apply`](crate::service::schedule_service::ScheduleService::apply).

use crate::models::command::{Outcome, ParsedCommand};
use crate::models::schedule::Schedule;
use crate::models::slot::Slot;
use crate::service::time_parser::{normalize_time, TimeError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Schedule { slot: Slot, label: String },
    Cancel { slot: Slot },
    Reschedule { from: Slot, to: Slot },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Apply(Mutation),
    Reject(Outcome),
}

pub fn resolve(command: &ParsedCommand, schedule: &Schedule) -> Resolution {
    match command {
        ParsedCommand::Schedule {
            event_text,
            time_text,
        } => {
            let slot = match normalize_time(time_text) {
                Ok(slot) => slot,
                Err(err) => return Resolution::Reject(time_rejection(time_text, err)),
            };
            if let Some(existing) = schedule.get(slot) {
                return Resolution::Reject(Outcome::ConflictAtSlot {
                    slot,
                    existing: existing.to_string(),
                });
            }
            Resolution::Apply(Mutation::Schedule {
                slot,
                label: event_text.clone(),
            })
        }
        ParsedCommand::Reschedule {
            event_query,
            from_time_text,
            time_text,
        } => {
            let to = match normalize_time(time_text) {
                Ok(slot) => slot,
                Err(err) => return Resolution::Reject(time_rejection(time_text, err)),
            };
            let stated_slot = from_time_text
                .as_deref()
                .and_then(|text| normalize_time(text).ok())
                .filter(|slot| schedule.label_at_contains(*slot, event_query));
            let Some(from) = stated_slot.or_else(|| schedule.find_by_label_substring(event_query))
            else {
                return Resolution::Reject(Outcome::EventNotFound {
                    query: event_query.clone(),
                });
            };
            if from != to {
                if let Some(existing) = schedule.get(to) {
                    return Resolution::Reject(Outcome::ConflictAtSlot {
                        slot: to,
                        existing: existing.to_string(),
                    });
                }
            }
            Resolution::Apply(Mutation::Reschedule { from, to })
        }
        ParsedCommand::Cancel { target, event_text } => {
            match cancel_target(target, event_text.as_deref(), schedule) {
                Some(slot) => Resolution::Apply(Mutation::Cancel { slot }),
                None => {
                    let query = match event_text {
                        Some(event) => format!("{event} at {target}"),
                        None => target.clone(),
                    };
                    Resolution::Reject(Outcome::EventNotFound { query })
                }
            }
        }
        ParsedCommand::Unrecognized { original_text } => {
            Resolution::Reject(Outcome::CommandUnrecognized {
                text: original_text.clone(),
            })
        }
    }
}

/// Finds the slot a cancel command refers to.
///
/// With `event_text`, `target` is a time and the event there must contain
/// `event_text`. Without it, `target` is tried as a time first and then as
/// a label substring.
pub fn cancel_target(target: &str, event_text: Option<&str>, schedule: &Schedule) -> Option<Slot> {
    match event_text {
        Some(event) => normalize_time(target)
            .ok()
            .filter(|slot| schedule.label_at_contains(*slot, event)),
        None => normalize_time(target)
            .ok()
            .filter(|slot| schedule.is_occupied(*slot))
            .or_else(|| schedule.find_by_label_substring(target)),
    }
}

fn time_rejection(time_text: &str, err: TimeError) -> Outcome {
    match err {
        TimeError::NoSlotWithinRange(time) => Outcome::NoSlotWithinRange {
            time_text: time_text.to_string(),
            time,
        },
        TimeError::Malformed(_) | TimeError::OutOfRange { .. } => Outcome::TimeUnparseable {
            time_text: time_text.to_string(),
        },
    }
}
