use log::{log, Level};

use crate::models::command::{Outcome, Severity};
use crate::models::slot::{format_display, slot_grid};

pub const SUPPORTED_FORMATS_HINT: &str =
    "Try saying times like \"3pm\", \"3:30pm\", \"15:30\" or \"7 o'clock\"";

pub const VOICE_COMMAND_EXAMPLES: &str = "\
Scheduling:
  schedule meeting at 3pm
  add lunch at 12:30pm
  meeting at 2pm
  3pm team call
  dinner at 7 o'clock
  15:30 workout
  book appointment at 10am

Rescheduling:
  reschedule meeting to 4pm
  move lunch to 1pm
  change meeting at 3pm to 5pm

Cancelling:
  cancel meeting at 3pm
  delete lunch
  remove 2pm meeting
  cancel the event at 4pm

Supported time formats: 3pm, 3:30pm, 15:30, 3 o'clock
Time range: 5:00 AM - 11:00 PM";

/// Receives one user-facing message per processed command.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

/// Sends notifications to the log.
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, message: &str, severity: Severity) {
        let level = match severity {
            Severity::Info | Severity::Success => Level::Info,
            Severity::Error => Level::Warn,
        };
        log!(level, "event=notification module=planner severity={severity} message={message:?}");
    }
}

/// Prints notifications to the terminal.
pub struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Error => eprintln!("[{severity}] {message}"),
            _ => println!("[{severity}] {message}"),
        }
    }
}

pub struct NotificationService;

impl NotificationService {
    pub fn build_message(outcome: &Outcome) -> String {
        match outcome {
            Outcome::Scheduled { label, slot } => {
                format!("Scheduled: \"{}\" at {}", label, slot.display_label())
            }
            Outcome::Rescheduled { label, from, to } if from == to => {
                format!("\"{}\" is already at {}", label, to.display_label())
            }
            Outcome::Rescheduled { label, from, to } => format!(
                "Rescheduled: \"{}\" from {} to {}",
                label,
                from.display_label(),
                to.display_label()
            ),
            Outcome::Cancelled { label, slot } => {
                format!("Cancelled: \"{}\" at {}", label, slot.display_label())
            }
            Outcome::Edited {
                slot,
                label: Some(label),
            } => format!("Updated {}: \"{}\"", slot.display_label(), label),
            Outcome::Edited { slot, label: None } => {
                format!("Cleared {}", slot.display_label())
            }
            Outcome::Cleared { count } => format!("All events cleared ({count} removed)"),
            Outcome::ConflictAtSlot { slot, existing } => format!(
                "There's already an event at {} (\"{}\"). Use \"reschedule\" to move it or choose a different time.",
                slot.display_label(),
                existing
            ),
            Outcome::EventNotFound { query } => format!("Could not find event: \"{query}\""),
            Outcome::TimeUnparseable { time_text } => {
                format!("Invalid time: \"{time_text}\". {SUPPORTED_FORMATS_HINT}")
            }
            Outcome::NoSlotWithinRange { time_text, time } => {
                let (first, last) = grid_bounds();
                format!(
                    "No time slot near \"{}\" ({}). The day runs from {} to {}",
                    time_text,
                    format_display(*time),
                    first,
                    last
                )
            }
            Outcome::CommandUnrecognized { text } => format!(
                "Could not understand command: \"{text}\". Try saying \"schedule meeting at 3pm\" or \"meeting at 3:30pm\""
            ),
        }
    }

    pub fn notify(sink: &dyn NotificationSink, outcome: &Outcome) {
        sink.notify(&Self::build_message(outcome), outcome.severity());
    }
}

fn grid_bounds() -> (String, String) {
    let grid = slot_grid();
    let first = grid.first().map(|slot| slot.display_label()).unwrap_or_default();
    let last = grid.last().map(|slot| slot.display_label()).unwrap_or_default();
    (first, last)
}
