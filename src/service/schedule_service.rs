use log::info;

use crate::models::command::Outcome;
use crate::models::schedule::Schedule;
use crate::models::slot::Slot;
use crate::service::resolver::Mutation;

/// The only writer of [`Schedule`]. Each call either applies completely or
/// leaves the schedule untouched and reports why.
pub struct ScheduleService;

impl ScheduleService {
    /// Inserts `label` at a free slot. `label` is expected to be non-blank.
    pub fn schedule(schedule: &mut Schedule, slot: Slot, label: &str) -> Outcome {
        if let Some(existing) = schedule.get(slot) {
            return Outcome::ConflictAtSlot {
                slot,
                existing: existing.to_string(),
            };
        }
        let label = label.trim().to_string();
        schedule.insert(slot, label.clone());
        info!("event=event_scheduled module=schedule_service slot={slot}");
        Outcome::Scheduled { label, slot }
    }

    pub fn cancel(schedule: &mut Schedule, slot: Slot) -> Outcome {
        match schedule.remove(slot) {
            Some(label) => {
                info!("event=event_cancelled module=schedule_service slot={slot}");
                Outcome::Cancelled { label, slot }
            }
            None => Outcome::EventNotFound {
                query: slot.to_string(),
            },
        }
    }

    /// Moves the event at `from` to `to`. Moving an event onto its own slot
    /// succeeds without changes.
    pub fn reschedule(schedule: &mut Schedule, from: Slot, to: Slot) -> Outcome {
        let Some(label) = schedule.get(from).map(str::to_string) else {
            return Outcome::EventNotFound {
                query: from.to_string(),
            };
        };
        if from == to {
            return Outcome::Rescheduled { label, from, to };
        }
        if let Some(existing) = schedule.get(to) {
            return Outcome::ConflictAtSlot {
                slot: to,
                existing: existing.to_string(),
            };
        }
        schedule.remove(from);
        schedule.insert(to, label.clone());
        info!("event=event_rescheduled module=schedule_service from={from} to={to}");
        Outcome::Rescheduled { label, from, to }
    }

    /// Empties the schedule. Confirmation is the caller's concern.
    pub fn clear_all(schedule: &mut Schedule) -> Outcome {
        let count = schedule.clear();
        info!("event=schedule_cleared module=schedule_service count={count}");
        Outcome::Cleared { count }
    }

    /// Manual edit of one slot: overwrites the label, a blank label clears it.
    pub fn edit(schedule: &mut Schedule, slot: Slot, label: &str) -> Outcome {
        let label = label.trim();
        if label.is_empty() {
            schedule.remove(slot);
            info!("event=slot_edited module=schedule_service slot={slot} cleared=true");
            return Outcome::Edited { slot, label: None };
        }
        schedule.insert(slot, label.to_string());
        info!("event=slot_edited module=schedule_service slot={slot} cleared=false");
        Outcome::Edited {
            slot,
            label: Some(label.to_string()),
        }
    }

    pub fn apply(schedule: &mut Schedule, mutation: Mutation) -> Outcome {
        match mutation {
            Mutation::Schedule { slot, label } => Self::schedule(schedule, slot, &label),
            Mutation::Cancel { slot } => Self::cancel(schedule, slot),
            Mutation::Reschedule { from, to } => Self::reschedule(schedule, from, to),
        }
    }
}
