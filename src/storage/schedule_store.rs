use std::collections::HashMap;

use log::{info, warn};

use crate::models::schedule::Schedule;
use crate::models::slot::Slot;
use crate::storage::blob::{BlobStore, StorageError};

/// Blob key holding the schedule as a `{"HH:MM": "label"}` JSON object.
pub const SCHEDULE_KEY: &str = "calendarEvents";

/// Restores the schedule. Missing, unreadable or corrupt data yields an
/// empty schedule; entries outside the slot grid or with blank labels are
/// dropped.
pub fn load_schedule(store: &dyn BlobStore) -> Schedule {
    let raw = match store.get(SCHEDULE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Schedule::new(),
        Err(err) => {
            warn!("event=schedule_load module=storage status=error error={err}");
            return Schedule::new();
        }
    };

    let entries: HashMap<String, String> = match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("event=schedule_load module=storage status=corrupt error={err}");
            return Schedule::new();
        }
    };

    let total = entries.len();
    let schedule: Schedule = entries
        .into_iter()
        .filter_map(|(key, label)| {
            let slot = Slot::from_canonical(&key)?;
            let label = label.trim();
            (!label.is_empty()).then(|| (slot, label.to_string()))
        })
        .collect();

    if schedule.len() < total {
        warn!(
            "event=schedule_load module=storage status=partial dropped={}",
            total - schedule.len()
        );
    }
    info!(
        "event=schedule_load module=storage status=ok events={}",
        schedule.len()
    );
    schedule
}

/// Overwrites the stored schedule with `schedule`.
pub fn save_schedule(store: &dyn BlobStore, schedule: &Schedule) -> Result<(), StorageError> {
    let payload = serde_json::to_string(schedule)?;
    store.set(SCHEDULE_KEY, &payload)
}
