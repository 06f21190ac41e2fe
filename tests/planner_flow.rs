use std::sync::{Arc, Mutex};

use dayPlanner::handlers::planner::{PlannerEngine, PlannerEvent};
use dayPlanner::models::command::{Outcome, Severity};
use dayPlanner::models::slot::Slot;
use dayPlanner::service::notification_service::NotificationSink;
use dayPlanner::storage::{
    load_schedule, BlobStore, FileBlobStore, MemoryBlobStore, StorageError, SCHEDULE_KEY,
};

#[derive(Default)]
struct CapturingSink {
    messages: Mutex<Vec<(String, Severity)>>,
}

impl CapturingSink {
    fn last(&self) -> Option<(String, Severity)> {
        self.messages.lock().unwrap().last().cloned()
    }

    fn count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

impl NotificationSink for CapturingSink {
    fn notify(&self, message: &str, severity: Severity) {
        self.messages
            .lock()
            .unwrap()
            .push((message.to_string(), severity));
    }
}

struct FailingStore;

impl BlobStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::other("disk full")))
    }
}

fn slot(text: &str) -> Slot {
    Slot::from_canonical(text).unwrap()
}

fn engine_with(blob: Option<&str>) -> (PlannerEngine, Arc<MemoryBlobStore>, Arc<CapturingSink>) {
    let store = Arc::new(MemoryBlobStore::new());
    if let Some(blob) = blob {
        store.set(SCHEDULE_KEY, blob).unwrap();
    }
    let sink = Arc::new(CapturingSink::default());
    let engine = PlannerEngine::load(store.clone(), sink.clone());
    (engine, store, sink)
}

#[test]
fn schedule_meeting_at_3pm() {
    let (mut engine, store, sink) = engine_with(None);

    let outcome = engine.process_command("schedule meeting at 3pm");

    assert_eq!(
        outcome,
        Outcome::Scheduled {
            label: "meeting".to_string(),
            slot: slot("15:00"),
        }
    );
    assert_eq!(
        store.get(SCHEDULE_KEY).unwrap().as_deref(),
        Some(r#"{"15:00":"meeting"}"#)
    );
    assert_eq!(
        sink.last(),
        Some((
            "Scheduled: \"meeting\" at 3:00 PM".to_string(),
            Severity::Success
        ))
    );
}

#[test]
fn dinner_at_seven_oclock_lands_in_the_evening() {
    let (mut engine, _store, _sink) = engine_with(None);
    let outcome = engine.process_command("dinner at 7 o'clock");
    assert_eq!(
        outcome,
        Outcome::Scheduled {
            label: "dinner".to_string(),
            slot: slot("19:00"),
        }
    );
}

#[test]
fn cancel_meeting_at_3pm_empties_the_store() {
    let (mut engine, store, _sink) = engine_with(Some(r#"{"15:00":"meeting"}"#));

    let outcome = engine.process_command("cancel meeting at 3pm");

    assert_eq!(
        outcome,
        Outcome::Cancelled {
            label: "meeting".to_string(),
            slot: slot("15:00"),
        }
    );
    assert!(engine.schedule().is_empty());
    assert_eq!(store.get(SCHEDULE_KEY).unwrap().as_deref(), Some("{}"));
}

#[test]
fn moving_lunch_onto_its_own_slot_is_a_quiet_success() {
    let (mut engine, store, sink) = engine_with(Some(r#"{"13:00":"lunch"}"#));
    store.set(SCHEDULE_KEY, "untouched").unwrap();

    let outcome = engine.process_command("move lunch to 1pm");

    assert_eq!(
        outcome,
        Outcome::Rescheduled {
            label: "lunch".to_string(),
            from: slot("13:00"),
            to: slot("13:00"),
        }
    );
    assert_eq!(engine.schedule().get(slot("13:00")), Some("lunch"));
    assert_eq!(store.get(SCHEDULE_KEY).unwrap().as_deref(), Some("untouched"));
    assert_eq!(sink.last().map(|(_, severity)| severity), Some(Severity::Success));
}

#[test]
fn gibberish_never_mutates() {
    let (mut engine, store, sink) = engine_with(None);

    let outcome = engine.process_command("xyz abc 99:99");

    assert!(matches!(
        outcome,
        Outcome::CommandUnrecognized { .. } | Outcome::TimeUnparseable { .. }
    ));
    assert!(engine.schedule().is_empty());
    assert_eq!(store.get(SCHEDULE_KEY).unwrap(), None);
    assert_eq!(sink.last().map(|(_, severity)| severity), Some(Severity::Error));
}

#[test]
fn second_event_in_same_slot_conflicts() {
    let (mut engine, _store, _sink) = engine_with(None);
    engine.process_command("gym at 7am");
    let before = engine.schedule().clone();

    let outcome = engine.process_command("schedule breakfast at 7:10am");

    assert_eq!(
        outcome,
        Outcome::ConflictAtSlot {
            slot: slot("07:00"),
            existing: "gym".to_string(),
        }
    );
    assert_eq!(engine.schedule(), &before);
}

#[test]
fn failed_save_keeps_memory_state_and_reports() {
    let sink = Arc::new(CapturingSink::default());
    let mut engine = PlannerEngine::load(Arc::new(FailingStore), sink.clone());

    let outcome = engine.process_command("meeting at 2pm");

    assert!(matches!(outcome, Outcome::Scheduled { .. }));
    assert_eq!(engine.schedule().len(), 1);
    let messages = sink.messages.lock().unwrap();
    assert!(messages
        .iter()
        .any(|(msg, severity)| msg.contains("Could not save schedule") && *severity == Severity::Error));
}

#[test]
fn schedule_survives_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let sink = Arc::new(CapturingSink::default());
    {
        let store = Arc::new(FileBlobStore::new(dir.path()));
        let mut engine = PlannerEngine::load(store, sink.clone());
        engine.process_command("book appointment at 10am");
        engine.process_command("9pm movie");
    }

    let store = FileBlobStore::new(dir.path());
    let restored = load_schedule(&store);
    assert_eq!(restored.get(slot("10:00")), Some("appointment"));
    assert_eq!(restored.get(slot("21:00")), Some("movie"));
}

#[test]
fn manual_edits_and_clear_go_through_events() {
    let (mut engine, store, sink) = engine_with(None);

    engine.handle_event(PlannerEvent::SlotEdited {
        slot: slot("06:30"),
        label: "yoga".to_string(),
    });
    assert_eq!(engine.schedule().get(slot("06:30")), Some("yoga"));

    let outcome = engine.handle_event(PlannerEvent::ClearRequested);
    assert_eq!(outcome, Outcome::Cleared { count: 1 });
    assert_eq!(store.get(SCHEDULE_KEY).unwrap().as_deref(), Some("{}"));
    assert_eq!(sink.last().map(|(_, severity)| severity), Some(Severity::Info));
    assert_eq!(sink.count(), 2);
}

#[test]
fn rows_cover_the_whole_grid_in_order() {
    let (mut engine, _store, _sink) = engine_with(None);
    engine.process_command("3pm team call");

    let rows = engine.rows();
    assert_eq!(rows.len(), 37);
    assert_eq!(rows[0].display, "5:00 AM");
    assert_eq!(rows[36].display, "11:00 PM");
    let call = rows.iter().find(|row| row.slot == slot("15:00")).unwrap();
    assert_eq!(call.display, "3:00 PM");
    assert_eq!(call.label.as_deref(), Some("team call"));
    assert_eq!(rows.iter().filter(|row| row.label.is_some()).count(), 1);
}
