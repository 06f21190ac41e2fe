use std::sync::Arc;

use log::{debug, error, info};

use crate::models::command::{Outcome, Severity};
use crate::models::schedule::Schedule;
use crate::models::slot::{slot_grid, Slot};
use crate::service::notification_service::{NotificationService, NotificationSink};
use crate::service::resolver::{resolve, Resolution};
use crate::service::routing::{CommandRouter, PatternRouter};
use crate::service::schedule_service::ScheduleService;
use crate::storage::{load_schedule, save_schedule, BlobStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerEvent {
    TranscriptReceived { text: String },
    SlotEdited { slot: Slot, label: String },
    ClearRequested,
}

/// One line of the rendered day: slot, its 12-hour label, and the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRow {
    pub slot: Slot,
    pub display: String,
    pub label: Option<String>,
}

/// Owns the schedule and runs each command to completion:
/// route, resolve, apply, persist, notify.
pub struct PlannerEngine {
    schedule: Schedule,
    store: Arc<dyn BlobStore>,
    sink: Arc<dyn NotificationSink>,
    router: Arc<dyn CommandRouter>,
}

impl PlannerEngine {
    pub fn new(
        schedule: Schedule,
        store: Arc<dyn BlobStore>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            schedule,
            store,
            sink,
            router: Arc::new(PatternRouter),
        }
    }

    /// Builds an engine around the schedule persisted in `store`.
    pub fn load(store: Arc<dyn BlobStore>, sink: Arc<dyn NotificationSink>) -> Self {
        let schedule = load_schedule(store.as_ref());
        Self::new(schedule, store, sink)
    }

    pub fn with_router(mut self, router: Arc<dyn CommandRouter>) -> Self {
        self.router = router;
        self
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn rows(&self) -> Vec<SlotRow> {
        slot_grid()
            .iter()
            .map(|slot| SlotRow {
                slot: *slot,
                display: slot.display_label(),
                label: self.schedule.get(*slot).map(str::to_string),
            })
            .collect()
    }

    pub fn process_command(&mut self, text: &str) -> Outcome {
        debug!("event=command_received module=planner text={text:?}");
        let parsed = self.router.route(text, &self.schedule);
        let outcome = match resolve(&parsed, &self.schedule) {
            Resolution::Apply(mutation) => ScheduleService::apply(&mut self.schedule, mutation),
            Resolution::Reject(outcome) => outcome,
        };
        info!(
            "event=command_processed module=planner intent={:?} success={}",
            parsed.intent(),
            outcome.is_success()
        );
        self.finish(outcome)
    }

    pub fn clear_all(&mut self) -> Outcome {
        let outcome = ScheduleService::clear_all(&mut self.schedule);
        self.finish(outcome)
    }

    pub fn edit_slot(&mut self, slot: Slot, label: &str) -> Outcome {
        let outcome = ScheduleService::edit(&mut self.schedule, slot, label);
        self.finish(outcome)
    }

    pub fn handle_event(&mut self, event: PlannerEvent) -> Outcome {
        match event {
            PlannerEvent::TranscriptReceived { text } => self.process_command(&text),
            PlannerEvent::SlotEdited { slot, label } => self.edit_slot(slot, &label),
            PlannerEvent::ClearRequested => self.clear_all(),
        }
    }

    fn finish(&mut self, outcome: Outcome) -> Outcome {
        if outcome.is_mutation() {
            self.persist();
        }
        NotificationService::notify(self.sink.as_ref(), &outcome);
        outcome
    }

    fn persist(&self) {
        if let Err(err) = save_schedule(self.store.as_ref(), &self.schedule) {
            error!("event=schedule_save module=planner status=error error={err}");
            self.sink
                .notify(&format!("Could not save schedule: {err}"), Severity::Error);
        }
    }
}
