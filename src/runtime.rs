use std::sync::Arc;

use tokio::sync::Mutex;

use crate::events::queue::EventBus;
use crate::events::worker::run_event_worker;
use crate::handlers::planner::PlannerEngine;
use crate::service::notification_service::NotificationSink;
use crate::tasks::capture_loop::{run_capture_loop, CaptureSource, ListeningFlag};
use crate::tasks::task_runner::TaskRunner;

const EVENT_BUFFER: usize = 32;

/// Runs the capture supervisor and the event worker until listening stops
/// and every queued command has been applied.
pub async fn run_listen<S>(
    engine: Arc<Mutex<PlannerEngine>>,
    mut source: S,
    listening: ListeningFlag,
    sink: Arc<dyn NotificationSink>,
) where
    S: CaptureSource + 'static,
{
    let (bus, rx) = EventBus::new(EVENT_BUFFER);

    let mut task_runner = TaskRunner::new();
    task_runner.add_task("event_worker", run_event_worker(rx, engine));
    task_runner.add_task("capture_loop", async move {
        run_capture_loop(&mut source, bus, listening, sink).await;
    });
    task_runner.start_all().join().await;
}
