use std::sync::Arc;

use log::info;
use tokio::sync::{mpsc, Mutex};

use crate::handlers::planner::{PlannerEngine, PlannerEvent};

/// Applies events one at a time until every [`EventBus`](crate::events::queue::EventBus)
/// handle has been dropped.
pub async fn run_event_worker(
    mut rx: mpsc::Receiver<PlannerEvent>,
    engine: Arc<Mutex<PlannerEngine>>,
) {
    while let Some(event) = rx.recv().await {
        let mut engine = engine.lock().await;
        engine.handle_event(event);
    }
    info!("event=worker_stopped module=events");
}
