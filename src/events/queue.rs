use tokio::sync::mpsc;

use crate::handlers::planner::PlannerEvent;

#[derive(Clone)]
pub struct EventBus {
    tx: mpsc::Sender<PlannerEvent>,
}

impl EventBus {
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<PlannerEvent>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self { tx }, rx)
    }

    /// Queues an event for the worker. Returns false once the worker is gone.
    pub async fn emit(&self, event: PlannerEvent) -> bool {
        self.tx.send(event).await.is_ok()
    }
}
