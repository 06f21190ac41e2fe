use std::future::Future;
use std::pin::Pin;

use log::error;
use tokio::task::JoinHandle;

type BoxedTask = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Collects named background tasks and spawns them together.
pub struct TaskRunner {
    tasks: Vec<(&'static str, BoxedTask)>,
}

impl TaskRunner {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn add_task<F>(&mut self, name: &'static str, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.push((name, Box::pin(task)));
    }

    pub fn start_all(self) -> RunningTasks {
        let handles = self
            .tasks
            .into_iter()
            .map(|(name, task)| (name, tokio::spawn(task)))
            .collect();
        RunningTasks { handles }
    }
}

impl Default for TaskRunner {
    fn default() -> Self {
        Self::new()
    }
}

pub struct RunningTasks {
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl RunningTasks {
    /// Waits for every task, logging the ones that panicked.
    pub async fn join(self) {
        for (name, handle) in self.handles {
            if let Err(err) = handle.await {
                error!("event=task_failed module=tasks task={name} error={err}");
            }
        }
    }
}
