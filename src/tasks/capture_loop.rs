//! Capture supervisor.
//!
//! Keeps a speech (or prompt) capture source running while the user wants to
//! listen: every finished transcript goes onto the event bus, and a source
//! that ends its session is restarted unless listening was switched off in
//! the meantime.

use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use inquire::{InquireError, Text};
use log::{info, warn};
use tokio::time::sleep;

use crate::events::queue::EventBus;
use crate::handlers::planner::PlannerEvent;
use crate::models::command::Severity;
use crate::service::notification_service::NotificationSink;

pub const RESTART_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// A finalized transcript.
    Transcript(String),
    /// The current session ended on its own.
    Ended,
    /// The user asked the source itself to stop.
    Interrupted,
}

#[async_trait]
pub trait CaptureSource: Send {
    /// Starts a listening session. Fails when capture is not available.
    async fn start(&mut self) -> Result<(), String>;
    async fn next_event(&mut self) -> CaptureEvent;
}

/// Shared "user wants to listen" switch.
#[derive(Debug, Clone, Default)]
pub struct ListeningFlag(Arc<AtomicBool>);

impl ListeningFlag {
    pub fn new(listening: bool) -> Self {
        Self(Arc::new(AtomicBool::new(listening)))
    }

    pub fn is_listening(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn start(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn stop(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Runs `source` until listening stops, forwarding transcripts to `bus`.
///
/// Returns the number of transcripts forwarded.
pub async fn run_capture_loop<S: CaptureSource + ?Sized>(
    source: &mut S,
    bus: EventBus,
    listening: ListeningFlag,
    sink: Arc<dyn NotificationSink>,
) -> usize {
    if let Err(err) = source.start().await {
        warn!("event=capture_unavailable module=capture error={err}");
        sink.notify(&format!("Voice input is unavailable: {err}"), Severity::Error);
        listening.stop();
        return 0;
    }
    listening.start();
    sink.notify(
        "Listening... Say something like \"schedule meeting at 3pm\"",
        Severity::Info,
    );

    let mut forwarded = 0;
    loop {
        match source.next_event().await {
            CaptureEvent::Transcript(text) => {
                if text.trim().is_empty() {
                    continue;
                }
                if !bus.emit(PlannerEvent::TranscriptReceived { text }).await {
                    warn!("event=capture_stopped module=capture reason=worker_gone");
                    listening.stop();
                    break;
                }
                forwarded += 1;
            }
            CaptureEvent::Ended => {
                if !listening.is_listening() {
                    break;
                }
                sleep(RESTART_DELAY).await;
                if !listening.is_listening() {
                    break;
                }
                if let Err(err) = source.start().await {
                    warn!("event=capture_restart module=capture status=error error={err}");
                    sink.notify(
                        &format!("Voice input failed to restart: {err}"),
                        Severity::Error,
                    );
                    listening.stop();
                    break;
                }
                info!("event=capture_restart module=capture status=ok");
            }
            CaptureEvent::Interrupted => {
                listening.stop();
                break;
            }
        }
    }

    sink.notify("Voice input stopped", Severity::Info);
    forwarded
}

/// Reads typed "transcripts" from an interactive terminal prompt.
///
/// Esc ends the current session (the supervisor restarts it), Ctrl-C stops
/// listening.
pub struct PromptCaptureSource {
    prompt: String,
}

impl PromptCaptureSource {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

#[async_trait]
impl CaptureSource for PromptCaptureSource {
    async fn start(&mut self) -> Result<(), String> {
        if std::io::stdin().is_terminal() {
            Ok(())
        } else {
            Err("stdin is not an interactive terminal".to_string())
        }
    }

    async fn next_event(&mut self) -> CaptureEvent {
        let prompt = self.prompt.clone();
        let answer = tokio::task::spawn_blocking(move || Text::new(&prompt).prompt()).await;
        match answer {
            Ok(Ok(text)) => CaptureEvent::Transcript(text),
            Ok(Err(InquireError::OperationCanceled)) => CaptureEvent::Ended,
            Ok(Err(InquireError::OperationInterrupted)) => CaptureEvent::Interrupted,
            Ok(Err(err)) => {
                warn!("event=capture_prompt module=capture status=error error={err}");
                CaptureEvent::Interrupted
            }
            Err(err) => {
                warn!("event=capture_prompt module=capture status=panicked error={err}");
                CaptureEvent::Interrupted
            }
        }
    }
}
