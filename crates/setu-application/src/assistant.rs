//! AI differential-diagnosis driver: submit, poll, parse, reset.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use setu_core::diagnosis::{
    parse_suggestions, DiagnosisApi, JobStatus, PollSchedule, MAX_POLL_ATTEMPTS, POLL_INTERVAL,
};
use setu_core::{Result, SetuError};
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::events::FlowEvent;

/// Drives one AI diagnosis job at a time.
///
/// Submission creates the job and spawns a poll loop that re-fetches the
/// status on a fixed interval until the server resolves the job or the
/// attempt ceiling is reached. Reset cancels the loop; a generation counter
/// guards against a response that was already in flight when the reset
/// happened; such responses are discarded, never applied.
pub struct AssistantService {
    api: Arc<dyn DiagnosisApi>,
    events: UnboundedSender<FlowEvent>,
    interval: Duration,
    max_attempts: u32,
    cancel: Mutex<Option<CancellationToken>>,
    generation: AtomicU64,
}

impl AssistantService {
    pub fn new(api: Arc<dyn DiagnosisApi>, events: UnboundedSender<FlowEvent>) -> Self {
        Self::with_limits(api, events, POLL_INTERVAL, MAX_POLL_ATTEMPTS)
    }

    /// Custom poll interval and ceiling, for tests.
    pub fn with_limits(
        api: Arc<dyn DiagnosisApi>,
        events: UnboundedSender<FlowEvent>,
        interval: Duration,
        max_attempts: u32,
    ) -> Self {
        Self {
            api,
            events,
            interval,
            max_attempts,
            cancel: Mutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// Submits symptom text and starts polling.
    ///
    /// Empty text is rejected before any request. A submission supersedes
    /// any poll loop still running from a previous job.
    pub async fn submit(self: &Arc<Self>, symptoms: &str) -> Result<()> {
        let symptoms = symptoms.trim();
        if symptoms.is_empty() {
            return Err(SetuError::validation(
                "Please enter clinical notes or symptoms.",
            ));
        }

        self.reset().await;

        let handle = match self.api.create_job(symptoms).await {
            Ok(handle) => handle,
            Err(err) => {
                if err.is_auth_failure() {
                    let _ = self.events.send(FlowEvent::SessionExpired);
                }
                return Err(err);
            }
        };

        let _ = self.events.send(FlowEvent::JobCreated {
            job_id: handle.job_id.clone(),
            status: handle.status,
        });

        let cancel = CancellationToken::new();
        *self.cancel.lock().await = Some(cancel.clone());
        let generation = self.generation.load(Ordering::SeqCst);

        let service = Arc::clone(self);
        tokio::spawn(async move {
            service.poll_loop(handle.job_id, cancel, generation).await;
        });

        Ok(())
    }

    /// Cancels any running poll loop and invalidates in-flight responses.
    pub async fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(token) = self.cancel.lock().await.take() {
            token.cancel();
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    async fn poll_loop(&self, job_id: String, cancel: CancellationToken, generation: u64) {
        let mut schedule = PollSchedule::with_limits(self.interval, self.max_attempts);
        loop {
            let Some(attempt) = schedule.next_attempt() else {
                if self.is_current(generation) {
                    let _ = self.events.send(FlowEvent::AssistantExhausted);
                }
                return;
            };

            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep(self.interval) => {}
            }

            let snapshot = match self.api.job_status(&job_id).await {
                Ok(snapshot) => snapshot,
                Err(err) => {
                    // The response may have raced a reset; a stale error
                    // must not disturb the fresh state.
                    if !self.is_current(generation) {
                        return;
                    }
                    if err.is_auth_failure() {
                        let _ = self.events.send(FlowEvent::SessionExpired);
                    }
                    tracing::warn!(%err, job_id, "job status poll failed");
                    let _ = self
                        .events
                        .send(FlowEvent::AssistantFailed("Failed to get job status.".to_string()));
                    return;
                }
            };

            if !self.is_current(generation) || cancel.is_cancelled() {
                return;
            }

            let _ = self.events.send(FlowEvent::JobStatusChanged {
                status: snapshot.status,
                attempt,
            });

            match snapshot.status {
                JobStatus::Completed => {
                    let event = match snapshot.prompt.as_deref() {
                        Some(raw) => FlowEvent::DiagnosesReady(parse_suggestions(raw)),
                        None => FlowEvent::AssistantFailed(
                            "AI diagnosis returned no output.".to_string(),
                        ),
                    };
                    let _ = self.events.send(event);
                    return;
                }
                JobStatus::Failed => {
                    let reason = snapshot
                        .error
                        .unwrap_or_else(|| "AI diagnosis failed.".to_string());
                    let _ = self.events.send(FlowEvent::AssistantFailed(reason));
                    return;
                }
                JobStatus::Pending | JobStatus::Processing => {}
            }
        }
    }
}
