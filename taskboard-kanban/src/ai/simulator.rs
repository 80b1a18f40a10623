//! Time-simulated AI execution
//!
//! There is no real AI backend. Starting a run schedules a tokio task that
//! sleeps for the run's ETA and then commits `success`, provided the task is
//! still running the same attempt (same `ai_started_at`). Any transition in
//! the meantime (cancel, fail, a retry that restarts the clock) supersedes
//! the pending completion.

use super::machine::TransitionOutcome;
use crate::error::Result;
use crate::store::TaskStore;
use crate::types::{AiState, TaskId};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Store handle shared between the owner and simulated completions
pub type SharedStore = Arc<Mutex<TaskStore>>;

/// How a scheduled completion ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatedCompletion {
    /// `success` was committed
    Succeeded,
    /// The attempt was cancelled, failed, restarted or removed first
    Superseded,
}

/// A started run and, when it is running, its scheduled completion
#[derive(Debug)]
pub struct SimulatedRun {
    pub outcome: TransitionOutcome,
    pub completion: Option<JoinHandle<SimulatedCompletion>>,
}

impl SimulatedRun {
    /// Wait for the scheduled completion, `None` when nothing was scheduled
    pub async fn wait(self) -> Option<SimulatedCompletion> {
        match self.completion {
            Some(handle) => Some(handle.await.unwrap_or(SimulatedCompletion::Superseded)),
            None => None,
        }
    }

    /// Drop the scheduled completion without touching the store
    pub fn abort(&self) {
        if let Some(handle) = &self.completion {
            handle.abort();
        }
    }
}

/// Request a run (blocking on missing parameters) and schedule its completion
pub async fn start_run(store: &SharedStore, id: &TaskId) -> Result<SimulatedRun> {
    let outcome = store.lock().await.request_run(id)?;
    let completion = schedule_completion(store, id).await;
    Ok(SimulatedRun { outcome, completion })
}

/// Retry a failed or blocked run and schedule its completion
pub async fn retry_run(store: &SharedStore, id: &TaskId) -> Result<SimulatedRun> {
    let outcome = store.lock().await.retry(id)?;
    let completion = schedule_completion(store, id).await;
    Ok(SimulatedRun { outcome, completion })
}

/// Schedule completion for a task that is currently running
pub async fn schedule_completion(
    store: &SharedStore,
    id: &TaskId,
) -> Option<JoinHandle<SimulatedCompletion>> {
    let (started_at, eta) = {
        let guard = store.lock().await;
        let task = guard.task(id)?;
        if task.effective_ai_state() != Some(AiState::Running) {
            return None;
        }
        (task.ai_started_at?, task.ai_eta_seconds.unwrap_or(0))
    };

    tracing::debug!(task = %id, eta_seconds = eta, "scheduling simulated completion");
    let store = Arc::clone(store);
    let id = id.clone();
    Some(tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(u64::from(eta))).await;
        complete(&store, &id, started_at).await
    }))
}

async fn complete(store: &SharedStore, id: &TaskId, started_at: DateTime<Utc>) -> SimulatedCompletion {
    let mut guard = store.lock().await;

    let same_attempt = guard.task(id).is_some_and(|task| {
        task.effective_ai_state() == Some(AiState::Running) && task.ai_started_at == Some(started_at)
    });
    if !same_attempt {
        tracing::debug!(task = %id, "simulated completion superseded");
        return SimulatedCompletion::Superseded;
    }

    match guard.succeed(id) {
        Ok(outcome) if outcome.is_applied() => SimulatedCompletion::Succeeded,
        Ok(_) => SimulatedCompletion::Superseded,
        Err(e) => {
            tracing::warn!(task = %id, error = %e, "simulated completion failed");
            SimulatedCompletion::Superseded
        }
    }
}
