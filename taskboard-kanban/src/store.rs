//! TaskStore: the canonical board, its mutations and persistence
//!
//! Every mutation runs a reducer over the current [`BoardState`], swaps the
//! result in, persists a snapshot and appends to the activity log. Failed
//! operations leave the board untouched and are logged with their error.
//! Persistence failures are logged and never fail the mutation.

use crate::activity::{ActivityLog, LogEntry, Operation};
use crate::ai::{AiEvent, TransitionContext, TransitionOutcome, TransitionTask};
use crate::column::{AddColumn, RemoveColumn, SetColumns, UpdateColumn};
use crate::command::Reduction;
use crate::error::Result;
use crate::logging::Pretty;
use crate::storage::{decode_snapshot, encode_snapshot, FileStorage, MemoryStorage, Migrations, SnapshotStorage};
use crate::task::{AddTask, RemoveTask, SetTasks, UpdateTask};
use crate::types::{BoardState, Column, ColumnId, Task, TaskId};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use taskboard_config::{AiConfig, TaskboardConfig};

/// Board counts for log output
#[derive(Debug, Serialize)]
struct BoardSummary<'a> {
    key: &'a str,
    tasks: usize,
    columns: Vec<&'a str>,
}

/// Owner of the board state
pub struct TaskStore {
    state: BoardState,
    storage: Arc<dyn SnapshotStorage>,
    snapshot_key: String,
    ai: AiConfig,
    activity: ActivityLog,
}

impl std::fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskStore")
            .field("snapshot_key", &self.snapshot_key)
            .field("tasks", &self.state.tasks.len())
            .field("columns", &self.state.columns.len())
            .finish()
    }
}

impl TaskStore {
    /// Fresh board with the default columns. Nothing is read from `storage`;
    /// the first mutation overwrites whatever snapshot is there.
    pub fn new(storage: Arc<dyn SnapshotStorage>, config: &TaskboardConfig) -> Self {
        Self::with_state(storage, config, BoardState::with_default_columns())
    }

    /// In-memory store with default settings
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()), &TaskboardConfig::default())
    }

    /// Load the board snapshot from `storage`, or start with the default
    /// columns when none has been written yet
    pub fn open(storage: Arc<dyn SnapshotStorage>, config: &TaskboardConfig) -> Result<Self> {
        Self::open_with_migrations(storage, config, &Migrations::default())
    }

    /// [`open`](Self::open) with upgrade steps for older snapshots
    pub fn open_with_migrations(
        storage: Arc<dyn SnapshotStorage>,
        config: &TaskboardConfig,
        migrations: &Migrations,
    ) -> Result<Self> {
        let state = match storage.load(&config.board_snapshot_key)? {
            Some(bytes) => decode_snapshot(&bytes, migrations)?,
            None => BoardState::with_default_columns(),
        };

        let store = Self::with_state(storage, config, state);
        tracing::info!("opened board{}", Pretty(store.summary()));
        Ok(store)
    }

    /// Open the board kept under `config.storage_dir`
    pub fn open_dir(config: &TaskboardConfig) -> Result<Self> {
        let storage = Arc::new(FileStorage::new(config.storage_dir.clone()));
        Self::open(storage, config)
    }

    fn with_state(storage: Arc<dyn SnapshotStorage>, config: &TaskboardConfig, state: BoardState) -> Self {
        Self {
            state,
            storage,
            snapshot_key: config.board_snapshot_key.clone(),
            ai: config.ai.clone(),
            activity: ActivityLog::new(config.activity_log_capacity),
        }
    }

    /// Write a final snapshot and release the store
    pub fn close(self) -> Result<()> {
        let bytes = encode_snapshot(&self.state)?;
        self.storage.save(&self.snapshot_key, &bytes)?;
        tracing::info!("closed board{}", Pretty(self.summary()));
        Ok(())
    }

    fn summary(&self) -> BoardSummary<'_> {
        BoardSummary {
            key: &self.snapshot_key,
            tasks: self.state.tasks.len(),
            columns: self.state.columns.iter().map(|c| c.id.as_str()).collect(),
        }
    }

    // Accessors

    /// Current board value
    pub fn snapshot(&self) -> &BoardState {
        &self.state
    }

    /// Tasks in global display order
    pub fn tasks(&self) -> &[Task] {
        &self.state.tasks
    }

    pub fn columns(&self) -> &[Column] {
        &self.state.columns
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.state.find_task(id)
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.state.find_column(id)
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn ai_config(&self) -> &AiConfig {
        &self.ai
    }

    // Tasks

    pub fn add_task(&mut self, cmd: AddTask) -> Result<Task> {
        self.commit(&cmd, |state| cmd.reduce(state))
    }

    pub fn update_task(&mut self, cmd: UpdateTask) -> Result<Task> {
        self.commit(&cmd, |state| cmd.reduce(state))
    }

    /// Returns the removed task
    pub fn remove_task(&mut self, id: &TaskId) -> Result<Task> {
        let cmd = RemoveTask::new(id.clone());
        self.commit(&cmd, |state| cmd.reduce(state))
    }

    /// Commit a whole task list (drag-and-drop reorders)
    pub fn set_tasks(&mut self, tasks: Vec<Task>) -> Result<()> {
        let cmd = SetTasks::new(tasks);
        self.commit(&cmd, |state| cmd.reduce(state)).map(|_| ())
    }

    // Columns

    pub fn add_column(&mut self, cmd: AddColumn) -> Result<Column> {
        self.commit(&cmd, |state| cmd.reduce(state))
    }

    pub fn update_column(&mut self, cmd: UpdateColumn) -> Result<Column> {
        self.commit(&cmd, |state| cmd.reduce(state))
    }

    /// Tasks in the removed column keep their status
    pub fn remove_column(&mut self, id: &ColumnId) -> Result<Column> {
        let cmd = RemoveColumn::new(id.clone());
        self.commit(&cmd, |state| cmd.reduce(state))
    }

    /// Commit a whole column ordering
    pub fn set_columns(&mut self, columns: Vec<Column>) -> Result<()> {
        let cmd = SetColumns::new(columns);
        self.commit(&cmd, |state| cmd.reduce(state)).map(|_| ())
    }

    // AI workflow

    /// Feed `event` to the task's workflow. Refused events return
    /// `Ok(TransitionOutcome::Refused { .. })` and change nothing.
    pub fn transition(&mut self, id: &TaskId, event: AiEvent) -> Result<TransitionOutcome> {
        let cmd = TransitionTask::new(id.clone(), event);
        let ai = self.ai.clone();
        self.commit(&cmd, |state| cmd.reduce(state, TransitionContext::new(&ai)))
    }

    pub fn run(&mut self, id: &TaskId) -> Result<TransitionOutcome> {
        self.transition(id, AiEvent::Run)
    }

    /// Run, or block first when required parameters are missing
    pub fn request_run(&mut self, id: &TaskId) -> Result<TransitionOutcome> {
        let missing = self
            .task(id)
            .map(Task::missing_workflow_params)
            .unwrap_or_default();
        if missing.is_empty() {
            self.run(id)
        } else {
            self.set_blocked(id, missing)
        }
    }

    pub fn succeed(&mut self, id: &TaskId) -> Result<TransitionOutcome> {
        self.transition(id, AiEvent::Success)
    }

    pub fn fail(&mut self, id: &TaskId, error: impl Into<String>) -> Result<TransitionOutcome> {
        self.transition(id, AiEvent::fail(error))
    }

    pub fn retry(&mut self, id: &TaskId) -> Result<TransitionOutcome> {
        self.transition(id, AiEvent::Retry)
    }

    pub fn cancel(&mut self, id: &TaskId) -> Result<TransitionOutcome> {
        self.transition(id, AiEvent::Cancel)
    }

    pub fn require_oauth(&mut self, id: &TaskId) -> Result<TransitionOutcome> {
        self.transition(id, AiEvent::RequireOauth)
    }

    pub fn resolve_oauth(&mut self, id: &TaskId) -> Result<TransitionOutcome> {
        self.transition(id, AiEvent::ResolveOauth)
    }

    pub fn set_blocked(&mut self, id: &TaskId, missing: Vec<String>) -> Result<TransitionOutcome> {
        self.transition(id, AiEvent::SetBlocked { missing })
    }

    pub fn set_pending(&mut self, id: &TaskId) -> Result<TransitionOutcome> {
        self.transition(id, AiEvent::SetPending)
    }

    /// Run a reducer against the current board and record the result
    fn commit<O, T, F>(&mut self, op: &O, reduce: F) -> Result<T>
    where
        O: Operation + Serialize,
        T: Serialize,
        F: FnOnce(&BoardState) -> Result<Reduction<T>>,
    {
        let start = Instant::now();
        let input = serde_json::to_value(op).unwrap_or_default();
        let result = reduce(&self.state);
        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(Reduction { state, output }) => {
                let changed = state.is_some();
                if let Some(state) = state {
                    self.state = state;
                    self.persist();
                }
                tracing::debug!(op = %op.op_string(), changed, duration_ms, "committed");
                let logged = serde_json::to_value(&output).unwrap_or_default();
                self.activity
                    .record(LogEntry::new(op.op_string(), input, logged, duration_ms));
                Ok(output)
            }
            Err(e) => {
                tracing::warn!(op = %op.op_string(), error = %e, "operation failed, board unchanged");
                self.activity.record(LogEntry::new(
                    op.op_string(),
                    input,
                    json!({ "error": e.to_string() }),
                    duration_ms,
                ));
                Err(e)
            }
        }
    }

    fn persist(&self) {
        let saved = encode_snapshot(&self.state)
            .and_then(|bytes| self.storage.save(&self.snapshot_key, &bytes));
        if let Err(e) = saved {
            tracing::warn!(key = %self.snapshot_key, error = %e, "failed to persist board snapshot");
        }
    }
}
