//! Kanban task store with an AI workflow state machine and drag-and-drop
//! reordering
//!
//! ## Overview
//!
//! - **One store, one board** - [`TaskStore`] owns the tasks and columns and is
//!   passed by reference; there is no global instance
//! - **Reducer updates** - every command computes a new [`BoardState`] from the
//!   current one and swaps it in
//! - **Snapshot persistence** - after each change the whole board is written
//!   as a versioned JSON snapshot through a [`SnapshotStorage`]
//! - **AI workflows** - tasks carrying an [`McpWorkflow`] move through
//!   [`AiState`] via [`AiEvent`]s; execution is time-simulated
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use taskboard_kanban::{task::AddTask, McpWorkflow, TaskStore};
//! use taskboard_config::TaskboardConfig;
//!
//! # fn example() -> taskboard_kanban::Result<()> {
//! let mut store = TaskStore::open_dir(&TaskboardConfig::default())?;
//!
//! let task = store.add_task(
//!     AddTask::new("Enrich lead list").with_workflow(McpWorkflow::new("enrich")),
//! )?;
//! store.run(&task.id)?;
//!
//! store.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Storage Structure
//!
//! ```text
//! .taskboard/
//! ├── .lock               # Exclusive write lock
//! ├── kanban-board.json   # {"version": 1, "state": {"tasks": [...], "columns": [...]}}
//! └── kanban-view.json    # View preferences (taskboard-views)
//! ```

mod command;
mod error;
mod logging;
mod store;
pub mod types;

// Command modules
pub mod activity;
pub mod ai;
pub mod column;
pub mod dnd;
pub mod storage;
pub mod task;

pub use activity::{ActivityLog, LogEntry, Operation};
pub use ai::{can_run, AiEvent, SharedStore, TransitionOutcome};
pub use command::Reduction;
pub use dnd::{DragCoordinator, DragEntity};
pub use error::{KanbanError, Result};
pub use logging::Pretty;
pub use storage::{FileStorage, MemoryStorage, SnapshotStorage};
pub use store::TaskStore;

// Re-export commonly used types
pub use types::{
    AiState, Attachment, BoardState, Column, ColumnId, CostType, McpWorkflow, Priority, Task,
    TaskId,
};
