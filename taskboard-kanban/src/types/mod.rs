//! Core types for the kanban store

mod board;
mod ids;
mod task;
mod workflow;

pub use board::{BoardState, Column};
pub use ids::{ColumnId, TaskId, DONE_STATUS, IN_PROGRESS_STATUS, TODO_STATUS};
pub use task::{Attachment, CostType, Priority, Task};
pub use workflow::{AiState, McpWorkflow};
