//! Board-level types: Column and the immutable BoardState value

use super::ids::{ColumnId, TaskId, DONE_STATUS, IN_PROGRESS_STATUS, TODO_STATUS};
use super::task::Task;
use serde::{Deserialize, Serialize};

/// A column defines a workflow stage. Its id is the status value of the tasks in it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
}

impl Column {
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Full contents of the board: tasks in global display order plus ordered columns.
///
/// Values are treated as immutable; every store operation builds a new
/// `BoardState` and swaps it in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl BoardState {
    /// Empty board with the reserved TODO / IN_PROGRESS / DONE columns
    pub fn with_default_columns() -> Self {
        Self {
            tasks: Vec::new(),
            columns: Self::default_columns(),
        }
    }

    /// Get the default columns for a new board
    pub fn default_columns() -> Vec<Column> {
        vec![
            Column::new(TODO_STATUS, "To Do"),
            Column::new(IN_PROGRESS_STATUS, "In Progress"),
            Column::new(DONE_STATUS, "Done"),
        ]
    }

    pub fn find_task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn task_index(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }

    pub fn find_column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    pub fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| &c.id == id)
    }

    pub fn first_column(&self) -> Option<&Column> {
        self.columns.first()
    }

    /// Status assigned to tasks created without one
    pub fn default_status(&self) -> ColumnId {
        self.first_column()
            .map(|c| c.id.clone())
            .unwrap_or_else(ColumnId::todo)
    }

    /// Tasks whose status is `column`, in global order
    pub fn tasks_in_column<'a>(&'a self, column: &'a ColumnId) -> impl Iterator<Item = &'a Task> {
        self.tasks.iter().filter(move |t| &t.status == column)
    }

    /// Display title for a status, falling back to the raw id for orphaned statuses
    pub fn column_title(&self, status: &ColumnId) -> String {
        self.find_column(status)
            .map(|c| c.title.clone())
            .unwrap_or_else(|| status.to_string())
    }
}
