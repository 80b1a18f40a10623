//! SetTasks command: commit a whole task list (used by reordering)

use crate::activity::Operation;
use crate::command::Reduction;
use crate::error::{KanbanError, Result};
use crate::types::{BoardState, Task};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Replace the task list wholesale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetTasks {
    pub tasks: Vec<Task>,
}

impl SetTasks {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Output is the number of tasks committed
    pub fn reduce(&self, state: &BoardState) -> Result<Reduction<usize>> {
        let mut seen = HashSet::new();
        if let Some(dup) = self.tasks.iter().find(|t| !seen.insert(&t.id)) {
            return Err(KanbanError::duplicate_id("task", dup.id.as_str()));
        }

        if self.tasks == state.tasks {
            return Ok(Reduction::unchanged(self.tasks.len()));
        }

        let next = BoardState {
            tasks: self.tasks.clone(),
            columns: state.columns.clone(),
        };
        Ok(Reduction::changed(next, self.tasks.len()))
    }
}

impl Operation for SetTasks {
    fn verb(&self) -> &'static str {
        "set"
    }

    fn noun(&self) -> &'static str {
        "tasks"
    }
}
