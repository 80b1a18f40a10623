//! RemoveTask command

use crate::activity::Operation;
use crate::command::Reduction;
use crate::error::{KanbanError, Result};
use crate::types::{BoardState, Task, TaskId};
use serde::{Deserialize, Serialize};

/// Remove a task from the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveTask {
    pub id: TaskId,
}

impl RemoveTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }

    /// Output is the removed task
    pub fn reduce(&self, state: &BoardState) -> Result<Reduction<Task>> {
        let index = state
            .task_index(&self.id)
            .ok_or_else(|| KanbanError::task_not_found(&self.id))?;

        let mut next = state.clone();
        let removed = next.tasks.remove(index);
        Ok(Reduction::changed(next, removed))
    }
}

impl Operation for RemoveTask {
    fn verb(&self) -> &'static str {
        "remove"
    }

    fn noun(&self) -> &'static str {
        "task"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::AddTask;

    #[test]
    fn test_remove_task() {
        let added = AddTask::new("Doomed")
            .reduce(&BoardState::with_default_columns())
            .unwrap();
        let state = added.state.unwrap();

        let reduction = RemoveTask::new(added.output.id.clone()).reduce(&state).unwrap();
        assert_eq!(reduction.output.title, "Doomed");
        assert!(reduction.state.unwrap().tasks.is_empty());
        assert_eq!(state.tasks.len(), 1);
    }

    #[test]
    fn test_remove_unknown_task() {
        let result = RemoveTask::new("nope").reduce(&BoardState::with_default_columns());
        assert!(result.unwrap_err().is_not_found());
    }
}
