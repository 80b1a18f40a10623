//! RemoveColumn command

use crate::activity::Operation;
use crate::command::Reduction;
use crate::error::{KanbanError, Result};
use crate::types::{BoardState, Column, ColumnId};
use serde::{Deserialize, Serialize};

/// Remove a column. Tasks in it keep their status and are not migrated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveColumn {
    pub id: ColumnId,
}

impl RemoveColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }

    pub fn reduce(&self, state: &BoardState) -> Result<Reduction<Column>> {
        let index = state
            .column_index(&self.id)
            .ok_or_else(|| KanbanError::column_not_found(&self.id))?;

        let mut next = state.clone();
        let removed = next.columns.remove(index);

        let orphaned = next.tasks_in_column(&self.id).count();
        if orphaned > 0 {
            tracing::debug!(column = %self.id, orphaned, "removed column still has tasks");
        }

        Ok(Reduction::changed(next, removed))
    }
}

impl Operation for RemoveColumn {
    fn verb(&self) -> &'static str {
        "remove"
    }

    fn noun(&self) -> &'static str {
        "column"
    }
}
