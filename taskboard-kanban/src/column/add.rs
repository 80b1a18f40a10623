//! AddColumn command

use crate::activity::Operation;
use crate::command::Reduction;
use crate::error::{KanbanError, Result};
use crate::types::{BoardState, Column, ColumnId};
use serde::{Deserialize, Serialize};

/// Append a column to the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddColumn {
    /// Generated when not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ColumnId>,
    pub title: String,
}

impl AddColumn {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
        }
    }

    /// Use a caller-chosen id (e.g. one of the reserved statuses)
    pub fn with_id(mut self, id: impl Into<ColumnId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn reduce(&self, state: &BoardState) -> Result<Reduction<Column>> {
        let id = self.id.clone().unwrap_or_default();
        if state.find_column(&id).is_some() {
            return Err(KanbanError::duplicate_id("column", id.as_str()));
        }

        let column = Column::new(id, self.title.clone());
        let mut next = state.clone();
        next.columns.push(column.clone());
        Ok(Reduction::changed(next, column))
    }
}

impl Operation for AddColumn {
    fn verb(&self) -> &'static str {
        "add"
    }

    fn noun(&self) -> &'static str {
        "column"
    }
}
