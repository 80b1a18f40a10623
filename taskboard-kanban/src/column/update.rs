//! UpdateColumn command

use crate::activity::Operation;
use crate::command::Reduction;
use crate::error::{KanbanError, Result};
use crate::types::{BoardState, Column, ColumnId};
use serde::{Deserialize, Serialize};

/// Rename a column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateColumn {
    pub id: ColumnId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl UpdateColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn reduce(&self, state: &BoardState) -> Result<Reduction<Column>> {
        let index = state
            .column_index(&self.id)
            .ok_or_else(|| KanbanError::column_not_found(&self.id))?;

        let mut column = state.columns[index].clone();
        match &self.title {
            Some(title) if *title != column.title => column.title = title.clone(),
            _ => return Ok(Reduction::unchanged(column)),
        }

        let mut next = state.clone();
        next.columns[index] = column.clone();
        Ok(Reduction::changed(next, column))
    }
}

impl Operation for UpdateColumn {
    fn verb(&self) -> &'static str {
        "update"
    }

    fn noun(&self) -> &'static str {
        "column"
    }
}
