//! SetColumns command: commit a whole column ordering

use crate::activity::Operation;
use crate::command::Reduction;
use crate::error::{KanbanError, Result};
use crate::types::{BoardState, Column};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Replace the column list wholesale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetColumns {
    pub columns: Vec<Column>,
}

impl SetColumns {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Output is the committed column ids in order
    pub fn reduce(&self, state: &BoardState) -> Result<Reduction<Vec<String>>> {
        let mut seen = HashSet::new();
        if let Some(dup) = self.columns.iter().find(|c| !seen.insert(&c.id)) {
            return Err(KanbanError::duplicate_id("column", dup.id.as_str()));
        }

        let ids = self.columns.iter().map(|c| c.id.to_string()).collect();
        if self.columns == state.columns {
            return Ok(Reduction::unchanged(ids));
        }

        let next = BoardState {
            tasks: state.tasks.clone(),
            columns: self.columns.clone(),
        };
        Ok(Reduction::changed(next, ids))
    }
}

impl Operation for SetColumns {
    fn verb(&self) -> &'static str {
        "set"
    }

    fn noun(&self) -> &'static str {
        "columns"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_columns_reorders() {
        let state = BoardState::with_default_columns();
        let mut columns = state.columns.clone();
        columns.reverse();

        let reduction = SetColumns::new(columns).reduce(&state).unwrap();
        assert_eq!(reduction.output, vec!["DONE", "IN_PROGRESS", "TODO"]);
        assert!(reduction.is_changed());
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let column = Column::new("TODO", "To Do");
        let result = SetColumns::new(vec![column.clone(), column]).reduce(&BoardState::default());
        assert!(matches!(result, Err(KanbanError::DuplicateId { .. })));
    }
}
