//! TransitionTask command: feed one AI event to one task

use super::apply::{apply_event, TransitionContext};
use super::machine::{AiEvent, TransitionOutcome};
use crate::activity::Operation;
use crate::command::Reduction;
use crate::error::{KanbanError, Result};
use crate::types::{BoardState, TaskId};
use serde::{Deserialize, Serialize};

/// Apply an [`AiEvent`] to a task's workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionTask {
    pub id: TaskId,
    #[serde(flatten)]
    pub event: AiEvent,
}

impl TransitionTask {
    pub fn new(id: impl Into<TaskId>, event: AiEvent) -> Self {
        Self {
            id: id.into(),
            event,
        }
    }

    /// Refused events come back as an unchanged reduction, not an error
    pub fn reduce(
        &self,
        state: &BoardState,
        ctx: TransitionContext<'_>,
    ) -> Result<Reduction<TransitionOutcome>> {
        let index = state
            .task_index(&self.id)
            .ok_or_else(|| KanbanError::task_not_found(&self.id))?;

        let (updated, outcome) = apply_event(&state.tasks[index], &self.event, ctx)?;
        match (updated, outcome) {
            (Some(task), TransitionOutcome::Applied { from, to }) => {
                tracing::info!(task = %self.id, %from, %to, op = %self.op_string(), "workflow transition");
                let mut next = state.clone();
                next.tasks[index] = task;
                Ok(Reduction::changed(next, outcome))
            }
            _ => {
                tracing::debug!(task = %self.id, op = %self.op_string(), ?outcome, "transition refused");
                Ok(Reduction::unchanged(outcome))
            }
        }
    }
}

impl Operation for TransitionTask {
    fn verb(&self) -> &'static str {
        self.event.verb()
    }

    fn noun(&self) -> &'static str {
        self.event.noun()
    }
}
