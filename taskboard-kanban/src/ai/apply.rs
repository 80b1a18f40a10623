//! Side effects of AI transitions on a task

use super::machine::{next_state, AiEvent, TransitionOutcome};
use crate::error::{KanbanError, Result};
use crate::types::{AiState, ColumnId, Task};
use chrono::{DateTime, Utc};
use taskboard_config::AiConfig;

/// Inputs a transition needs besides the task itself
#[derive(Debug, Clone, Copy)]
pub struct TransitionContext<'a> {
    pub now: DateTime<Utc>,
    pub ai: &'a AiConfig,
}

impl<'a> TransitionContext<'a> {
    pub fn new(ai: &'a AiConfig) -> Self {
        Self { now: Utc::now(), ai }
    }

    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }
}

/// Feed `event` to `task`, returning the updated copy (`None` when refused)
/// and the outcome. `task` itself is never modified.
pub fn apply_event(
    task: &Task,
    event: &AiEvent,
    ctx: TransitionContext<'_>,
) -> Result<(Option<Task>, TransitionOutcome)> {
    let workflow = task
        .mcp_workflow
        .as_ref()
        .ok_or_else(|| KanbanError::NoWorkflow {
            id: task.id.to_string(),
        })?;
    let from = task.effective_ai_state().unwrap_or_default();

    let to = match next_state(from, event) {
        Ok(to) => to,
        Err(reason) => {
            return Ok((None, TransitionOutcome::Refused { state: from, reason }));
        }
    };

    let mut next = task.clone();
    next.ai_state = Some(to);
    if to != AiState::Blocked {
        next.ai_missing_params.clear();
    }

    let eta = workflow.eta_seconds.unwrap_or(ctx.ai.default_eta_seconds);

    match event {
        AiEvent::Run | AiEvent::Retry => {
            next.status = ColumnId::in_progress();
            next.ai_error_message = None;
            next.ai_started_at = Some(ctx.now);
            next.ai_eta_seconds = Some(eta);
        }
        AiEvent::Success => {
            next.status = ColumnId::done();
            clear_timing(&mut next);
            if next.output_markdown.is_none() {
                next.output_markdown =
                    Some(ctx.ai.render_sample_markdown(&task.title, &workflow.name));
            }
            if next.output_image_url.is_none() {
                next.output_image_url = ctx.ai.sample_image_url.clone();
            }
        }
        AiEvent::Fail { error } => {
            next.ai_error_message = Some(error.clone());
            clear_timing(&mut next);
        }
        AiEvent::Cancel => {
            next.status = ColumnId::todo();
            clear_timing(&mut next);
        }
        AiEvent::SetBlocked { missing } => {
            next.ai_missing_params = missing.clone();
        }
        AiEvent::RequireOauth | AiEvent::ResolveOauth | AiEvent::SetPending => {}
    }

    Ok((Some(next), TransitionOutcome::Applied { from, to }))
}

fn clear_timing(task: &mut Task) {
    task.ai_started_at = None;
    task.ai_eta_seconds = None;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::RefusalReason;
    use crate::types::McpWorkflow;

    fn task_in(state: AiState) -> Task {
        let mut task = Task::new("Enrich leads", "TODO").with_workflow(McpWorkflow::new("enrich"));
        task.ai_state = Some(state);
        task
    }

    #[test]
    fn test_run_sets_status_and_timing() {
        let ai = AiConfig::default();
        let task = task_in(AiState::Pending);
        let (next, outcome) = apply_event(&task, &AiEvent::Run, TransitionContext::new(&ai)).unwrap();
        let next = next.unwrap();

        assert!(outcome.is_applied());
        assert_eq!(next.ai_state, Some(AiState::Running));
        assert_eq!(next.status, ColumnId::in_progress());
        assert!(next.ai_started_at.is_some());
        assert_eq!(next.ai_eta_seconds, Some(ai.default_eta_seconds));
        // original untouched
        assert_eq!(task.ai_state, Some(AiState::Pending));
    }

    #[test]
    fn test_run_uses_workflow_eta() {
        let ai = AiConfig::default();
        let mut task = task_in(AiState::Pending);
        task.mcp_workflow = Some(McpWorkflow::new("quick").with_eta_seconds(4));
        let (next, _) = apply_event(&task, &AiEvent::Run, TransitionContext::new(&ai)).unwrap();
        assert_eq!(next.unwrap().ai_eta_seconds, Some(4));
    }

    #[test]
    fn test_success_attaches_sample_output() {
        let ai = AiConfig {
            sample_image_url: Some("https://img.example/sample.png".into()),
            ..AiConfig::default()
        };
        let mut task = task_in(AiState::Running);
        task.ai_started_at = Some(Utc::now());
        task.ai_eta_seconds = Some(10);

        let (next, _) = apply_event(&task, &AiEvent::Success, TransitionContext::new(&ai)).unwrap();
        let next = next.unwrap();
        assert_eq!(next.status, ColumnId::done());
        assert!(next.ai_started_at.is_none());
        assert!(next.ai_eta_seconds.is_none());
        assert!(next.output_markdown.unwrap().contains("Enrich leads"));
        assert_eq!(
            next.output_image_url.as_deref(),
            Some("https://img.example/sample.png")
        );
    }

    #[test]
    fn test_success_keeps_existing_output() {
        let ai = AiConfig::default();
        let mut task = task_in(AiState::Running);
        task.output_markdown = Some("real result".into());
        let (next, _) = apply_event(&task, &AiEvent::Success, TransitionContext::new(&ai)).unwrap();
        assert_eq!(next.unwrap().output_markdown.as_deref(), Some("real result"));
    }

    #[test]
    fn test_fail_records_error() {
        let ai = AiConfig::default();
        let task = task_in(AiState::Running);
        let (next, _) =
            apply_event(&task, &AiEvent::fail("rate limited"), TransitionContext::new(&ai)).unwrap();
        let next = next.unwrap();
        assert_eq!(next.ai_state, Some(AiState::Failed));
        assert_eq!(next.ai_error_message.as_deref(), Some("rate limited"));
        assert!(next.ai_started_at.is_none());
    }

    #[test]
    fn test_retry_clears_error_and_missing_params() {
        let ai = AiConfig::default();
        let mut task = task_in(AiState::Blocked);
        task.ai_missing_params = vec!["leadId".into()];
        task.ai_error_message = Some("old".into());

        let (next, _) = apply_event(&task, &AiEvent::Retry, TransitionContext::new(&ai)).unwrap();
        let next = next.unwrap();
        assert_eq!(next.ai_state, Some(AiState::Running));
        assert!(next.ai_missing_params.is_empty());
        assert!(next.ai_error_message.is_none());
        assert_eq!(next.status, ColumnId::in_progress());
    }

    #[test]
    fn test_run_from_blocked_refused() {
        let ai = AiConfig::default();
        let mut task = task_in(AiState::Blocked);
        task.ai_missing_params = vec!["leadId".into()];

        let (next, outcome) = apply_event(&task, &AiEvent::Run, TransitionContext::new(&ai)).unwrap();
        assert!(next.is_none());
        assert_eq!(
            outcome,
            TransitionOutcome::Refused {
                state: AiState::Blocked,
                reason: RefusalReason::MissingParams
            }
        );
    }

    #[test]
    fn test_leaving_blocked_clears_missing_params() {
        let ai = AiConfig::default();
        let mut task = task_in(AiState::Blocked);
        task.ai_missing_params = vec!["leadId".into()];

        let (next, _) =
            apply_event(&task, &AiEvent::RequireOauth, TransitionContext::new(&ai)).unwrap();
        assert!(next.unwrap().ai_missing_params.is_empty());
    }

    #[test]
    fn test_no_workflow_rejected() {
        let ai = AiConfig::default();
        let task = Task::new("Plain", "TODO");
        let result = apply_event(&task, &AiEvent::Run, TransitionContext::new(&ai));
        assert!(matches!(result, Err(KanbanError::NoWorkflow { .. })));
    }
}
