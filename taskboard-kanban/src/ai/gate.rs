//! Run-button gate combining workflow state and credit balance

use super::machine::{next_state, AiEvent};
use crate::types::{CostType, Task};

/// Whether the "Run" control should be enabled for `task`.
///
/// Requires a workflow whose state accepts `run`, and for tasks priced in
/// credits, a balance covering the cost. USD-priced and unpriced tasks are
/// not gated on credits.
pub fn can_run(task: &Task, credit_balance: f64) -> bool {
    let Some(state) = task.effective_ai_state() else {
        return false;
    };
    if next_state(state, &AiEvent::Run).is_err() {
        return false;
    }
    match (task.cost_type, task.cost_amount) {
        (Some(CostType::Credits), Some(cost)) => cost <= credit_balance,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AiState, McpWorkflow};

    fn priced(cost: f64) -> Task {
        let mut task = Task::new("Generate video", "TODO").with_workflow(McpWorkflow::new("video"));
        task.cost_type = Some(CostType::Credits);
        task.cost_amount = Some(cost);
        task
    }

    #[test]
    fn test_enough_credits() {
        assert!(can_run(&priced(5.0), 5.0));
        assert!(!can_run(&priced(5.0), 4.5));
    }

    #[test]
    fn test_blocked_cannot_run() {
        let mut task = priced(1.0);
        task.ai_state = Some(AiState::Blocked);
        assert!(!can_run(&task, 100.0));
    }

    #[test]
    fn test_requires_oauth_can_run() {
        let mut task = priced(1.0);
        task.ai_state = Some(AiState::RequiresOauth);
        assert!(can_run(&task, 100.0));
    }

    #[test]
    fn test_no_workflow_cannot_run() {
        assert!(!can_run(&Task::new("Plain", "TODO"), 100.0));
    }

    #[test]
    fn test_usd_not_gated() {
        let mut task = priced(50.0);
        task.cost_type = Some(CostType::Usd);
        assert!(can_run(&task, 0.0));
    }
}
