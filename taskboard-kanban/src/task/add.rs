//! AddTask command

use crate::activity::Operation;
use crate::command::Reduction;
use crate::error::Result;
use crate::types::{Attachment, BoardState, ColumnId, CostType, McpWorkflow, Priority, Task};
use serde::{Deserialize, Serialize};

/// Add a new task to the end of the board
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTask {
    /// The task title (required)
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Column id; defaults to the first column, or TODO on a board without columns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ColumnId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_team_member: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_list_id: Option<String>,
    #[serde(default)]
    pub due_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcp_workflow: Option<McpWorkflow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<(CostType, f64)>,
}

impl AddTask {
    /// Create a new AddTask command with just a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Place the task in a specific column
    pub fn with_status(mut self, status: impl Into<ColumnId>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_assignee(mut self, member: impl Into<String>) -> Self {
        self.assigned_to_team_member = Some(member.into());
        self
    }

    pub fn with_lead(mut self, lead_id: impl Into<String>) -> Self {
        self.lead_id = Some(lead_id.into());
        self
    }

    pub fn with_lead_list(mut self, lead_list_id: impl Into<String>) -> Self {
        self.lead_list_id = Some(lead_list_id.into());
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = due_date.into();
        self
    }

    pub fn with_scheduled_date(mut self, date: impl Into<String>) -> Self {
        self.scheduled_date = Some(date.into());
        self
    }

    pub fn with_youtube_url(mut self, url: impl Into<String>) -> Self {
        self.youtube_url = Some(url.into());
        self
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    /// Attach an AI workflow; the task starts out pending
    pub fn with_workflow(mut self, workflow: McpWorkflow) -> Self {
        self.mcp_workflow = Some(workflow);
        self
    }

    pub fn with_cost(mut self, cost_type: CostType, amount: f64) -> Self {
        self.cost = Some((cost_type, amount));
        self
    }

    /// Build the task against `state` without touching it
    pub fn build(&self, state: &BoardState) -> Task {
        let status = self
            .status
            .clone()
            .unwrap_or_else(|| state.default_status());

        let mut task = Task::new(self.title.clone(), status)
            .with_description(self.description.clone())
            .with_due_date(self.due_date.clone());
        task.priority = self.priority;
        task.assigned_to_team_member = self.assigned_to_team_member.clone();
        task.lead_id = self.lead_id.clone();
        task.lead_list_id = self.lead_list_id.clone();
        task.scheduled_date = self.scheduled_date.clone();
        task.youtube_url = self.youtube_url.clone();
        task.attachments = self.attachments.clone();
        if let Some(workflow) = &self.mcp_workflow {
            task = task.with_workflow(workflow.clone());
        }
        if let Some((cost_type, amount)) = self.cost {
            task.cost_type = Some(cost_type);
            task.cost_amount = Some(amount);
        }
        task
    }

    pub fn reduce(&self, state: &BoardState) -> Result<Reduction<Task>> {
        let task = self.build(state);
        let mut next = state.clone();
        next.tasks.push(task.clone());
        Ok(Reduction::changed(next, task))
    }
}

impl Operation for AddTask {
    fn verb(&self) -> &'static str {
        "add"
    }

    fn noun(&self) -> &'static str {
        "task"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AiState, Column};

    #[test]
    fn test_add_task_defaults_to_first_column() {
        let state = BoardState {
            tasks: Vec::new(),
            columns: vec![Column::new("backlog", "Backlog"), Column::new("TODO", "To Do")],
        };

        let reduction = AddTask::new("Test task")
            .with_description("A test task")
            .reduce(&state)
            .unwrap();

        assert_eq!(reduction.output.title, "Test task");
        assert_eq!(reduction.output.description, "A test task");
        assert_eq!(reduction.output.status.as_str(), "backlog");
        assert_eq!(reduction.state.unwrap().tasks.len(), 1);
        // input untouched
        assert!(state.tasks.is_empty());
    }

    #[test]
    fn test_add_task_without_columns_uses_todo() {
        let reduction = AddTask::new("Orphan").reduce(&BoardState::default()).unwrap();
        assert_eq!(reduction.output.status, ColumnId::todo());
    }

    #[test]
    fn test_add_tasks_append_in_order() {
        let state = BoardState::with_default_columns();
        let first = AddTask::new("Task 1").reduce(&state).unwrap();
        let state = first.state.unwrap();
        let second = AddTask::new("Task 2").reduce(&state).unwrap();
        let state = second.state.unwrap();

        let titles: Vec<_> = state.tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Task 1", "Task 2"]);
        assert_ne!(first.output.id, second.output.id);
    }

    #[test]
    fn test_add_task_with_workflow_is_pending() {
        let task = AddTask::new("Enrich")
            .with_workflow(McpWorkflow::new("enrich"))
            .with_cost(CostType::Credits, 3.0)
            .build(&BoardState::with_default_columns());
        assert_eq!(task.ai_state, Some(AiState::Pending));
        assert_eq!(task.cost_type, Some(CostType::Credits));
        assert_eq!(task.cost_amount, Some(3.0));
    }

    #[test]
    fn test_op_string() {
        assert_eq!(AddTask::new("x").op_string(), "add task");
    }
}
