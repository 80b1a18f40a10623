//! UpdateTask command

use crate::activity::Operation;
use crate::command::Reduction;
use crate::error::{KanbanError, Result};
use crate::types::{AiState, Attachment, BoardState, ColumnId, CostType, McpWorkflow, Priority, Task, TaskId};
use serde::{Deserialize, Deserializer, Serialize};

/// Keeps an explicit `null` apart from an absent field:
/// absent = `None`, `null` = `Some(None)`, value = `Some(Some(v))`.
fn double_option<'de, T, D>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Partially update an existing task.
///
/// Plain `Option` fields: `None` = don't change. Clearable fields are
/// `Option<Option<T>>`: `None` = don't change, `Some(None)` = clear,
/// `Some(Some(x))` = set. AI state is not editable here; it only moves
/// through workflow transitions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    /// The task ID to update
    pub id: TaskId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ColumnId>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub priority: Option<Option<Priority>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub assigned_to_team_member: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub lead_list_id: Option<Option<String>>,
    /// Empty string clears
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub scheduled_timezone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub appointment_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub appointment_time: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub appointment_timezone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<Option<String>>,
    /// Replace all attachments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub mcp_workflow: Option<Option<McpWorkflow>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub cost_type: Option<Option<CostType>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub cost_amount: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub output_image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub output_markdown: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub output_video_url: Option<Option<String>>,
    /// Replace all output attachments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_attachments: Option<Vec<Attachment>>,
}

impl UpdateTask {
    /// Create a new UpdateTask command
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Move to another column (no reordering)
    pub fn with_status(mut self, status: impl Into<ColumnId>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set or clear the priority
    pub fn with_priority(mut self, priority: Option<Priority>) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set or clear the assignee
    pub fn with_assignee(mut self, member: Option<String>) -> Self {
        self.assigned_to_team_member = Some(member);
        self
    }

    pub fn with_lead(mut self, lead_id: Option<String>) -> Self {
        self.lead_id = Some(lead_id);
        self
    }

    pub fn with_lead_list(mut self, lead_list_id: Option<String>) -> Self {
        self.lead_list_id = Some(lead_list_id);
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn with_scheduled_date(mut self, date: Option<String>) -> Self {
        self.scheduled_date = Some(date);
        self
    }

    /// Set or clear the appointment date, time and timezone together
    pub fn with_appointment(
        mut self,
        date: Option<String>,
        time: Option<String>,
        timezone: Option<String>,
    ) -> Self {
        self.appointment_date = Some(date);
        self.appointment_time = Some(time);
        self.appointment_timezone = Some(timezone);
        self
    }

    pub fn with_youtube_url(mut self, url: Option<String>) -> Self {
        self.youtube_url = Some(url);
        self
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = Some(attachments);
        self
    }

    /// Attach, replace or detach the AI workflow
    pub fn with_workflow(mut self, workflow: Option<McpWorkflow>) -> Self {
        self.mcp_workflow = Some(workflow);
        self
    }

    pub fn with_output_markdown(mut self, markdown: Option<String>) -> Self {
        self.output_markdown = Some(markdown);
        self
    }

    pub fn with_output_video_url(mut self, url: Option<String>) -> Self {
        self.output_video_url = Some(url);
        self
    }

    /// Merge the requested changes into a copy of `task`
    pub fn apply_to(&self, task: &Task) -> Task {
        let mut task = task.clone();

        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(status) = &self.status {
            task.status = status.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        merge(&mut task.assigned_to_team_member, &self.assigned_to_team_member);
        merge(&mut task.lead_id, &self.lead_id);
        merge(&mut task.lead_list_id, &self.lead_list_id);
        if let Some(due_date) = &self.due_date {
            task.due_date = due_date.clone();
        }
        merge(&mut task.scheduled_date, &self.scheduled_date);
        merge(&mut task.scheduled_timezone, &self.scheduled_timezone);
        merge(&mut task.appointment_date, &self.appointment_date);
        merge(&mut task.appointment_time, &self.appointment_time);
        merge(&mut task.appointment_timezone, &self.appointment_timezone);
        merge(&mut task.youtube_url, &self.youtube_url);
        if let Some(attachments) = &self.attachments {
            task.attachments = attachments.clone();
        }
        if let Some(workflow) = &self.mcp_workflow {
            set_workflow(&mut task, workflow.clone());
        }
        if let Some(cost_type) = self.cost_type {
            task.cost_type = cost_type;
        }
        if let Some(cost_amount) = self.cost_amount {
            task.cost_amount = cost_amount;
        }
        merge(&mut task.output_image_url, &self.output_image_url);
        merge(&mut task.output_markdown, &self.output_markdown);
        merge(&mut task.output_video_url, &self.output_video_url);
        if let Some(outputs) = &self.output_attachments {
            task.output_attachments = outputs.clone();
        }

        task
    }

    pub fn reduce(&self, state: &BoardState) -> Result<Reduction<Task>> {
        let index = state
            .task_index(&self.id)
            .ok_or_else(|| KanbanError::task_not_found(&self.id))?;

        let updated = self.apply_to(&state.tasks[index]);
        if updated == state.tasks[index] {
            return Ok(Reduction::unchanged(updated));
        }

        let mut next = state.clone();
        next.tasks[index] = updated.clone();
        Ok(Reduction::changed(next, updated))
    }
}

fn merge<T: Clone>(field: &mut Option<T>, change: &Option<Option<T>>) {
    if let Some(value) = change {
        *field = value.clone();
    }
}

/// Detaching a workflow drops the AI fields that only mean something with one
fn set_workflow(task: &mut Task, workflow: Option<McpWorkflow>) {
    match workflow {
        Some(workflow) => {
            if task.ai_state.is_none() {
                task.ai_state = Some(AiState::Pending);
            }
            task.mcp_workflow = Some(workflow);
        }
        None => {
            task.mcp_workflow = None;
            task.ai_state = None;
            task.ai_missing_params.clear();
            task.ai_error_message = None;
            task.ai_started_at = None;
            task.ai_eta_seconds = None;
        }
    }
}

impl Operation for UpdateTask {
    fn verb(&self) -> &'static str {
        "update"
    }

    fn noun(&self) -> &'static str {
        "task"
    }
}
