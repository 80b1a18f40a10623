//! Task types: Task, Priority, Attachment, CostType

use super::ids::{ColumnId, TaskId};
use super::workflow::{AiState, McpWorkflow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task priority. Ordering is low < medium < high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Sort rank: low=1, medium=2, high=3
    pub fn rank(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit a task's cost is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostType {
    Credits,
    Usd,
}

/// A file or link attached to a task or produced by its workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            mime_type: None,
        }
    }

    /// Set the MIME type
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// A card on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Column id this task renders in
    pub status: ColumnId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_team_member: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_list_id: Option<String>,
    /// Date string as entered; empty when unset
    #[serde(default)]
    pub due_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcp_workflow: Option<McpWorkflow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_state: Option<AiState>,
    /// Non-empty only while `ai_state` is blocked
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ai_missing_params: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_eta_seconds: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_type: Option<CostType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_amount: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_markdown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_video_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output_attachments: Vec<Attachment>,
}

impl Task {
    /// Create a new task with a fresh id in the given column
    pub fn new(title: impl Into<String>, status: impl Into<ColumnId>) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            description: String::new(),
            status: status.into(),
            priority: None,
            assigned_to_team_member: None,
            lead_id: None,
            lead_list_id: None,
            due_date: String::new(),
            scheduled_date: None,
            scheduled_timezone: None,
            appointment_date: None,
            appointment_time: None,
            appointment_timezone: None,
            youtube_url: None,
            attachments: Vec::new(),
            mcp_workflow: None,
            ai_state: None,
            ai_missing_params: Vec::new(),
            ai_error_message: None,
            ai_started_at: None,
            ai_eta_seconds: None,
            cost_type: None,
            cost_amount: None,
            output_image_url: None,
            output_markdown: None,
            output_video_url: None,
            output_attachments: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = due_date.into();
        self
    }

    /// Attach a workflow; the task starts out pending
    pub fn with_workflow(mut self, workflow: McpWorkflow) -> Self {
        self.mcp_workflow = Some(workflow);
        self.ai_state = Some(AiState::Pending);
        self
    }

    /// Effective AI state. `None` when no workflow is attached; an unset state
    /// on a task with a workflow reads as pending.
    pub fn effective_ai_state(&self) -> Option<AiState> {
        self.mcp_workflow
            .as_ref()
            .map(|_| self.ai_state.unwrap_or_default())
    }

    /// Required workflow parameters that are neither set on the task nor
    /// collected on the workflow.
    pub fn missing_workflow_params(&self) -> Vec<String> {
        let Some(workflow) = &self.mcp_workflow else {
            return Vec::new();
        };
        workflow
            .required_params
            .iter()
            .filter(|name| {
                let from_task = match name.as_str() {
                    "leadId" => self.lead_id.as_deref(),
                    "leadListId" => self.lead_list_id.as_deref(),
                    "assignedToTeamMember" => self.assigned_to_team_member.as_deref(),
                    "scheduledDate" => self.scheduled_date.as_deref(),
                    "appointmentDate" => self.appointment_date.as_deref(),
                    "youtubeUrl" => self.youtube_url.as_deref(),
                    "dueDate" => Some(self.due_date.as_str()),
                    _ => None,
                };
                let supplied = from_task.is_some_and(|v| !v.trim().is_empty())
                    || workflow
                        .params
                        .get(name.as_str())
                        .is_some_and(|v| !v.trim().is_empty());
                !supplied
            })
            .cloned()
            .collect()
    }
}
