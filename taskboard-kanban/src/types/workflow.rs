//! AI workflow descriptor and execution state carried on a task

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Execution state of a task's AI workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AiState {
    #[default]
    Pending,
    Running,
    Success,
    Failed,
    Blocked,
    RequiresOauth,
}

impl AiState {
    pub const ALL: [AiState; 6] = [
        AiState::Pending,
        AiState::Running,
        AiState::Success,
        AiState::Failed,
        AiState::Blocked,
        AiState::RequiresOauth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Success => "success",
            Self::Failed => "failed",
            Self::Blocked => "blocked",
            Self::RequiresOauth => "requires_oauth",
        }
    }
}

impl fmt::Display for AiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prompts, tools and resources an external AI backend would use to execute a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct McpWorkflow {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prompts: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
    /// Parameter names that must be supplied before the workflow can run
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_params: Vec<String>,
    /// Values collected for parameters that are not task fields
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
    /// Declared run duration; the configured default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta_seconds: Option<u32>,
}

impl McpWorkflow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_tools(mut self, tools: Vec<String>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_prompts(mut self, prompts: Vec<String>) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn with_required_params(mut self, params: Vec<String>) -> Self {
        self.required_params = params;
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_eta_seconds(mut self, eta: u32) -> Self {
        self.eta_seconds = Some(eta);
        self
    }
}
