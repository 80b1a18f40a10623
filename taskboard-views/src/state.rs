//! Persisted view preferences

use crate::filter::TaskFilters;
use crate::sort::SortSpec;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Optional task fields shown on a card preview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PreviewField {
    Description,
    Priority,
    AssignedToTeamMember,
    DueDate,
    ScheduledDate,
    AppointmentDate,
    AiState,
    Cost,
    Attachments,
}

impl PreviewField {
    pub fn defaults() -> Vec<PreviewField> {
        vec![
            Self::Description,
            Self::Priority,
            Self::AssignedToTeamMember,
            Self::DueDate,
        ]
    }
}

/// A named copy of the filters and search text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedFilters {
    pub name: String,
    pub filters: TaskFilters,
    #[serde(default)]
    pub search_query: String,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewState {
    pub search_query: String,
    pub filters: TaskFilters,
    pub sort: SortSpec,
    pub preview_fields: Vec<PreviewField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_filters: Option<SavedFilters>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            filters: TaskFilters::default(),
            sort: SortSpec::default(),
            preview_fields: PreviewField::defaults(),
            saved_filters: None,
        }
    }
}
