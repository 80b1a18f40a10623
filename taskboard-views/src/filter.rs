//! Filter sets and text search

use serde::{Deserialize, Serialize};
use taskboard_kanban::{ColumnId, Priority, Task};

/// Field filters. An empty set does not filter; a task lacking the field
/// fails a non-empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskFilters {
    pub status: Vec<ColumnId>,
    pub priority: Vec<Priority>,
    pub assigned_to_team_member: Vec<String>,
}

impl TaskFilters {
    pub fn is_empty(&self) -> bool {
        self.status.is_empty() && self.priority.is_empty() && self.assigned_to_team_member.is_empty()
    }

    pub fn matches(&self, task: &Task) -> bool {
        passes(&self.status, Some(&task.status))
            && passes(&self.priority, task.priority.as_ref())
            && passes(
                &self.assigned_to_team_member,
                task.assigned_to_team_member.as_ref(),
            )
    }

    /// Replace only the sets present in `update`
    pub fn merge(&mut self, update: FilterUpdate) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(members) = update.assigned_to_team_member {
            self.assigned_to_team_member = members;
        }
    }
}

fn passes<T: PartialEq>(allowed: &[T], value: Option<&T>) -> bool {
    allowed.is_empty() || value.is_some_and(|v| allowed.contains(v))
}

/// Partial filter change for `set_filters`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterUpdate {
    pub status: Option<Vec<ColumnId>>,
    pub priority: Option<Vec<Priority>>,
    pub assigned_to_team_member: Option<Vec<String>>,
}

impl FilterUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status<I, S>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ColumnId>,
    {
        self.status = Some(statuses.into_iter().map(Into::into).collect());
        self
    }

    pub fn priority(mut self, priorities: impl IntoIterator<Item = Priority>) -> Self {
        self.priority = Some(priorities.into_iter().collect());
        self
    }

    pub fn assigned_to<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assigned_to_team_member = Some(members.into_iter().map(Into::into).collect());
        self
    }
}

/// Case-insensitive match on title or description; a blank query matches all
pub fn matches_search(query: &str, task: &Task) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    task.title.to_lowercase().contains(&needle) || task.description.to_lowercase().contains(&needle)
}
