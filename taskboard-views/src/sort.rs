//! Sort order and comparators

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use taskboard_kanban::Task;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    /// Store order
    #[default]
    Manual,
    Title,
    Status,
    Priority,
    DueDate,
    ScheduledDate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn merge(&mut self, update: SortUpdate) {
        if let Some(field) = update.field {
            self.field = field;
        }
        if let Some(direction) = update.direction {
            self.direction = direction;
        }
    }

    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        let ordering = match self.field {
            SortField::Manual => Ordering::Equal,
            SortField::Title => a.title.cmp(&b.title),
            SortField::Status => a.status.as_str().cmp(b.status.as_str()),
            SortField::Priority => priority_rank(a).cmp(&priority_rank(b)),
            SortField::DueDate => date_millis(&a.due_date).cmp(&date_millis(&b.due_date)),
            SortField::ScheduledDate => {
                let a = a.scheduled_date.as_deref().unwrap_or_default();
                let b = b.scheduled_date.as_deref().unwrap_or_default();
                date_millis(a).cmp(&date_millis(b))
            }
        };
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Stable sort; ties keep store order
    pub fn sort(&self, tasks: &mut [&Task]) {
        if self.field != SortField::Manual {
            tasks.sort_by(|a, b| self.compare(a, b));
        }
    }
}

/// Partial sort change for `set_sort`
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SortUpdate {
    pub field: Option<SortField>,
    pub direction: Option<SortDirection>,
}

impl SortUpdate {
    pub fn field(field: SortField) -> Self {
        Self {
            field: Some(field),
            direction: None,
        }
    }

    pub fn direction(direction: SortDirection) -> Self {
        Self {
            field: None,
            direction: Some(direction),
        }
    }

    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.direction = Some(direction);
        self
    }
}

/// low=1, medium=2, high=3, unset=0
pub fn priority_rank(task: &Task) -> u8 {
    task.priority.map_or(0, |p| p.rank())
}

/// Milliseconds since the epoch for RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` or
/// `YYYY-MM-DD`. Blank or unparseable dates sort as 0.
pub fn date_millis(value: &str) -> i64 {
    let value = value.trim();
    if value.is_empty() {
        return 0;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.timestamp_millis();
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return dt.and_utc().timestamp_millis();
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map_or(0, |dt| dt.and_utc().timestamp_millis())
}
