//! Drag entities

use crate::types::{Column, Task};
use serde::{Deserialize, Serialize};

/// What is being dragged, or what it is dragged over.
///
/// Serialized as `{"type": "Column", "column": {...}}` or
/// `{"type": "Task", "task": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EntityRepr", into = "EntityRepr")]
pub enum DragEntity {
    Column(Column),
    Task(Task),
}

#[derive(Serialize, Deserialize)]
#[serde(tag = "type")]
enum EntityRepr {
    Column { column: Column },
    Task { task: Task },
}

impl From<EntityRepr> for DragEntity {
    fn from(repr: EntityRepr) -> Self {
        match repr {
            EntityRepr::Column { column } => Self::Column(column),
            EntityRepr::Task { task } => Self::Task(task),
        }
    }
}

impl From<DragEntity> for EntityRepr {
    fn from(entity: DragEntity) -> Self {
        match entity {
            DragEntity::Column(column) => Self::Column { column },
            DragEntity::Task(task) => Self::Task { task },
        }
    }
}

impl DragEntity {
    /// Id of the underlying task or column
    pub fn id(&self) -> &str {
        match self {
            Self::Column(column) => column.id.as_str(),
            Self::Task(task) => task.id.as_str(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Column(column) => &column.title,
            Self::Task(task) => &task.title,
        }
    }

    /// "task" or "column"
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Column(_) => "column",
            Self::Task(_) => "task",
        }
    }
}

impl From<Column> for DragEntity {
    fn from(column: Column) -> Self {
        Self::Column(column)
    }
}

impl From<Task> for DragEntity {
    fn from(task: Task) -> Self {
        Self::Task(task)
    }
}
