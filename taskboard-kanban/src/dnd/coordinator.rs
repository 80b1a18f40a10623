//! Drag gesture state and the store commits it triggers

use super::announce;
use super::entity::DragEntity;
use super::reorder::{move_column, move_task_over_task, move_task_to_column};
use crate::error::{KanbanError, Result};
use crate::store::TaskStore;
use crate::types::{Column, ColumnId, Task};

/// Tracks at most one active drag.
///
/// Tasks are committed while hovering (`drag_over`); columns only on drop.
/// Every handler returns the announcement for the event, built from the
/// store after any commit.
#[derive(Debug, Default)]
pub struct DragCoordinator {
    active: Option<DragEntity>,
    /// Column a dragged task was picked up from
    origin: Option<ColumnId>,
}

impl DragCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Detached copy of the dragged entity, taken at drag start
    pub fn overlay(&self) -> Option<&DragEntity> {
        self.active.as_ref()
    }

    /// Whether the element with `id` is the drag source
    pub fn is_dimmed(&self, id: &str) -> bool {
        self.active.as_ref().is_some_and(|active| active.id() == id)
    }

    pub fn drag_start(&mut self, store: &TaskStore, entity: DragEntity) -> Result<String> {
        if self.active.is_some() {
            return Err(KanbanError::DragInProgress);
        }

        let (message, origin) = match &entity {
            DragEntity::Task(task) => {
                let task = fresh_task(store, task)?;
                (announce::picked_up_task(store.snapshot(), task), Some(task.status.clone()))
            }
            DragEntity::Column(column) => {
                let column = fresh_column(store, &column.id)?;
                (announce::picked_up_column(store.snapshot(), column), None)
            }
        };

        tracing::debug!(kind = entity.kind(), id = entity.id(), "drag started");
        self.active = Some(entity);
        self.origin = origin;
        Ok(message)
    }

    /// Hover over `over`. `None` (hovering nothing) changes nothing.
    pub fn drag_over(&mut self, store: &mut TaskStore, over: Option<&DragEntity>) -> Result<Option<String>> {
        let active = self.active.clone().ok_or(KanbanError::NoActiveDrag)?;
        let Some(over) = over else {
            return Ok(None);
        };

        let message = match active {
            DragEntity::Task(task) => {
                let task = fresh_task(store, &task)?.clone();
                let moved = match over {
                    DragEntity::Task(over_task) => {
                        let over_task = fresh_task(store, over_task)?;
                        move_task_over_task(store.tasks(), &task.id, &over_task.id)
                    }
                    DragEntity::Column(column) => {
                        let column = fresh_column(store, &column.id)?;
                        move_task_to_column(store.tasks(), &task.id, &column.id)
                    }
                };
                match moved {
                    Some(tasks) => store.set_tasks(tasks)?,
                    None => tracing::debug!(task = %task.id, "drag over: no reorder"),
                }

                let now = fresh_task(store, &task)?;
                if Some(&now.status) == self.origin.as_ref() {
                    announce::task_over_position(store.snapshot(), now)
                } else {
                    announce::task_over_column(store.snapshot(), now)
                }
            }
            DragEntity::Column(column) => {
                let target = target_column(store, over)?;
                announce::column_over_column(store.snapshot(), &column, &target)
            }
        };

        Ok(Some(message))
    }

    /// Drop over `over` and end the drag. Dropping on nothing ends the drag
    /// without a commit, like a cancel.
    pub fn drag_end(&mut self, store: &mut TaskStore, over: Option<&DragEntity>) -> Result<String> {
        let active = self.active.take().ok_or(KanbanError::NoActiveDrag)?;
        self.origin = None;
        let Some(over) = over else {
            tracing::debug!(kind = active.kind(), "dropped outside any target");
            return Ok(announce::cancelled(active.kind()));
        };

        match active {
            DragEntity::Column(column) => {
                let target = target_column(store, over)?;
                if let Some(columns) = move_column(store.columns(), &column.id, &target) {
                    store.set_columns(columns)?;
                }
                let column = fresh_column(store, &column.id)?;
                Ok(announce::column_dropped(store.snapshot(), column))
            }
            DragEntity::Task(task) => {
                // task-over-task moves were committed while hovering
                if let DragEntity::Column(target) = over {
                    let target = fresh_column(store, &target.id)?;
                    if let Some(tasks) = move_task_to_column(store.tasks(), &task.id, &target.id) {
                        store.set_tasks(tasks)?;
                    }
                }
                let task = fresh_task(store, &task)?;
                Ok(announce::task_dropped(store.snapshot(), task))
            }
        }
    }

    pub fn drag_cancel(&mut self) -> Result<String> {
        let active = self.active.take().ok_or(KanbanError::NoActiveDrag)?;
        self.origin = None;
        tracing::debug!(kind = active.kind(), id = active.id(), "drag cancelled");
        Ok(announce::cancelled(active.kind()))
    }
}

fn fresh_task<'a>(store: &'a TaskStore, task: &Task) -> Result<&'a Task> {
    store.task(&task.id).ok_or_else(|| {
        tracing::warn!(task = %task.id, "drag references unknown task");
        KanbanError::task_not_found(&task.id)
    })
}

fn fresh_column<'a>(store: &'a TaskStore, id: &ColumnId) -> Result<&'a Column> {
    store.column(id).ok_or_else(|| {
        tracing::warn!(column = %id, "drag references unknown column");
        KanbanError::column_not_found(id)
    })
}

/// Column a drop target stands for: the column itself, or a task's column
fn target_column(store: &TaskStore, over: &DragEntity) -> Result<ColumnId> {
    match over {
        DragEntity::Column(column) => Ok(fresh_column(store, &column.id)?.id.clone()),
        DragEntity::Task(task) => Ok(fresh_task(store, task)?.status.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::AddTask;

    fn store_with_tasks(titles: &[(&str, &str)]) -> (TaskStore, Vec<Task>) {
        let mut store = TaskStore::in_memory();
        let tasks = titles
            .iter()
            .map(|(title, status)| store.add_task(AddTask::new(*title).with_status(*status)).unwrap())
            .collect();
        (store, tasks)
    }

    #[test]
    fn test_second_start_rejected() {
        let (store, tasks) = store_with_tasks(&[("A", "TODO")]);
        let mut dnd = DragCoordinator::new();
        dnd.drag_start(&store, tasks[0].clone().into()).unwrap();
        let result = dnd.drag_start(&store, tasks[0].clone().into());
        assert!(matches!(result, Err(KanbanError::DragInProgress)));
    }

    #[test]
    fn test_events_without_drag_rejected() {
        let mut store = TaskStore::in_memory();
        let mut dnd = DragCoordinator::new();
        assert!(matches!(dnd.drag_over(&mut store, None), Err(KanbanError::NoActiveDrag)));
        assert!(matches!(dnd.drag_end(&mut store, None), Err(KanbanError::NoActiveDrag)));
        assert!(matches!(dnd.drag_cancel(), Err(KanbanError::NoActiveDrag)));
    }

    #[test]
    fn test_overlay_and_dimming() {
        let (store, tasks) = store_with_tasks(&[("A", "TODO"), ("B", "TODO")]);
        let mut dnd = DragCoordinator::new();
        dnd.drag_start(&store, tasks[0].clone().into()).unwrap();

        assert_eq!(dnd.overlay(), Some(&DragEntity::Task(tasks[0].clone())));
        assert!(dnd.is_dimmed(tasks[0].id.as_str()));
        assert!(!dnd.is_dimmed(tasks[1].id.as_str()));

        assert_eq!(dnd.drag_cancel().unwrap(), "Dragging task cancelled.");
        assert!(dnd.overlay().is_none());
    }

    #[test]
    fn test_cancel_does_not_commit() {
        let (mut store, tasks) = store_with_tasks(&[("A", "TODO"), ("B", "TODO")]);
        let columns_before = store.columns().to_vec();
        let mut dnd = DragCoordinator::new();

        let done = store.column(&ColumnId::done()).unwrap().clone();
        let todo = store.column(&ColumnId::todo()).unwrap().clone();
        dnd.drag_start(&store, done.into()).unwrap();
        dnd.drag_over(&mut store, Some(&todo.into())).unwrap();
        dnd.drag_cancel().unwrap();

        assert_eq!(store.columns(), columns_before.as_slice());
        assert_eq!(store.tasks().len(), tasks.len());
    }

    #[test]
    fn test_task_over_task_same_column() {
        let (mut store, tasks) = store_with_tasks(&[("A", "TODO"), ("B", "TODO"), ("C", "TODO")]);
        let mut dnd = DragCoordinator::new();

        let start = dnd.drag_start(&store, tasks[0].clone().into()).unwrap();
        assert_eq!(start, "Picked up task A at position 1 of 3 in column To Do.");

        let over = dnd
            .drag_over(&mut store, Some(&tasks[2].clone().into()))
            .unwrap()
            .unwrap();
        assert_eq!(over, "Task A was moved over position 3 of 3 in column To Do.");

        let end = dnd.drag_end(&mut store, Some(&tasks[2].clone().into())).unwrap();
        assert_eq!(end, "Task A was dropped into position 3 of 3 in column To Do.");

        let titles: Vec<_> = store.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_task_over_empty_column_keeps_index() {
        let (mut store, tasks) = store_with_tasks(&[("A", "TODO"), ("B", "TODO")]);
        let mut dnd = DragCoordinator::new();
        let done = store.column(&ColumnId::done()).unwrap().clone();

        dnd.drag_start(&store, tasks[0].clone().into()).unwrap();
        let over = dnd.drag_over(&mut store, Some(&done.clone().into())).unwrap().unwrap();
        assert_eq!(over, "Task A was moved over column Done in position 1 of 1.");
        dnd.drag_end(&mut store, Some(&done.into())).unwrap();

        assert_eq!(store.tasks()[0].id, tasks[0].id);
        assert_eq!(store.tasks()[0].status, ColumnId::done());
    }

    #[test]
    fn test_column_reorder_commits_on_drop() {
        let mut store = TaskStore::in_memory();
        let mut dnd = DragCoordinator::new();
        let todo = store.column(&ColumnId::todo()).unwrap().clone();
        let done = store.column(&ColumnId::done()).unwrap().clone();

        let start = dnd.drag_start(&store, done.clone().into()).unwrap();
        assert_eq!(start, "Picked up column Done at position 3 of 3.");

        let over = dnd.drag_over(&mut store, Some(&todo.clone().into())).unwrap().unwrap();
        assert_eq!(over, "Column Done was moved over To Do at position 1 of 3.");
        assert_eq!(store.columns()[2].id, ColumnId::done());

        let end = dnd.drag_end(&mut store, Some(&todo.into())).unwrap();
        assert_eq!(end, "Column Done was dropped into position 1 of 3.");
        assert_eq!(store.columns()[0].id, ColumnId::done());
    }

    #[test]
    fn test_task_over_unknown_column_rejected() {
        let (mut store, tasks) = store_with_tasks(&[("A", "TODO"), ("B", "TODO")]);
        let before = store.tasks().to_vec();
        let ghost = Column::new("GHOST", "Ghost");
        let mut dnd = DragCoordinator::new();

        dnd.drag_start(&store, tasks[0].clone().into()).unwrap();
        let result = dnd.drag_over(&mut store, Some(&ghost.clone().into()));
        assert!(matches!(result, Err(KanbanError::ColumnNotFound { .. })));
        assert_eq!(store.tasks(), before.as_slice());

        let result = dnd.drag_end(&mut store, Some(&ghost.into()));
        assert!(matches!(result, Err(KanbanError::ColumnNotFound { .. })));
        assert_eq!(store.tasks(), before.as_slice());
        assert!(!dnd.is_dragging());
    }

    #[test]
    fn test_column_over_task_targets_its_column() {
        let (mut store, tasks) = store_with_tasks(&[("A", "TODO")]);
        let done = store.column(&ColumnId::done()).unwrap().clone();
        let mut dnd = DragCoordinator::new();

        dnd.drag_start(&store, done.into()).unwrap();
        let over = dnd.drag_over(&mut store, Some(&tasks[0].clone().into())).unwrap().unwrap();
        assert_eq!(over, "Column Done was moved over To Do at position 1 of 3.");

        let end = dnd.drag_end(&mut store, Some(&tasks[0].clone().into())).unwrap();
        assert_eq!(end, "Column Done was dropped into position 1 of 3.");
        assert_eq!(store.columns()[0].id, ColumnId::done());
    }

    #[test]
    fn test_hover_compares_against_pickup_column() {
        let (mut store, tasks) = store_with_tasks(&[("A", "TODO"), ("B", "TODO"), ("C", "DONE")]);
        let mut dnd = DragCoordinator::new();
        let c: DragEntity = tasks[2].clone().into();

        dnd.drag_start(&store, tasks[0].clone().into()).unwrap();
        let first = dnd.drag_over(&mut store, Some(&c)).unwrap().unwrap();
        assert_eq!(first, "Task A was moved over column Done in position 2 of 2.");

        // still outside the column it was picked up from
        let second = dnd.drag_over(&mut store, Some(&c)).unwrap().unwrap();
        assert_eq!(second, "Task A was moved over column Done in position 1 of 2.");
    }

    #[test]
    fn test_drop_on_nothing_announces_cancel() {
        let (mut store, tasks) = store_with_tasks(&[("A", "TODO")]);
        let mut dnd = DragCoordinator::new();
        dnd.drag_start(&store, tasks[0].clone().into()).unwrap();
        assert_eq!(dnd.drag_over(&mut store, None).unwrap(), None);
        assert_eq!(dnd.drag_end(&mut store, None).unwrap(), "Dragging task cancelled.");
        assert!(!dnd.is_dragging());
    }
}
