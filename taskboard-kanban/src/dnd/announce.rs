//! Screen-reader announcements, computed from the board at event time

use crate::types::{BoardState, Column, ColumnId, Task, TaskId};

/// 1-based position of a task within its column, and the column's size
pub fn task_position(state: &BoardState, id: &TaskId) -> Option<(usize, usize)> {
    let task = state.find_task(id)?;
    position_in(state.tasks_in_column(&task.status).map(|t| &t.id), id)
}

/// 1-based position of a column, and the number of columns
pub fn column_position(state: &BoardState, id: &ColumnId) -> Option<(usize, usize)> {
    position_in(state.columns.iter().map(|c| &c.id), id)
}

fn position_in<'a, I, T>(ids: I, id: &T) -> Option<(usize, usize)>
where
    I: Iterator<Item = &'a T>,
    T: PartialEq + 'a,
{
    let ids: Vec<_> = ids.collect();
    let index = ids.iter().position(|candidate| *candidate == id)?;
    Some((index + 1, ids.len()))
}

pub fn picked_up_task(state: &BoardState, task: &Task) -> String {
    let (position, total) = task_position(state, &task.id).unwrap_or((0, 0));
    format!(
        "Picked up task {} at position {} of {} in column {}.",
        task.title,
        position,
        total,
        state.column_title(&task.status)
    )
}

pub fn picked_up_column(state: &BoardState, column: &Column) -> String {
    let (position, total) = column_position(state, &column.id).unwrap_or((0, 0));
    format!(
        "Picked up column {} at position {} of {}.",
        column.title, position, total
    )
}

pub fn column_over_column(state: &BoardState, active: &Column, over: &ColumnId) -> String {
    let (position, total) = column_position(state, over).unwrap_or((0, 0));
    format!(
        "Column {} was moved over {} at position {} of {}.",
        active.title,
        state.column_title(over),
        position,
        total
    )
}

/// Task hovering within the column it was picked up from
pub fn task_over_position(state: &BoardState, task: &Task) -> String {
    let (position, total) = task_position(state, &task.id).unwrap_or((0, 0));
    format!(
        "Task {} was moved over position {} of {} in column {}.",
        task.title,
        position,
        total,
        state.column_title(&task.status)
    )
}

/// Task hovering outside the column it was picked up from
pub fn task_over_column(state: &BoardState, task: &Task) -> String {
    let (position, total) = task_position(state, &task.id).unwrap_or((0, 0));
    format!(
        "Task {} was moved over column {} in position {} of {}.",
        task.title,
        state.column_title(&task.status),
        position,
        total
    )
}

pub fn column_dropped(state: &BoardState, column: &Column) -> String {
    let (position, total) = column_position(state, &column.id).unwrap_or((0, 0));
    format!(
        "Column {} was dropped into position {} of {}.",
        column.title, position, total
    )
}

pub fn task_dropped(state: &BoardState, task: &Task) -> String {
    let (position, total) = task_position(state, &task.id).unwrap_or((0, 0));
    format!(
        "Task {} was dropped into position {} of {} in column {}.",
        task.title,
        position,
        total,
        state.column_title(&task.status)
    )
}

/// `kind` is "task" or "column"
pub fn cancelled(kind: &str) -> String {
    format!("Dragging {kind} cancelled.")
}
