//! Pure reorder primitives. Each returns a new vector, or `None` when the
//! move changes nothing.

use crate::types::{Column, ColumnId, Task, TaskId};

/// Move the element at `from` to `to`, shifting the ones in between.
/// `to` is clamped to the last index; an out-of-range `from` returns a copy.
pub fn array_move<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut moved = items.to_vec();
    if from >= moved.len() {
        return moved;
    }
    let item = moved.remove(from);
    let to = to.min(moved.len());
    moved.insert(to, item);
    moved
}

/// Drag task `active` over task `over`.
///
/// Within one column this is an array move to `over`'s index. Across
/// columns the active task first takes `over`'s status, so it lands next to
/// `over` in the new column.
pub fn move_task_over_task(tasks: &[Task], active: &TaskId, over: &TaskId) -> Option<Vec<Task>> {
    if active == over {
        return None;
    }
    let active_index = tasks.iter().position(|t| &t.id == active)?;
    let over_index = tasks.iter().position(|t| &t.id == over)?;

    let over_status = &tasks[over_index].status;
    if tasks[active_index].status == *over_status {
        return Some(array_move(tasks, active_index, over_index));
    }

    let mut recolumned = tasks.to_vec();
    recolumned[active_index].status = over_status.clone();
    Some(array_move(&recolumned, active_index, over_index))
}

/// Drag task `active` onto a column surface: status changes, global
/// position does not.
pub fn move_task_to_column(tasks: &[Task], active: &TaskId, column: &ColumnId) -> Option<Vec<Task>> {
    let index = tasks.iter().position(|t| &t.id == active)?;
    if tasks[index].status == *column {
        return None;
    }
    let mut moved = tasks.to_vec();
    moved[index].status = column.clone();
    Some(moved)
}

/// Drag column `active` over column `over`
pub fn move_column(columns: &[Column], active: &ColumnId, over: &ColumnId) -> Option<Vec<Column>> {
    if active == over {
        return None;
    }
    let from = columns.iter().position(|c| &c.id == active)?;
    let to = columns.iter().position(|c| &c.id == over)?;
    Some(array_move(columns, from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_array_move() {
        assert_eq!(array_move(&[1, 2, 3, 4], 0, 2), vec![2, 3, 1, 4]);
        assert_eq!(array_move(&[1, 2, 3, 4], 3, 0), vec![4, 1, 2, 3]);
        assert_eq!(array_move(&[1, 2, 3], 1, 1), vec![1, 2, 3]);
        assert_eq!(array_move(&[1, 2, 3], 0, 99), vec![2, 3, 1]);
        assert_eq!(array_move(&[1, 2, 3], 7, 0), vec![1, 2, 3]);
    }

    #[test]
    fn test_same_column_move() {
        let tasks = vec![
            Task::new("A", "TODO"),
            Task::new("B", "TODO"),
            Task::new("C", "TODO"),
        ];
        let moved = move_task_over_task(&tasks, &tasks[0].id, &tasks[2].id).unwrap();
        assert_eq!(titles(&moved), vec!["B", "C", "A"]);
        assert!(moved.iter().all(|t| t.status.as_str() == "TODO"));
    }

    #[test]
    fn test_cross_column_move_lands_next_to_over() {
        let tasks = vec![
            Task::new("X", "TODO"),
            Task::new("P", "TODO"),
            Task::new("Y", "DONE"),
        ];
        let moved = move_task_over_task(&tasks, &tasks[0].id, &tasks[2].id).unwrap();

        assert_eq!(titles(&moved), vec!["P", "Y", "X"]);
        assert_eq!(moved[2].status.as_str(), "DONE");
        assert_eq!(moved.len(), tasks.len());
    }

    #[test]
    fn test_over_self_is_noop() {
        let tasks = vec![Task::new("A", "TODO")];
        assert!(move_task_over_task(&tasks, &tasks[0].id, &tasks[0].id).is_none());
    }

    #[test]
    fn test_move_to_column_keeps_index() {
        let tasks = vec![Task::new("A", "TODO"), Task::new("B", "TODO")];
        let moved = move_task_to_column(&tasks, &tasks[0].id, &ColumnId::done()).unwrap();
        assert_eq!(titles(&moved), vec!["A", "B"]);
        assert_eq!(moved[0].status, ColumnId::done());

        assert!(move_task_to_column(&moved, &tasks[0].id, &ColumnId::done()).is_none());
    }

    #[test]
    fn test_move_column() {
        let columns = crate::types::BoardState::default_columns();
        let moved = move_column(&columns, &ColumnId::done(), &ColumnId::todo()).unwrap();
        let ids: Vec<_> = moved.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["DONE", "TODO", "IN_PROGRESS"]);
    }
}
