//! Property tests for the reorder primitives

use proptest::prelude::*;
use taskboard_kanban::dnd::{array_move, move_task_over_task, move_task_to_column};
use taskboard_kanban::{ColumnId, Task};

const STATUSES: [&str; 3] = ["TODO", "IN_PROGRESS", "DONE"];

fn tasks_strategy() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(0usize..STATUSES.len(), 2..12).prop_map(|statuses| {
        statuses
            .into_iter()
            .enumerate()
            .map(|(i, s)| Task::new(format!("task-{i}"), STATUSES[s]))
            .collect()
    })
}

proptest! {
    #[test]
    fn array_move_is_a_permutation(items in prop::collection::vec(any::<u8>(), 1..20), from in 0usize..20, to in 0usize..20) {
        let moved = array_move(&items, from, to);
        prop_assert_eq!(moved.len(), items.len());

        let mut a = items.clone();
        let mut b = moved.clone();
        a.sort_unstable();
        b.sort_unstable();
        prop_assert_eq!(a, b);

        if from < items.len() {
            prop_assert_eq!(moved[to.min(items.len() - 1)], items[from]);
        }
    }

    #[test]
    fn task_over_task_takes_status_and_lands_adjacent(tasks in tasks_strategy(), a in 0usize..12, o in 0usize..12) {
        let a = a % tasks.len();
        let o = o % tasks.len();
        prop_assume!(a != o);

        let active = tasks[a].id.clone();
        let over = tasks[o].id.clone();
        let moved = move_task_over_task(&tasks, &active, &over).unwrap();

        prop_assert_eq!(moved.len(), tasks.len());
        let ai = moved.iter().position(|t| t.id == active).unwrap();
        let oi = moved.iter().position(|t| t.id == over).unwrap();
        prop_assert_eq!(ai.abs_diff(oi), 1);
        prop_assert_eq!(&moved[ai].status, &tasks[o].status);
    }

    #[test]
    fn task_to_column_keeps_order(tasks in tasks_strategy(), a in 0usize..12, c in 0usize..3) {
        let a = a % tasks.len();
        let column = ColumnId::from_string(STATUSES[c]);
        let id = tasks[a].id.clone();

        match move_task_to_column(&tasks, &id, &column) {
            None => prop_assert_eq!(&tasks[a].status, &column),
            Some(moved) => {
                let before: Vec<_> = tasks.iter().map(|t| t.id.clone()).collect();
                let after: Vec<_> = moved.iter().map(|t| t.id.clone()).collect();
                prop_assert_eq!(before, after);
                prop_assert_eq!(&moved[a].status, &column);
            }
        }
    }
}
