//! The visible task list: filter, search, then sort

use crate::filter::matches_search;
use crate::state::ViewState;
use taskboard_kanban::Task;

/// Recompute the visible tasks for `view`. Pure and uncached.
pub fn derive_visible_tasks<'a>(tasks: &'a [Task], view: &ViewState) -> Vec<&'a Task> {
    let mut visible: Vec<&Task> = tasks
        .iter()
        .filter(|task| view.filters.matches(task))
        .filter(|task| matches_search(&view.search_query, task))
        .collect();
    view.sort.sort(&mut visible);
    visible
}
