//! Drag-and-drop reordering of tasks and columns

mod announce;
mod coordinator;
mod entity;
mod reorder;

pub use announce::{column_position, task_position};
pub use coordinator::DragCoordinator;
pub use entity::DragEntity;
pub use reorder::{array_move, move_column, move_task_over_task, move_task_to_column};
