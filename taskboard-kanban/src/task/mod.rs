//! Task commands

mod add;
mod remove;
mod set;
mod update;

pub use add::AddTask;
pub use remove::RemoveTask;
pub use set::SetTasks;
pub use update::UpdateTask;
