//! Column commands

mod add;
mod remove;
mod set;
mod update;

pub use add::AddColumn;
pub use remove::RemoveColumn;
pub use set::SetColumns;
pub use update::UpdateColumn;
