//! Search, filter and sort view over kanban tasks
//!
//! [`ViewStore`] holds the view preferences (search text, filter sets, sort,
//! preview fields and one saved filter set) and persists them under their own
//! snapshot key. [`derive_visible_tasks`] turns a task list into what the
//! board shows:
//!
//! ```rust
//! use taskboard_kanban::{Priority, Task};
//! use taskboard_views::{derive_visible_tasks, SortDirection, SortField, SortSpec, ViewState};
//!
//! let tasks = vec![
//!     Task::new("Call lead", "TODO").with_priority(Priority::Low),
//!     Task::new("Call back", "TODO").with_priority(Priority::High),
//! ];
//! let view = ViewState {
//!     search_query: "call".into(),
//!     sort: SortSpec::new(SortField::Priority, SortDirection::Desc),
//!     ..ViewState::default()
//! };
//! let visible = derive_visible_tasks(&tasks, &view);
//! assert_eq!(visible[0].title, "Call back");
//! ```

mod derive;
mod error;
mod filter;
mod sort;
mod state;
mod store;

pub use derive::derive_visible_tasks;
pub use error::{Result, ViewError};
pub use filter::{matches_search, FilterUpdate, TaskFilters};
pub use sort::{date_millis, priority_rank, SortDirection, SortField, SortSpec, SortUpdate};
pub use state::{PreviewField, SavedFilters, ViewState};
pub use store::ViewStore;
