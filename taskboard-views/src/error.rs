//! Error types for the view store

use taskboard_kanban::KanbanError;
use thiserror::Error;

/// Result type for view operations
pub type Result<T> = std::result::Result<T, ViewError>;

#[derive(Debug, Error)]
pub enum ViewError {
    /// Saved filter sets need a name
    #[error("saved filter name must not be empty")]
    EmptyFilterName,

    /// `load_saved_filters` with nothing saved
    #[error("no saved filters")]
    NoSavedFilters,

    /// Reading or decoding the view snapshot failed
    #[error("view snapshot error: {0}")]
    Snapshot(#[from] KanbanError),
}
