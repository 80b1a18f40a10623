//! ViewStore: view preferences with snapshot persistence

use crate::derive::derive_visible_tasks;
use crate::error::{Result, ViewError};
use crate::filter::{FilterUpdate, TaskFilters};
use crate::sort::SortUpdate;
use crate::state::{PreviewField, SavedFilters, ViewState};
use chrono::Utc;
use std::sync::Arc;
use taskboard_config::TaskboardConfig;
use taskboard_kanban::storage::{decode_snapshot, encode_snapshot, Migrations};
use taskboard_kanban::{FileStorage, MemoryStorage, Pretty, SnapshotStorage, Task};

/// Owner of the view state. Independent of the task store; every change is
/// written to its own snapshot key.
pub struct ViewStore {
    state: ViewState,
    storage: Arc<dyn SnapshotStorage>,
    snapshot_key: String,
}

impl std::fmt::Debug for ViewStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewStore")
            .field("snapshot_key", &self.snapshot_key)
            .field("state", &self.state)
            .finish()
    }
}

impl ViewStore {
    /// Default view; nothing is read from `storage`
    pub fn new(storage: Arc<dyn SnapshotStorage>, config: &TaskboardConfig) -> Self {
        Self {
            state: ViewState::default(),
            storage,
            snapshot_key: config.view_snapshot_key.clone(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()), &TaskboardConfig::default())
    }

    /// Load the saved view, or the default view when none exists
    pub fn open(storage: Arc<dyn SnapshotStorage>, config: &TaskboardConfig) -> Result<Self> {
        let mut store = Self::new(storage, config);
        if let Some(bytes) = store.storage.load(&store.snapshot_key)? {
            store.state = decode_snapshot(&bytes, &Migrations::default())?;
        }
        tracing::info!("opened view{}", Pretty(&store.state));
        Ok(store)
    }

    /// Open the view kept under `config.storage_dir`
    pub fn open_dir(config: &TaskboardConfig) -> Result<Self> {
        Self::open(Arc::new(FileStorage::new(config.storage_dir.clone())), config)
    }

    /// Write a final snapshot and release the store
    pub fn close(self) -> Result<()> {
        let bytes = encode_snapshot(&self.state)?;
        self.storage.save(&self.snapshot_key, &bytes)?;
        tracing::info!(key = %self.snapshot_key, "closed view");
        Ok(())
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn search_query(&self) -> &str {
        &self.state.search_query
    }

    pub fn filters(&self) -> &TaskFilters {
        &self.state.filters
    }

    pub fn saved_filters(&self) -> Option<&SavedFilters> {
        self.state.saved_filters.as_ref()
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.update(|state| state.search_query = query);
    }

    /// Replace only the filter sets present in `update`
    pub fn set_filters(&mut self, update: FilterUpdate) {
        self.update(|state| state.filters.merge(update));
    }

    /// Clear all filter sets and the search text
    pub fn clear_filters(&mut self) {
        self.update(|state| {
            state.filters = TaskFilters::default();
            state.search_query.clear();
        });
    }

    pub fn set_sort(&mut self, update: SortUpdate) {
        self.update(|state| state.sort.merge(update));
    }

    pub fn set_preview_fields(&mut self, fields: Vec<PreviewField>) {
        self.update(|state| state.preview_fields = fields);
    }

    /// Save the current filters and search text under `name`, replacing any
    /// earlier saved set
    pub fn save_current_filters(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ViewError::EmptyFilterName);
        }
        self.update(|state| {
            state.saved_filters = Some(SavedFilters {
                name,
                filters: state.filters.clone(),
                search_query: state.search_query.clone(),
                saved_at: Utc::now(),
            });
        });
        Ok(())
    }

    /// Restore the saved filters and search text
    pub fn load_saved_filters(&mut self) -> Result<()> {
        let saved = self
            .state
            .saved_filters
            .clone()
            .ok_or(ViewError::NoSavedFilters)?;
        tracing::debug!(name = %saved.name, "loading saved filters");
        self.update(|state| {
            state.filters = saved.filters;
            state.search_query = saved.search_query;
        });
        Ok(())
    }

    pub fn clear_saved_filters(&mut self) {
        self.update(|state| state.saved_filters = None);
    }

    /// Back to the default view, saved filters included
    pub fn reset_view(&mut self) {
        self.update(|state| *state = ViewState::default());
    }

    /// Visible tasks for the current view
    pub fn derive_visible_tasks<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        derive_visible_tasks(tasks, &self.state)
    }

    fn update(&mut self, change: impl FnOnce(&mut ViewState)) {
        let mut next = self.state.clone();
        change(&mut next);
        if next == self.state {
            return;
        }
        self.state = next;
        self.persist();
    }

    fn persist(&self) {
        let saved = encode_snapshot(&self.state)
            .and_then(|bytes| self.storage.save(&self.snapshot_key, &bytes));
        if let Err(e) = saved {
            tracing::warn!(key = %self.snapshot_key, error = %e, "failed to persist view snapshot");
        }
    }
}
