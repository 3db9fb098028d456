// ABOUTME: Persistence adapter between the workspace and a storage backend.
// ABOUTME: Coalesces mutations into one write per flush; failures are only logged.

use tabtile_core::{PersistenceSettings, Storage, StorageError};

use crate::registry::ContentRegistry;
use crate::snapshot::WorkspaceSnapshot;
use crate::workspace::Workspace;

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported layout version: {0}")]
    UnsupportedVersion(u32),
}

#[derive(Debug)]
pub struct Persister<S> {
    storage: S,
    key: String,
    saved_revision: Option<u64>,
}

impl<S: Storage> Persister<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            saved_revision: None,
        }
    }

    pub fn from_settings(storage: S, settings: &PersistenceSettings) -> Self {
        Self::new(storage, settings.key.clone())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// True if the workspace changed since the last successful save
    pub fn is_dirty(&self, workspace: &Workspace) -> bool {
        self.saved_revision != Some(workspace.revision())
    }

    /// Serialize and write unconditionally
    pub fn save(&mut self, workspace: &Workspace) -> Result<(), PersistError> {
        let json = serde_json::to_vec(&workspace.snapshot())?;
        self.storage.set(&self.key, &json)?;
        self.saved_revision = Some(workspace.revision());
        Ok(())
    }

    /// Save if anything changed; call once at the end of each event turn.
    ///
    /// Returns whether a write happened.
    pub fn flush(&mut self, workspace: &Workspace) -> bool {
        if !self.is_dirty(workspace) {
            return false;
        }
        match self.save(workspace) {
            Ok(()) => {
                tracing::debug!("Saved layout at revision {}", workspace.revision());
                true
            }
            Err(e) => {
                tracing::error!("Failed to save layout: {}", e);
                false
            }
        }
    }

    /// Load the persisted workspace, if there is one
    pub fn try_load(&mut self, registry: &ContentRegistry) -> Result<Option<Workspace>, PersistError> {
        let Some(bytes) = self.storage.get(&self.key)? else {
            return Ok(None);
        };
        let snapshot: WorkspaceSnapshot = serde_json::from_slice(&bytes)?;
        if snapshot.version > WorkspaceSnapshot::CURRENT_VERSION {
            return Err(PersistError::UnsupportedVersion(snapshot.version));
        }

        let workspace = snapshot.restore(registry);
        self.saved_revision = Some(workspace.revision());
        Ok(Some(workspace))
    }

    /// Like `try_load`, but logs failures and returns `None`
    pub fn load(&mut self, registry: &ContentRegistry) -> Option<Workspace> {
        match self.try_load(registry) {
            Ok(workspace) => workspace,
            Err(e) => {
                tracing::error!("Failed to load layout: {}", e);
                None
            }
        }
    }
}
