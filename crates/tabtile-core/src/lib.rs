// ABOUTME: Shared configuration and storage plumbing for tabtile.
// ABOUTME: Defines config file handling and the key/value storage backends.

pub mod config;
pub mod storage;

pub use config::{Config, ConfigError, DropZoneSettings, PersistenceSettings, ResizeSettings};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
