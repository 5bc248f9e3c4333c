//! Persistence layer (key-value string storage).

pub mod storage;

pub use storage::{is_valid_key, FileStorage, MemoryStorage, Persistence, StorageError};
