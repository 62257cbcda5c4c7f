//! Persisted history of past analyses

pub mod storage;
pub mod store;

pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{HistoryStore, HISTORY_KEY};
