//! Zamo preference store
//!
//! A tiny asynchronous key-value layer for user preferences (language, theme
//! mode). Values are plain strings under well-known keys; there is no schema
//! and no structured payloads.
//!
//! Backends:
//! - [`MemoryStore`]: process-local map, used by tests and ephemeral sessions
//! - [`FileStore`]: a single TOML table on disk, rewritten atomically
//!
//! State managers never surface [`StoreError`] to their consumers. They log
//! it and keep running on their in-memory value, so a broken store can only
//! cost persistence, never the UI.

mod error;
mod file;
pub mod keys;
mod memory;
mod pending;
mod store;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{Result, StoreError};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use pending::{current_runtime, Background, Pending};
pub use store::{PreferenceStore, SharedStore};
