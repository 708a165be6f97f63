//! Storage abstraction and implementations for Contour.
//!
//! This crate provides a key-value store trait with a JSON file reference
//! implementation, plus snapshot save/load/export on top of it.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod memory;
pub mod repository;

pub use trait_::{KeyValueStore, StorageError, Result};
pub use json_storage::JsonFileStore;
pub use memory::MemoryStore;
pub use repository::{export_file_name, export_snapshot, SnapshotRepository, STATE_KEY};
