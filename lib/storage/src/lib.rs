//! # relevant Storage
//!
//! Persistence layer for the relevant content engine: atomic bincode
//! snapshots of the in-memory index, restored on startup and refreshed by a
//! periodic background save.

pub mod manager;
pub mod persistence;

pub use manager::StorageManager;
pub use persistence::{IndexSnapshot, ItemSnapshot, SnapshotPersistence};
