//! Durability paths for a session: the ephemeral key-value snapshot and
//! named save points on disk.

pub mod kv;
pub mod save_point;
pub mod snapshot;

pub use kv::{KeyValueStore, MemoryKv};
pub use save_point::SavePointRepo;
pub use snapshot::{PartStatus, Restored, SnapshotGateway};
