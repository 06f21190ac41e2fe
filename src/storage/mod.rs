//! Persistence boundary: a get/set blob store plus the schedule codec on top.

pub mod blob;
pub mod schedule_store;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore, StorageError};
pub use schedule_store::{load_schedule, save_schedule, SCHEDULE_KEY};
