pub mod memory;

pub use memory::{like_matches, MemoryConnection, StorageError};
