mod error;
mod memory;
mod partition;
mod traits;

pub mod filesystem;

pub use error::StorageError;
pub use memory::MemoryKvStore;
pub use partition::{DEFAULT_MAX_PARTITION_BYTES, PartitionMap, PartitionStorage};
pub use traits::KeyValueStore;
