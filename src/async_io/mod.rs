//! Record suppliers
//! Implementations of [`RecordSource`](crate::registry::RecordSource) that retrieve
//! the raw regional datasets

pub mod file_ops;
pub mod memory_ops;

pub use file_ops::JsonDirSource;
pub use memory_ops::MemorySource;
