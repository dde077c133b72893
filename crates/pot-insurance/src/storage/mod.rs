//! Backing stores for the resource repositories.

pub mod memory;
pub mod sqlite;

pub use memory::MemoryRepository;
pub use sqlite::SqliteRepository;
