//! # storage-adapters
//!
//! Document-store backends implementing the `domains` persistence ports.

pub mod memory;

#[cfg(feature = "db-sqlite")]
pub mod sqlite;

pub use memory::MemoryStore;

#[cfg(feature = "db-sqlite")]
pub use sqlite::SqliteStore;
