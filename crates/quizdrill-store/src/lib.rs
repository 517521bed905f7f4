//! quizdrill-store — snapshot storage backends.
//!
//! Implements the `SnapshotStore` trait with a durable file-backed store,
//! an ephemeral in-memory store, and the `ProgressStore` adapter that
//! probes the durable backend at open time and degrades to memory when it
//! is unavailable.

pub mod adapter;
pub mod file;
pub mod memory;

pub use adapter::ProgressStore;
pub use file::FileStore;
pub use memory::MemoryStore;
