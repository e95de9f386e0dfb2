//! Page cache implementations.
//!
//! - `memory`: DashMap-backed cache that records revalidations in process

pub mod memory;

pub use memory::InMemoryPageCache;
