//! Three-level (or any-depth) cache hierarchy simulator: fully-associative LRU
//! caches in front of a flat main memory.

pub mod cache;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod input;
pub mod memory;
pub mod replace;
pub mod report;
pub mod session;
pub mod snapshot;

pub type Address = u64;
pub type Tag = u64;
pub type Word = u64;

pub use cache::Cache;
pub use config::Config;
pub use error::{SimError, SimResult};
pub use hierarchy::{AccessEvent, AccessTrace, Hierarchy, HierarchyState};
pub use memory::Memory;
