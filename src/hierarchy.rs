//! Cascading lookup across the cache levels, with backfill on resolution.
//!
//! Each level runs its own LRU, so the hierarchy is not inclusive: a line in
//! L1 may already be gone from L2 or L3.

use std::fmt;

use serde::Serialize;

use crate::{
    cache::{Cache, CacheStats},
    error::{SimError, SimResult},
    memory::Memory,
    snapshot::CacheSnapshot,
    Address,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessEvent {
    Hit(String),
    Miss(String),
    MemoryAccess,
}

impl fmt::Display for AccessEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessEvent::Hit(level) => write!(f, "hit at {}", level),
            AccessEvent::Miss(level) => write!(f, "miss at {}", level),
            AccessEvent::MemoryAccess => write!(f, "main-memory access"),
        }
    }
}

/// What happened during one logical access, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessTrace {
    pub address: Address,
    pub events: Vec<AccessEvent>,
}

impl AccessTrace {
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(|e| e.to_string()).collect()
    }
}

/// Caches (nearest first) and the memory behind them.
#[derive(Debug)]
pub struct HierarchyState {
    pub levels: Vec<Cache>,
    pub memory: Memory,
}

#[derive(Debug, Serialize)]
pub struct HierarchyStats {
    pub caches: Vec<CacheStats>,
    pub memory_reads: u64,
}

#[derive(Debug)]
pub struct Hierarchy {
    state: HierarchyState,
}

impl Hierarchy {
    pub fn new(state: HierarchyState) -> Self {
        Hierarchy { state }
    }

    pub fn state(&self) -> &HierarchyState {
        &self.state
    }

    /// Resolves one address against the levels in order, then backfills every
    /// level nearer than the one that resolved it, outermost first.
    ///
    /// Addresses beyond main memory are rejected before any cache is touched.
    pub fn access_address(&mut self, addr: Address) -> SimResult<AccessTrace> {
        if !self.state.memory.in_range(addr) {
            return Err(SimError::AddressOutOfRange {
                address: addr,
                size: self.state.memory.size(),
            });
        }

        let mut events = Vec::with_capacity(self.state.levels.len() + 1);
        let mut resolved_at = None;
        for (level, cache) in self.state.levels.iter_mut().enumerate() {
            if cache.access(addr).is_hit() {
                cache.hit();
                events.push(AccessEvent::Hit(cache.name().to_string()));
                resolved_at = Some(level);
                break;
            }
            cache.miss();
            events.push(AccessEvent::Miss(cache.name().to_string()));
        }

        let resolved_at = match resolved_at {
            Some(level) => level,
            None => {
                self.state.memory.read(addr)?;
                events.push(AccessEvent::MemoryAccess);
                self.state.levels.len()
            }
        };

        // The outcome of a fill is not a lookup and is not counted.
        for cache in self.state.levels[..resolved_at].iter_mut().rev() {
            log::debug!("backfill {} with address {}", cache.name(), addr);
            let _ = cache.access(addr);
        }

        Ok(AccessTrace {
            address: addr,
            events,
        })
    }

    pub fn snapshots(&self) -> Vec<CacheSnapshot> {
        self.state.levels.iter().map(|c| c.state()).collect()
    }

    pub fn stats(&self) -> HierarchyStats {
        HierarchyStats {
            caches: self.state.levels.iter().map(|c| c.make_stats()).collect(),
            memory_reads: self.state.memory.reads(),
        }
    }
}
