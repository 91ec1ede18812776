use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    replace::{AccessResult, Lru},
    snapshot::{CacheSnapshot, ResidentLine},
    Address, Tag,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStats {
    pub name: String,
    pub misses: u64,
    pub hits: u64,
    pub evictions: u64,
    pub miss_rate: f64,
}

/// A fully-associative cache with LRU replacement.
///
/// `associativity` is kept for reporting only; every line is a candidate for
/// every tag.
#[derive(Debug)]
pub struct Cache {
    name: String,
    capacity: usize,
    associativity: usize,
    line_size: usize,
    n_lines: usize,
    /// tag -> first address that brought the line in
    lines: BTreeMap<Tag, Address>,
    repl: Lru,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl Cache {
    pub fn new(name: String, capacity: usize, associativity: usize, line_size: usize) -> Self {
        assert!(line_size > 0, "line size must be non-zero");
        let n_lines = capacity / line_size;
        Cache {
            name,
            capacity,
            associativity,
            line_size,
            n_lines,
            lines: BTreeMap::new(),
            repl: Lru::new(),
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn associativity(&self) -> usize {
        self.associativity
    }

    pub fn line_size(&self) -> usize {
        self.line_size
    }

    pub fn tag_of(&self, addr: Address) -> Tag {
        addr / self.line_size as Address
    }

    pub fn line_count(&self) -> usize {
        self.n_lines
    }

    pub fn resident_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_full(&self) -> bool {
        self.lines.len() >= self.n_lines
    }

    pub fn contains(&self, addr: Address) -> bool {
        self.lines.contains_key(&self.tag_of(addr))
    }

    /// Looks `addr` up and leaves its line resident and most recently used.
    ///
    /// On a miss the LRU line is evicted first if the cache is full.
    pub fn access(&mut self, addr: Address) -> AccessResult {
        let tag = self.tag_of(addr);
        if self.lines.contains_key(&tag) {
            self.repl.touch(tag);
            return AccessResult::Hit;
        }

        if self.is_full() {
            if let Some(victim) = self.repl.pop_lru() {
                self.lines.remove(&victim);
                self.evictions += 1;
                log::debug!("{}: evicted tag {} for tag {}", self.name, victim, tag);
            }
        }
        // A zero-line cache never holds anything.
        if self.n_lines > 0 {
            self.lines.insert(tag, addr);
            self.repl.insert(tag);
        }
        AccessResult::Miss
    }

    /// Tags in recency order, MRU first.
    pub fn recency(&self) -> Vec<Tag> {
        self.repl.iter().collect()
    }

    pub fn state(&self) -> CacheSnapshot {
        CacheSnapshot::new(
            &self.name,
            self.n_lines,
            self.lines
                .iter()
                .map(|(&tag, &address)| ResidentLine { tag, address }),
        )
    }

    pub fn hit(&mut self) {
        self.hits += 1;
    }

    pub fn miss(&mut self) {
        self.misses += 1;
    }

    pub fn make_stats(&self) -> CacheStats {
        let total_access = self.hits + self.misses;
        let miss_rate = if total_access == 0 {
            0.0
        } else {
            self.misses as f64 / total_access as f64
        };
        CacheStats {
            name: self.name.clone(),
            misses: self.misses,
            hits: self.hits,
            evictions: self.evictions,
            miss_rate,
        }
    }
}
