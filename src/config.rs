use serde::Deserialize;

use crate::{
    cache::Cache,
    error::{SimError, SimResult},
    hierarchy::{Hierarchy, HierarchyState},
    memory::Memory,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CacheConfig {
    pub name: String,
    pub size: usize,
    /// Accepted and reported, but placement is always fully associative.
    #[serde(default = "default_associativity")]
    pub associativity: usize,
    pub line_size: usize,
}

fn default_associativity() -> usize {
    1
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub memory_size: usize,
    pub caches: Vec<CacheConfig>,
}

impl Default for Config {
    fn default() -> Self {
        let level = |name: &str, size, associativity| CacheConfig {
            name: name.to_string(),
            size,
            associativity,
            line_size: 16,
        };
        Config {
            memory_size: 1024,
            caches: vec![level("L1", 32, 2), level("L2", 64, 4), level("L3", 128, 8)],
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.memory_size == 0 {
            return Err(SimError::InvalidConfig("memory_size must be non-zero".into()));
        }
        if self.caches.is_empty() {
            return Err(SimError::InvalidConfig("at least one cache level is required".into()));
        }
        for cc in &self.caches {
            let bad = |why: &str| SimError::InvalidConfig(format!("cache {}: {}", cc.name, why));
            if cc.line_size == 0 {
                return Err(bad("line_size must be non-zero"));
            }
            if cc.size == 0 {
                return Err(bad("size must be non-zero"));
            }
            if cc.size % cc.line_size != 0 {
                return Err(bad("size must be a multiple of line_size"));
            }
            if cc.associativity == 0 {
                return Err(bad("associativity must be non-zero"));
            }
        }
        Ok(())
    }

    pub fn to_hierarchy(self) -> SimResult<Hierarchy> {
        self.validate()?;
        let levels = self
            .caches
            .into_iter()
            .map(|cc| Cache::new(cc.name, cc.size, cc.associativity, cc.line_size))
            .collect();
        Ok(Hierarchy::new(HierarchyState {
            levels,
            memory: Memory::new(self.memory_size),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_setup() {
        let h = Config::default().to_hierarchy().unwrap();
        let lines: Vec<_> = h.state().levels.iter().map(|c| c.line_count()).collect();
        assert_eq!(lines, vec![2, 4, 8]);
        assert_eq!(h.state().memory.size(), 1024);
        assert_eq!(h.state().levels[2].associativity(), 8);
    }

    #[test]
    fn parses_json() {
        let config = Config::from_json(
            r#"{
                "memory_size": 4096,
                "caches": [
                    { "name": "L1", "size": 64, "associativity": 2, "line_size": 32 },
                    { "name": "L2", "size": 256, "line_size": 32 }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(config.caches.len(), 2);
        assert_eq!(config.caches[1].associativity, 1);
        assert_eq!(config.memory_size, 4096);
    }

    #[test]
    fn rejects_bad_levels() {
        let mut config = Config::default();
        config.caches[0].line_size = 0;
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));

        let mut config = Config::default();
        config.caches[1].size = 50;
        assert!(matches!(config.to_hierarchy(), Err(SimError::InvalidConfig(_))));

        let config = Config {
            memory_size: 1024,
            caches: vec![],
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn huge_sizes_build_without_allocating() {
        let mut h = Config::from_json(
            r#"{"memory_size": 18446744073709551615,
                "caches": [{"name": "L1", "size": 18446744073709551600, "line_size": 16}]}"#,
        )
        .unwrap()
        .to_hierarchy()
        .unwrap();
        assert_eq!(h.state().memory.size(), usize::MAX);
        assert_eq!(h.state().levels[0].line_count(), usize::MAX / 16);

        let trace = h.access_address(1 << 31).unwrap();
        assert_eq!(trace.lines(), vec!["miss at L1", "main-memory access"]);
        assert_eq!(h.state().levels[0].resident_count(), 1);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(Config::from_json("{"), Err(SimError::Json(_))));
    }
}
