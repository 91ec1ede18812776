//! Read-only views of cache contents, handed to the report.

use std::fmt;

use crate::{Address, Tag};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResidentLine {
    pub tag: Tag,
    pub address: Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineState {
    pub index: usize,
    /// `None` for an unused line.
    pub slot: Option<ResidentLine>,
}

impl fmt::Display for LineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot {
            Some(ResidentLine { tag, address }) => {
                write!(f, "{}: tag {} (address {})", self.index, tag, address)
            }
            None => write!(f, "{}: empty", self.index),
        }
    }
}

/// Lines of one cache: residents in ascending tag order, then empties up to
/// `line_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSnapshot {
    pub name: String,
    pub line_count: usize,
    pub lines: Vec<LineState>,
}

impl CacheSnapshot {
    pub fn new<I>(name: &str, line_count: usize, residents: I) -> Self
    where
        I: IntoIterator<Item = ResidentLine>,
    {
        let mut residents = residents.into_iter();
        let lines = (0..line_count)
            .map(|index| LineState {
                index,
                slot: residents.next(),
            })
            .collect();
        CacheSnapshot {
            name: name.to_string(),
            line_count,
            lines,
        }
    }

    pub fn resident_tags(&self) -> Vec<Tag> {
        self.lines
            .iter()
            .filter_map(|l| l.slot.map(|r| r.tag))
            .collect()
    }

    /// Header followed by one row per line.
    pub fn rows(&self) -> Vec<String> {
        std::iter::once(format!("Cache ({} lines):", self.line_count))
            .chain(self.lines.iter().map(|l| l.to_string()))
            .collect()
    }
}
