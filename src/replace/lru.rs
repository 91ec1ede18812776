use std::collections::VecDeque;

use crate::Tag;

/// Recency order over the resident tags of one cache.
/// Front is most recently used, back is least recently used.
#[derive(Debug, Default)]
pub struct Lru {
    ru_order: VecDeque<Tag>,
}

impl Lru {
    pub fn new() -> Self {
        Lru {
            ru_order: VecDeque::new(),
        }
    }

    /// Moves an already tracked tag to the MRU position.
    pub fn touch(&mut self, tag: Tag) {
        if let Some(idx) = self.ru_order.iter().position(|&t| t == tag) {
            self.ru_order.remove(idx);
        }
        self.ru_order.push_front(tag);
    }

    pub fn insert(&mut self, tag: Tag) {
        self.ru_order.push_front(tag);
    }

    /// Removes and returns the least recently used tag.
    pub fn pop_lru(&mut self) -> Option<Tag> {
        self.ru_order.pop_back()
    }

    pub fn len(&self) -> usize {
        self.ru_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ru_order.is_empty()
    }

    /// MRU first.
    pub fn iter(&self) -> impl Iterator<Item = Tag> + '_ {
        self.ru_order.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_moves_to_front() {
        let mut lru = Lru::new();
        lru.insert(0);
        lru.insert(1);
        lru.insert(2);
        lru.touch(0);
        assert_eq!(lru.iter().collect::<Vec<_>>(), vec![0, 2, 1]);
        assert_eq!(lru.pop_lru(), Some(1));
        assert_eq!(lru.len(), 2);
    }

    #[test]
    fn pop_on_empty() {
        let mut lru = Lru::new();
        assert!(lru.is_empty());
        assert_eq!(lru.pop_lru(), None);
    }
}
