//! Crawl frontier
//!
//! FIFO queue of pending URLs plus the visited and queued sets that keep
//! the crawl deduplicated. All membership checks go through the normalized
//! dedup key (fragment stripped), so `page#a` and `page#b` are one URL.

use std::collections::{HashSet, VecDeque};

use url::Url;

use crate::urls::normalize_for_dedup;

/// Breadth-first URL frontier with dedup.
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<Url>,
    visited: HashSet<String>,
    queued: HashSet<String>,
}

impl Frontier {
    /// Starts a frontier containing only the seed URL.
    pub fn seed(url: Url) -> Self {
        let mut frontier = Self::default();
        frontier.enqueue(url);
        frontier
    }

    /// Takes the next URL in FIFO order.
    pub fn pop(&mut self) -> Option<Url> {
        let url = self.queue.pop_front()?;
        self.queued.remove(&normalize_for_dedup(&url));
        Some(url)
    }

    /// Marks a URL as processed. Idempotent.
    pub fn mark_visited(&mut self, url: &Url) {
        self.visited.insert(normalize_for_dedup(url));
    }

    /// Adds a URL unless its dedup key is already visited or queued.
    /// Returns whether it was accepted.
    pub fn enqueue(&mut self, url: Url) -> bool {
        let key = normalize_for_dedup(&url);
        if self.visited.contains(&key) || !self.queued.insert(key) {
            return false;
        }
        self.queue.push_back(url);
        true
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(&normalize_for_dedup(url))
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
