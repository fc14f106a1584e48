//! Bounded cache of forbidden-move verdicts
//!
//! A verdict depends only on the cells along the four lines through the
//! queried position, out to distance 5 (far enough to tell a five from an
//! overline). The key packs exactly those cells, plus the position and color,
//! into a `u128`, so two boards that agree on those cells share an entry.
//!
//! # Example
//!
//! ```
//! use renju::board::{Board, Pos, Stone};
//! use renju::rules::{analyze_forbidden, NeighborhoodKey, VerdictCache};
//!
//! let board = Board::new();
//! let pos = Pos::new(7, 7);
//! let mut cache = VerdictCache::new(16);
//!
//! let key = NeighborhoodKey::new(&board, pos, Stone::Black);
//! cache.store(key, analyze_forbidden(&board, pos, Stone::Black));
//! assert!(cache.probe(key).is_some());
//! ```

use std::collections::{HashMap, VecDeque};

use log::trace;

use crate::board::{Board, Direction, Pos, Stone};

use super::forbidden::ForbiddenVerdict;

/// Cells read on each side of the position along every direction
pub const KEY_RADIUS: i32 = 5;

/// Default bound on cached verdicts
pub const DEFAULT_CAPACITY: usize = 1000;

/// Packed (position, color, line neighborhood) cache key.
///
/// Layout: bits 0..8 position index, 8..10 color, then two bits per line
/// cell (empty / black / white / off-board), 40 cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NeighborhoodKey(u128);

impl NeighborhoodKey {
    #[must_use]
    pub fn new(board: &Board, pos: Pos, color: Stone) -> Self {
        let mut key = pos.to_index() as u128 | (color.code() << 8);
        let mut shift = 10;
        for dir in Direction::ALL {
            let (dr, dc) = dir.delta();
            for k in (-KEY_RADIUS..=KEY_RADIUS).filter(|&k| k != 0) {
                let code = match pos.offset(dr * k, dc * k) {
                    Some(p) => board.get(p).code(),
                    None => 3,
                };
                key |= code << shift;
                shift += 2;
            }
        }
        Self(key)
    }
}

/// Counters exposed for tests and diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Verdicts currently stored
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    /// Entries dropped by the oldest-half eviction
    pub evictions: u64,
}

/// Insertion-ordered verdict cache. When full, the oldest half is dropped.
#[derive(Debug)]
pub struct VerdictCache {
    entries: HashMap<NeighborhoodKey, ForbiddenVerdict>,
    order: VecDeque<NeighborhoodKey>,
    capacity: usize,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl VerdictCache {
    /// Create a cache holding at most `capacity` verdicts.
    ///
    /// # Panics
    /// If `capacity < 2`; half of the cache must be at least one entry.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 2, "verdict cache capacity must be at least 2");
        Self {
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    /// Look up a verdict, counting the hit or miss.
    pub fn probe(&mut self, key: NeighborhoodKey) -> Option<ForbiddenVerdict> {
        match self.entries.get(&key) {
            Some(verdict) => {
                self.hits += 1;
                Some(verdict.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store a verdict, evicting the oldest half first if the cache is full.
    pub fn store(&mut self, key: NeighborhoodKey, verdict: ForbiddenVerdict) {
        if self.entries.contains_key(&key) {
            self.entries.insert(key, verdict);
            return;
        }
        if self.entries.len() >= self.capacity {
            self.evict_oldest_half();
        }
        self.entries.insert(key, verdict);
        self.order.push_back(key);
    }

    fn evict_oldest_half(&mut self) {
        let drop = self.order.len() / 2;
        for key in self.order.drain(..drop) {
            self.entries.remove(&key);
        }
        self.evictions += drop as u64;
        trace!("verdict cache evicted {drop} entries, {} left", self.entries.len());
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.hits = 0;
        self.misses = 0;
        self.evictions = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
        }
    }
}

impl Default for VerdictCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
