//! Transposition table for caching search results.
//!
//! A fixed number of 4-way buckets, indexed by the position hash modulo the
//! bucket count. Entries remember the best move by its generation index, so
//! the search regenerates moves and bounds-checks the index before using it.

use std::fmt;
use std::mem;

/// Number of entries per bucket
const BUCKET_SIZE: usize = 4;

/// Depth removed from every entry by `mark_old`
const AGE_DECREMENT: u16 = 2;

/// One cached search result. An entry is valid while `hash != 0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransposEntry {
    pub hash: u64,
    /// Score from the point of view of the side to move
    pub eval: i32,
    pub depth: u16,
    pub best_move_index: u16,
}

impl TransposEntry {
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.hash != 0
    }
}

#[derive(Clone, Copy, Default)]
struct TransposBucket {
    entries: [TransposEntry; BUCKET_SIZE],
}

/// The table could not be allocated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranspositionError {
    AllocationFailed { megabytes: usize },
}

impl fmt::Display for TranspositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranspositionError::AllocationFailed { megabytes } => {
                write!(f, "Failed to allocate a {megabytes} MB transposition table")
            }
        }
    }
}

impl std::error::Error for TranspositionError {}

pub struct TranspositionTable {
    buckets: Vec<TransposBucket>,
    megabytes: usize,
}

impl TranspositionTable {
    /// Allocate a table of roughly `megabytes` MB (at least one bucket).
    ///
    /// The size never changes afterwards.
    pub fn try_new(megabytes: usize) -> Result<Self, TranspositionError> {
        let bucket_count = (megabytes.saturating_mul(1024 * 1024) / mem::size_of::<TransposBucket>()).max(1);

        let mut buckets = Vec::new();
        buckets
            .try_reserve_exact(bucket_count)
            .map_err(|_| TranspositionError::AllocationFailed { megabytes })?;
        buckets.resize(bucket_count, TransposBucket::default());

        Ok(TranspositionTable { buckets, megabytes })
    }

    #[inline]
    fn bucket_index(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    /// The entry for `hash` if one is stored, otherwise the slot to overwrite:
    /// the shallowest one in the bucket, empty slots counting as depth 0.
    pub fn find(&mut self, hash: u64) -> &mut TransposEntry {
        let idx = self.bucket_index(hash);
        let entries = &mut self.buckets[idx].entries;

        let slot = match entries.iter().position(|e| e.hash == hash && e.is_valid()) {
            Some(exact) => exact,
            None => {
                let mut best = 0;
                let mut best_depth = u16::MAX;
                for (i, entry) in entries.iter().enumerate() {
                    let depth = if entry.is_valid() { entry.depth } else { 0 };
                    if depth < best_depth {
                        best = i;
                        best_depth = depth;
                    }
                }
                best
            }
        };
        &mut entries[slot]
    }

    /// Copy of the entry stored for `hash`, if any
    #[must_use]
    pub fn probe(&self, hash: u64) -> Option<TransposEntry> {
        if hash == 0 {
            return None;
        }
        self.buckets[self.bucket_index(hash)]
            .entries
            .iter()
            .find(|e| e.hash == hash)
            .copied()
    }

    /// Write `entry` over its own previous version or the replacement slot
    pub fn store(&mut self, entry: TransposEntry) {
        *self.find(entry.hash) = entry;
    }

    /// Age every entry so deep results from earlier searches stop blocking
    /// replacement. Entries that run out of depth are dropped.
    pub fn mark_old(&mut self) {
        for bucket in &mut self.buckets {
            for entry in &mut bucket.entries {
                if !entry.is_valid() {
                    continue;
                }
                if entry.depth <= AGE_DECREMENT {
                    *entry = TransposEntry::default();
                } else {
                    entry.depth -= AGE_DECREMENT;
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.buckets.fill(TransposBucket::default());
    }

    /// Total number of entry slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len() * BUCKET_SIZE
    }

    #[must_use]
    pub fn megabytes(&self) -> usize {
        self.megabytes
    }

    /// Returns hash table fullness in per mille (0-1000).
    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        // Sample first 1000 buckets for efficiency
        let sample_size = self.buckets.len().min(1000);
        let occupied = self.buckets[..sample_size]
            .iter()
            .flat_map(|b| b.entries.iter())
            .filter(|e| e.is_valid())
            .count();
        ((occupied as u64 * 1000) / (sample_size * BUCKET_SIZE) as u64) as u32
    }
}

impl fmt::Debug for TranspositionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranspositionTable")
            .field("megabytes", &self.megabytes)
            .field("buckets", &self.buckets.len())
            .finish()
    }
}
