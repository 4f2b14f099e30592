//! Fixed-capacity history of observed borrow rates.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::error::RateModelError;
use crate::math::{add, div};

/// Number of checkpoints kept by a reactive model
pub const CHECKPOINT_CAPACITY: usize = 8;

/// A borrow rate observed at an accrual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RateCheckpoint {
    /// Observed rate (per block, WAD-scaled)
    pub observed_borrow_rate_per_block: U256,
    /// Block at which the observation was recorded
    pub block_number: u64,
}

/// Circular buffer of the most recent [`CHECKPOINT_CAPACITY`] checkpoints.
///
/// Appending to a full ring evicts the oldest entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckpointRing {
    slots: [RateCheckpoint; CHECKPOINT_CAPACITY],
    /// Index of the oldest checkpoint
    head: usize,
    len: usize,
}

impl CheckpointRing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == CHECKPOINT_CAPACITY
    }

    /// Appends a checkpoint, returning the evicted one when the ring was full.
    pub fn push(&mut self, checkpoint: RateCheckpoint) -> Option<RateCheckpoint> {
        if self.is_full() {
            let evicted = self.slots[self.head];
            self.slots[self.head] = checkpoint;
            self.head = (self.head + 1) % CHECKPOINT_CAPACITY;
            return Some(evicted);
        }

        let tail = (self.head + self.len) % CHECKPOINT_CAPACITY;
        self.slots[tail] = checkpoint;
        self.len += 1;
        None
    }

    /// Drops every checkpoint.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Checkpoints from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &RateCheckpoint> + '_ {
        (0..self.len).map(move |i| &self.slots[(self.head + i) % CHECKPOINT_CAPACITY])
    }

    /// Mean observed rate across the window, `None` when empty.
    pub fn average_observed_rate(&self) -> Result<Option<U256>, RateModelError> {
        if self.is_empty() {
            return Ok(None);
        }

        let mut sum = U256::ZERO;
        for checkpoint in self.iter() {
            sum = add(sum, checkpoint.observed_borrow_rate_per_block)?;
        }
        Ok(Some(div(sum, U256::from(self.len))?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkpoint(rate: u64, block_number: u64) -> RateCheckpoint {
        RateCheckpoint {
            observed_borrow_rate_per_block: U256::from(rate),
            block_number,
        }
    }

    #[test]
    fn test_push_until_full() {
        let mut ring = CheckpointRing::new();
        assert!(ring.is_empty());

        for i in 0..CHECKPOINT_CAPACITY as u64 {
            assert_eq!(ring.push(checkpoint(i, i)), None);
        }

        assert!(ring.is_full());
        assert_eq!(ring.len(), CHECKPOINT_CAPACITY);
    }

    #[test]
    fn test_fifo_eviction() {
        let mut ring = CheckpointRing::new();
        for i in 0..10u64 {
            ring.push(checkpoint(i, i));
        }

        assert_eq!(ring.len(), CHECKPOINT_CAPACITY);
        let blocks: Vec<u64> = ring.iter().map(|c| c.block_number).collect();
        assert_eq!(blocks, vec![2, 3, 4, 5, 6, 7, 8, 9]);

        let evicted = ring.push(checkpoint(10, 10));
        assert_eq!(evicted.map(|c| c.block_number), Some(2));
    }

    #[test]
    fn test_average() {
        let mut ring = CheckpointRing::new();
        assert_eq!(ring.average_observed_rate().unwrap(), None);

        ring.push(checkpoint(10, 1));
        ring.push(checkpoint(20, 2));
        ring.push(checkpoint(31, 3));

        // (10 + 20 + 31) / 3 rounds down
        assert_eq!(ring.average_observed_rate().unwrap(), Some(U256::from(20)));
    }

    #[test]
    fn test_average_over_window_only() {
        let mut ring = CheckpointRing::new();
        ring.push(checkpoint(1_000, 0));
        for i in 1..=CHECKPOINT_CAPACITY as u64 {
            ring.push(checkpoint(8, i));
        }

        // The 1000 observation has been evicted
        assert_eq!(ring.average_observed_rate().unwrap(), Some(U256::from(8)));
    }

    #[test]
    fn test_clear() {
        let mut ring = CheckpointRing::new();
        ring.push(checkpoint(1, 1));
        ring.clear();
        assert!(ring.is_empty());
        assert_eq!(ring.iter().count(), 0);
    }
}
