//! Bounded Recency Buffer for Live Readings
//!
//! ## Overview
//!
//! [`RecencyBuffer`] is the in-memory window of recent readings backing the
//! live views: a most-recent-first sequence with a fixed capacity. Pushing
//! beyond capacity evicts the oldest entry, so the buffer is a sliding
//! window over the stream, never unbounded growth.
//!
//! ## Ownership
//!
//! The buffer is owned and mutated exclusively by the telemetry loop.
//! Everything downstream reads immutable snapshots via [`RecencyBuffer::snapshot`];
//! a snapshot is a clone and stays valid no matter what the loop does next.
//!
//! ## Ordering
//!
//! Unlike a chronological ring buffer, iteration here is newest-first — the
//! order live tables render in. `latest()` is the head, eviction happens at
//! the tail.

use std::collections::VecDeque;

use crate::reading::Reading;

/// Default window size for live displays.
pub const DEFAULT_CAPACITY: usize = 50;

/// Bounded most-recent-first buffer of readings.
///
/// Invariants:
/// - `len() <= capacity()` always
/// - index 0 is the newest entry, `len()-1` the oldest
/// - pushing at capacity evicts exactly the oldest entry
#[derive(Debug, Clone)]
pub struct RecencyBuffer {
    entries: VecDeque<Reading>,
    capacity: usize,
}

impl RecencyBuffer {
    /// Create a buffer with the default capacity of 50.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a buffer holding at most `capacity` readings.
    ///
    /// A zero capacity is bumped to 1; a window that can never hold a
    /// reading is not a useful buffer.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepend a reading, evicting the oldest entry if at capacity.
    pub fn push(&mut self, reading: Reading) {
        if self.entries.len() == self.capacity {
            self.entries.pop_back();
        }
        self.entries.push_front(reading);
    }

    /// Number of buffered readings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the buffer holds no readings.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the next push will evict.
    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity
    }

    /// Maximum number of readings held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The most recent reading, if any.
    pub fn latest(&self) -> Option<&Reading> {
        self.entries.front()
    }

    /// Iterate newest-first.
    pub fn iter(&self) -> impl Iterator<Item = &Reading> {
        self.entries.iter()
    }

    /// Clone out the current contents, newest-first.
    pub fn snapshot(&self) -> Vec<Reading> {
        self.entries.iter().cloned().collect()
    }

    /// Drop all readings. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for RecencyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn reading(sensor_id: u32) -> Reading {
        let ts = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        Reading::new(sensor_id, ts)
    }

    #[test]
    fn empty_buffer() {
        let buffer = RecencyBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.capacity(), DEFAULT_CAPACITY);
        assert!(buffer.latest().is_none());
    }

    #[test]
    fn push_and_retrieve() {
        let mut buffer = RecencyBuffer::with_capacity(5);
        buffer.push(reading(1));
        buffer.push(reading(2));

        assert_eq!(buffer.len(), 2);
        assert!(!buffer.is_empty());
        assert_eq!(buffer.latest().unwrap().sensor_id, 2);
    }

    #[test]
    fn newest_first_order() {
        let mut buffer = RecencyBuffer::with_capacity(4);
        for id in 0..4 {
            buffer.push(reading(id));
        }

        let ids: Vec<u32> = buffer.iter().map(|r| r.sensor_id).collect();
        assert_eq!(ids, vec![3, 2, 1, 0]);
    }

    #[test]
    fn overflow_evicts_oldest() {
        let mut buffer = RecencyBuffer::with_capacity(3);
        for id in 0..5 {
            buffer.push(reading(id));
        }

        assert_eq!(buffer.len(), 3);
        assert!(buffer.is_full());

        // 0 and 1 were evicted
        let ids: Vec<u32> = buffer.iter().map(|r| r.sensor_id).collect();
        assert_eq!(ids, vec![4, 3, 2]);
    }

    #[test]
    fn snapshot_is_independent() {
        let mut buffer = RecencyBuffer::with_capacity(3);
        buffer.push(reading(1));

        let snap = buffer.snapshot();
        buffer.push(reading(2));
        buffer.clear();

        assert_eq!(snap.len(), 1);
        assert_eq!(snap[0].sensor_id, 1);
    }

    #[test]
    fn zero_capacity_is_bumped() {
        let mut buffer = RecencyBuffer::with_capacity(0);
        buffer.push(reading(9));
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.capacity(), 1);
    }
}
