//! Bounded vote window
//!
//! Fixed-capacity FIFO of the most recent raw classifier results. Pushing
//! into a full window evicts the oldest entry, so the window never grows
//! past its capacity regardless of what is fed into it.

use crate::classifier::{Gesture, GestureResult};
use std::collections::VecDeque;

/// Outcome of a majority vote over the window
#[derive(Debug, Clone, PartialEq)]
pub struct Vote<'a> {
    /// Winning label
    pub gesture: Gesture,
    /// Number of entries carrying that label
    pub count: usize,
    /// Mean confidence over those entries
    pub mean_confidence: f64,
    /// Most recently pushed entry with that label
    pub latest: &'a GestureResult,
}

/// Sliding window of recent classifier results
#[derive(Debug, Clone)]
pub struct VoteWindow {
    entries: VecDeque<GestureResult>,
    capacity: usize,
    evicted: u64,
}

impl VoteWindow {
    /// Create an empty window.
    ///
    /// A capacity of zero is bumped to one so the window can always hold the
    /// latest result.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            evicted: 0,
        }
    }

    /// Append a result, evicting and returning the oldest one if full
    pub fn push(&mut self, result: GestureResult) -> Option<GestureResult> {
        let evicted = if self.entries.len() == self.capacity {
            self.evicted += 1;
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(result);
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total entries evicted since creation
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Most frequent label in the window.
    ///
    /// Ties go to the label whose earliest entry is oldest in the window,
    /// i.e. the label that was seen first when scanning oldest → newest.
    pub fn majority(&self) -> Option<Vote<'_>> {
        // (gesture, count, confidence sum, latest index), in first-seen order
        let mut tallies: Vec<(Gesture, usize, f64, usize)> = Vec::new();
        for (idx, entry) in self.entries.iter().enumerate() {
            match tallies.iter_mut().find(|t| t.0 == entry.gesture) {
                Some(tally) => {
                    tally.1 += 1;
                    tally.2 += entry.confidence;
                    tally.3 = idx;
                }
                None => tallies.push((entry.gesture, 1, entry.confidence, idx)),
            }
        }

        let mut best: Option<&(Gesture, usize, f64, usize)> = None;
        for tally in &tallies {
            // Strictly greater keeps the earlier-seen label on ties
            if best.map_or(true, |b| tally.1 > b.1) {
                best = Some(tally);
            }
        }

        best.map(|&(gesture, count, sum, latest)| Vote {
            gesture,
            count,
            mean_confidence: sum / count as f64,
            latest: &self.entries[latest],
        })
    }
}
