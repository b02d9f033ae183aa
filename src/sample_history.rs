//! Caller-owned sample history
//!
//! Bounded buffer of motion-intensity samples fed by a capture layer and
//! read by the analyzer. When full, the oldest samples are dropped first.

use std::collections::VecDeque;

/// Bounded FIFO of `f64` samples.
#[derive(Debug, Clone)]
pub struct SampleHistory {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl SampleHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append one sample, trimming the oldest if over capacity.
    pub fn push(&mut self, sample: f64) {
        self.samples.push_back(sample);
        self.trim();
    }

    /// Append many samples in order, then trim once.
    pub fn extend<I: IntoIterator<Item = f64>>(&mut self, samples: I) {
        self.samples.extend(samples);
        self.trim();
    }

    /// Drop the oldest samples until the history fits its capacity.
    fn trim(&mut self) {
        let excess = self.samples.len().saturating_sub(self.capacity);
        if excess > 0 {
            self.samples.drain(..excess);
        }
    }

    /// Forget every sample (start of a new scan).
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Copy of the most recent `n` samples (fewer if not yet available),
    /// oldest first.
    pub fn latest(&self, n: usize) -> Vec<f64> {
        let skip = self.samples.len().saturating_sub(n);
        self.samples.iter().skip(skip).copied().collect()
    }

    /// Copy of every retained sample, oldest first.
    pub fn to_vec(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }
}

impl Default for SampleHistory {
    fn default() -> Self {
        Self::new(crate::config::defaults::HISTORY_CAPACITY)
    }
}
