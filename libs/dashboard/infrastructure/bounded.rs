//! Bounded history buffers
//!
//! Fixed-capacity ordered collections that evict from one end when an
//! insert pushes them over capacity. Trades and log lines are shown
//! most-recent-first, so they insert at the front and evict from the back;
//! balance samples are a time series, so they append at the back and evict
//! from the front.

use std::collections::vec_deque::{self, VecDeque};

/// A capped ordered sequence
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedHistory<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedHistory<T> {
    /// Create an empty buffer; a capacity of 0 is raised to 1
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Insert at the front, evicting the back element on overflow
    pub fn push_front(&mut self, item: T) -> Option<T> {
        self.items.push_front(item);
        if self.items.len() > self.capacity {
            self.items.pop_back()
        } else {
            None
        }
    }

    /// Append at the back, evicting the front element on overflow
    pub fn push_back(&mut self, item: T) -> Option<T> {
        self.items.push_back(item);
        if self.items.len() > self.capacity {
            self.items.pop_front()
        } else {
            None
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn front(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn back(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, T> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a, T> IntoIterator for &'a BoundedHistory<T> {
    type Item = &'a T;
    type IntoIter = vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Paired label/value series for the balance chart
///
/// Labels and values are appended and evicted together, so both sides
/// always have the same length and stay index-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSeries {
    labels: BoundedHistory<String>,
    values: BoundedHistory<f64>,
}

impl BalanceSeries {
    pub fn new(capacity: usize) -> Self {
        Self {
            labels: BoundedHistory::new(capacity),
            values: BoundedHistory::new(capacity),
        }
    }

    /// Append a sample; returns the evicted oldest sample, if any
    pub fn push(&mut self, label: impl Into<String>, value: f64) -> Option<(String, f64)> {
        let evicted_label = self.labels.push_back(label.into());
        let evicted_value = self.values.push_back(value);
        evicted_label.zip(evicted_value)
    }

    pub fn capacity(&self) -> usize {
        self.values.capacity()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.labels.iter().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Most recent balance
    pub fn latest(&self) -> Option<f64> {
        self.values.back().copied()
    }
}
