//! Bounded recency memory for Tabu Search.

use std::collections::VecDeque;

/// A bounded, insertion-ordered set of recently visited solutions.
///
/// Pushing onto a full list evicts the oldest entry. Membership is exact
/// equality, checked by a linear scan: tabu lists are short compared to the
/// cost of evaluating a solution, and solutions need not be hashable.
///
/// A capacity of zero remembers nothing.
///
/// # Examples
///
/// ```
/// use anytime_metaheur::tabu::TabuList;
///
/// let mut tabu = TabuList::new(2);
/// tabu.push(1);
/// tabu.push(2);
/// tabu.push(3);
/// assert!(!tabu.contains(&1));
/// assert!(tabu.contains(&2) && tabu.contains(&3));
/// ```
#[derive(Debug, Clone)]
pub struct TabuList<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T: PartialEq> TabuList<T> {
    /// Creates an empty list holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
        }
    }

    /// Appends `entry`, evicting the oldest one if the list is full.
    pub fn push(&mut self, entry: T) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Whether an equal entry is remembered.
    pub fn contains(&self, entry: &T) -> bool {
        self.entries.iter().any(|e| e == entry)
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

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
