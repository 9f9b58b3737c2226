//! Bounded, most-recent-first log of user-visible village events.
use std::collections::VecDeque;

use bevy::prelude::*;

pub const DEFAULT_EVENT_LOG_CAPACITY: usize = 5;

#[derive(Resource, Debug, Clone)]
pub struct EventLog {
    capacity: usize,
    entries: VecDeque<String>,
    revision: u64,
}

impl EventLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: VecDeque::new(),
            revision: 0,
        }
    }

    /// Starts a log that already shows `message`.
    pub fn with_entry(capacity: usize, message: impl Into<String>) -> Self {
        let mut log = Self::new(capacity);
        log.push(message);
        log
    }

    /// Adds `message` at the front, dropping the oldest entry when full.
    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push_front(message.into());
        self.entries.truncate(self.capacity);
        self.revision = self.revision.wrapping_add(1);
    }

    /// Entries from newest to oldest.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    /// Bumped once per pushed entry; lets the publisher see new events.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_LOG_CAPACITY)
    }
}
