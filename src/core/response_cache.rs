//! Bounded cache of assistant replies keyed by the normalized text of the
//! question that produced them.
//!
//! Eviction is first-in-first-out: once the bound is exceeded the entry that
//! was inserted earliest goes, regardless of how recently it was read.
//! Entries do not expire and are not scoped to a conversation, so the same
//! question asked in a different context returns the earlier answer.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

pub const DEFAULT_CACHE_CAPACITY: usize = 100;

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, String>,
    order: VecDeque<String>,
}

pub struct ResponseCache {
    capacity: usize,
    state: Mutex<CacheState>,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl ResponseCache {
    /// A zero capacity is treated as one.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn lookup(&self, key: &str) -> Option<String> {
        self.lock().entries.get(key).cloned()
    }

    /// Insert or overwrite `key`. An overwrite keeps the key's original
    /// insertion position.
    pub fn store(&self, key: impl Into<String>, text: impl Into<String>) {
        let key = key.into();
        let mut state = self.lock();
        if state.entries.insert(key.clone(), text.into()).is_none() {
            state.order.push_back(key);
        }
        while state.entries.len() > self.capacity {
            if Self::evict_front(&mut state).is_none() {
                break;
            }
        }
    }

    /// Remove the oldest-inserted entry, returning its key.
    pub fn evict_oldest(&self) -> Option<String> {
        Self::evict_front(&mut self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn evict_front(state: &mut CacheState) -> Option<String> {
        let key = state.order.pop_front()?;
        state.entries.remove(&key);
        Some(key)
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        // The state is always left consistent, so a poisoned lock is usable.
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
