//! Single-flight guard.
//!
//! A component owns one `SingleFlight` and asks it before starting an
//! operation; a key that is already in flight is refused until the
//! operation finishes. The guard is plain state on the owning component,
//! so two components never share an in-progress flag.

use std::collections::HashSet;
use std::hash::Hash;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SingleFlight<K> {
    in_flight: HashSet<K>,
}

impl<K: Eq + Hash + Clone + std::fmt::Debug> SingleFlight<K> {
    pub fn new() -> Self {
        Self {
            in_flight: HashSet::new(),
        }
    }

    /// Marks `key` as running. Returns `false` if it already is.
    pub fn try_begin(&mut self, key: &K) -> bool {
        let started = self.in_flight.insert(key.clone());
        if !started {
            debug!("{:?} already in flight", key);
        }
        started
    }

    /// Releases `key`. Returns `false` if it was not running.
    pub fn finish(&mut self, key: &K) -> bool {
        self.in_flight.remove(key)
    }

    pub fn is_in_flight(&self, key: &K) -> bool {
        self.in_flight.contains(key)
    }
}

impl<K: Eq + Hash + Clone + std::fmt::Debug> Default for SingleFlight<K> {
    fn default() -> Self {
        Self::new()
    }
}
