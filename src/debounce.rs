//! Per-key debouncing of pending writes.
//!
//! Every key owns its own deadline: scheduling a value for one key restarts
//! that key's quiet period and leaves every other pending key untouched.
//! The caller passes the current time in, so the debouncer never sleeps and
//! can be driven from any event loop (or from a test with fabricated instants).
use ahash::AHashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Quiet period applied to field edits before they are written.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
struct Pending<V> {
    value: V,
    deadline: Instant,
    /// Order of the last schedule call, used to break deadline ties.
    sequence: u64,
}

#[derive(Debug, Clone)]
pub struct KeyedDebouncer<K, V> {
    quiet: Duration,
    pending: AHashMap<K, Pending<V>>,
    sequence: u64,
}

impl<K: Eq + Hash + Clone, V> Default for KeyedDebouncer<K, V> {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl<K: Eq + Hash + Clone, V> KeyedDebouncer<K, V> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: AHashMap::new(),
            sequence: 0,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Replaces any pending value for `key` and restarts its quiet period.
    ///
    /// Returns `true` when an earlier pending value was superseded.
    pub fn schedule(&mut self, key: K, value: V, now: Instant) -> bool {
        self.sequence += 1;
        let pending = Pending {
            value,
            deadline: now + self.quiet,
            sequence: self.sequence,
        };
        self.pending.insert(key, pending).is_some()
    }

    pub fn cancel(&mut self, key: &K) -> Option<V> {
        self.pending.remove(key).map(|pending| pending.value)
    }

    /// Cancels every pending key matching `predicate`, returning how many were dropped.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&K) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|key, _| !predicate(key));
        before - self.pending.len()
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.pending.get(key).map(|pending| &pending.value)
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest deadline among pending keys; when to call [`take_due`](Self::take_due) next.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.values().map(|pending| pending.deadline).min()
    }

    /// Removes and returns every entry whose quiet period has elapsed at `now`,
    /// earliest deadline first.
    pub fn take_due(&mut self, now: Instant) -> Vec<(K, V)> {
        let due: Vec<K> = self
            .pending
            .iter()
            .filter(|(_, pending)| pending.deadline <= now)
            .map(|(key, _)| key.clone())
            .collect();
        self.remove_ordered(due)
    }

    /// Removes and returns every pending entry regardless of deadlines.
    pub fn drain(&mut self) -> Vec<(K, V)> {
        let keys: Vec<K> = self.pending.keys().cloned().collect();
        self.remove_ordered(keys)
    }

    /// Pending entries, in schedule order, without removing them.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        let mut entries: Vec<_> = self.pending.iter().collect();
        entries.sort_by_key(|(_, pending)| pending.sequence);
        entries
            .into_iter()
            .map(|(key, pending)| (key, &pending.value))
    }

    fn remove_ordered(&mut self, keys: Vec<K>) -> Vec<(K, V)> {
        let mut entries: Vec<(K, Pending<V>)> = keys
            .into_iter()
            .filter_map(|key| self.pending.remove(&key).map(|pending| (key, pending)))
            .collect();
        entries.sort_by_key(|(_, pending)| (pending.deadline, pending.sequence));
        entries
            .into_iter()
            .map(|(key, pending)| (key, pending.value))
            .collect()
    }
}
