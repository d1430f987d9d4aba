//! Cache cells shared by the entity stores
//!
//! Each store owns one cache per actor session. Refreshes replace the
//! cache wholesale; there is no incremental merge, so a locally appended
//! entry survives only until the next refresh. Every refresh carries a
//! generation number and a response for a stale generation is discarded
//! rather than applied - a late response never clobbers a newer one.

use std::sync::{Arc, Mutex};

#[derive(Debug)]
struct Inner<T> {
    /// Last refresh generation handed out.
    issued: u64,
    /// Generation of the snapshot currently applied.
    applied: u64,
    items: Vec<T>,
}

impl<T> Default for Inner<T> {
    fn default() -> Self {
        Self {
            issued: 0,
            applied: 0,
            items: Vec::new(),
        }
    }
}

/// Generation-guarded list cache.
#[derive(Debug, Clone)]
pub struct ListCache<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Default for ListCache<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }
}

impl<T: Clone> ListCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a generation for a refresh that is about to be issued.
    pub fn begin_refresh(&self) -> u64 {
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        inner.issued += 1;
        inner.issued
    }

    /// Apply a refresh result. Returns false (and discards the items)
    /// when a newer refresh already landed.
    pub fn apply(&self, generation: u64, items: Vec<T>) -> bool {
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        if generation <= inner.applied {
            tracing::debug!(generation, applied = inner.applied, "Discarding stale refresh");
            return false;
        }
        inner.applied = generation;
        inner.items = items;
        true
    }

    /// Append a locally created entry. Lost on the next wholesale refresh.
    pub fn push(&self, item: T) {
        self.inner
            .lock()
            .expect("cache lock poisoned")
            .items
            .push(item);
    }

    /// Replace an entry in place, matching by `pred`.
    pub fn replace_where(&self, pred: impl Fn(&T) -> bool, item: T) {
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        if let Some(slot) = inner.items.iter_mut().find(|t| pred(t)) {
            *slot = item;
        }
    }

    /// Snapshot of the cached items.
    pub fn snapshot(&self) -> Vec<T> {
        self.inner
            .lock()
            .expect("cache lock poisoned")
            .items
            .clone()
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        inner.items.clear();
    }
}

/// Generation-guarded single-value cache (the cart).
#[derive(Debug, Clone)]
pub struct ValueCache<T> {
    inner: Arc<Mutex<(u64, u64, Option<T>)>>,
}

impl<T> Default for ValueCache<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new((0, 0, None))),
        }
    }
}

impl<T: Clone> ValueCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_refresh(&self) -> u64 {
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        inner.0 += 1;
        inner.0
    }

    pub fn apply(&self, generation: u64, value: T) -> bool {
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        if generation <= inner.1 {
            tracing::debug!(generation, applied = inner.1, "Discarding stale refresh");
            return false;
        }
        inner.1 = generation;
        inner.2 = Some(value);
        true
    }

    /// Unconditional replace, for mutation responses that return the full
    /// entity. Counts as a new generation so an older in-flight refresh
    /// cannot overwrite it.
    pub fn set(&self, value: T) {
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        inner.0 += 1;
        inner.1 = inner.0;
        inner.2 = Some(value);
    }

    pub fn get(&self) -> Option<T> {
        self.inner.lock().expect("cache lock poisoned").2.clone()
    }

    pub fn clear(&self) {
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        inner.0 += 1;
        inner.1 = inner.0;
        inner.2 = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_replaces_wholesale() {
        let cache: ListCache<i32> = ListCache::new();
        let g = cache.begin_refresh();
        assert!(cache.apply(g, vec![1, 2, 3]));
        assert_eq!(cache.snapshot(), vec![1, 2, 3]);

        let g = cache.begin_refresh();
        assert!(cache.apply(g, vec![9]));
        assert_eq!(cache.snapshot(), vec![9]);
    }

    #[test]
    fn test_stale_generation_discarded() {
        let cache: ListCache<i32> = ListCache::new();
        let old = cache.begin_refresh();
        let new = cache.begin_refresh();
        assert!(cache.apply(new, vec![2]));
        // The older request resolves late; its result must not apply
        assert!(!cache.apply(old, vec![1]));
        assert_eq!(cache.snapshot(), vec![2]);
    }

    #[test]
    fn test_local_push_lost_on_refresh() {
        let cache: ListCache<i32> = ListCache::new();
        cache.push(7);
        assert_eq!(cache.snapshot(), vec![7]);
        let g = cache.begin_refresh();
        cache.apply(g, vec![1]);
        assert_eq!(cache.snapshot(), vec![1]);
    }

    #[test]
    fn test_value_cache_set_outranks_inflight_refresh() {
        let cache: ValueCache<&str> = ValueCache::new();
        let g = cache.begin_refresh();
        // A mutation response lands while the refresh is in flight
        cache.set("mutated");
        assert!(!cache.apply(g, "stale"));
        assert_eq!(cache.get(), Some("mutated"));
    }
}
