use super::HolidaySet;
use crate::country::Country;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HolidayKey {
    pub year: i32,
    pub country: Country,
}

impl HolidayKey {
    pub fn new(year: i32, country: Country) -> Self {
        Self { year, country }
    }
}

/// Storage for computed holiday sets. Entries are insert-once: a second
/// insert for the same key keeps the first value.
pub trait HolidayCache: Send + Sync {
    fn get(&self, key: &HolidayKey) -> Option<Arc<HolidaySet>>;

    /// Store `set` unless the key is already present; returns the cached value.
    fn insert(&self, key: HolidayKey, set: Arc<HolidaySet>) -> Arc<HolidaySet>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&self);
}

/// Process-lifetime cache shared between threads.
#[derive(Debug, Default)]
pub struct MemoryHolidayCache {
    entries: RwLock<HashMap<HolidayKey, Arc<HolidaySet>>>,
}

impl MemoryHolidayCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HolidayCache for MemoryHolidayCache {
    fn get(&self, key: &HolidayKey) -> Option<Arc<HolidaySet>> {
        self.entries.read().get(key).cloned()
    }

    fn insert(&self, key: HolidayKey, set: Arc<HolidaySet>) -> Arc<HolidaySet> {
        let mut guard = self.entries.write();
        guard.entry(key).or_insert(set).clone()
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }

    fn clear(&self) {
        self.entries.write().clear();
    }
}

/// Cache that never stores anything; every lookup goes to the source.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHolidayCache;

impl HolidayCache for NoopHolidayCache {
    fn get(&self, _key: &HolidayKey) -> Option<Arc<HolidaySet>> {
        None
    }

    fn insert(&self, _key: HolidayKey, set: Arc<HolidaySet>) -> Arc<HolidaySet> {
        set
    }

    fn len(&self) -> usize {
        0
    }

    fn clear(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_insert_wins() {
        let cache = MemoryHolidayCache::new();
        let key = HolidayKey::new(2026, Country::Vietnam);
        let first = Arc::new(HolidaySet::empty(2026, Country::Vietnam));
        let stored = cache.insert(key, first.clone());
        assert!(Arc::ptr_eq(&stored, &first));

        let second = Arc::new(HolidaySet::empty(2026, Country::Vietnam));
        let stored = cache.insert(key, second);
        assert!(Arc::ptr_eq(&stored, &first));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
