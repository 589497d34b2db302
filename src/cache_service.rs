use crate::cache::{expiry_from_hours, CacheEntry, CacheStats, SimpleCache};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Mutex;

const DEFAULT_EXPIRY_HOURS: u32 = 24;

static CACHE: Lazy<Mutex<SimpleCache>> = Lazy::new(|| {
    let loaded = SimpleCache::load_from_storage().unwrap_or_default();
    Mutex::new(loaded)
});

fn effective_expiry_hours(override_hours: Option<u32>) -> u32 {
    override_hours
        .unwrap_or(DEFAULT_EXPIRY_HOURS)
        .clamp(1, 24 * 30)
}

fn save_cache(cache: &SimpleCache) {
    cache.save_to_storage();
}

pub fn get_json<T>(key: &str) -> Option<T>
where
    T: DeserializeOwned,
{
    let cache = CACHE.lock().unwrap_or_else(|e| e.into_inner());
    let bytes = cache.get(key)?.data.clone();
    drop(cache);
    serde_json::from_slice::<T>(&bytes).ok()
}

pub fn put_json<T>(key: impl Into<String>, value: &T, expiry_hours: Option<u32>) -> bool
where
    T: Serialize,
{
    let Ok(bytes) = serde_json::to_vec(value) else {
        return false;
    };
    let entry = CacheEntry::new(bytes, expiry_from_hours(effective_expiry_hours(expiry_hours)));

    let mut cache = CACHE.lock().unwrap_or_else(|e| e.into_inner());
    cache.put(key.into(), entry);
    save_cache(&cache);
    true
}

pub fn clear_all() {
    let mut cache = CACHE.lock().unwrap_or_else(|e| e.into_inner());
    cache.clear();
    save_cache(&cache);
}

pub fn stats() -> CacheStats {
    let cache = CACHE.lock().unwrap_or_else(|e| e.into_inner());
    cache.stats()
}
