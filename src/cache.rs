//! Simple cache system for Tilawah
//! Provides caching for proxied catalog responses and verse text

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Milliseconds since the Unix epoch. Stored instead of `SystemTime` so the
/// same entries round-trip through localStorage on wasm.
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Cache entry with expiration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub data: Vec<u8>,
    pub timestamp_ms: u64,
    pub expiry_ms: u64,
}

impl CacheEntry {
    pub fn new(data: Vec<u8>, expiry_ms: u64) -> Self {
        Self {
            data,
            timestamp_ms: now_ms(),
            expiry_ms,
        }
    }

    pub fn is_expired(&self) -> bool {
        now_ms().saturating_sub(self.timestamp_ms) > self.expiry_ms
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len() + 2 * std::mem::size_of::<u64>()
    }
}

/// Size-bounded cache with FIFO eviction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleCache {
    entries: HashMap<String, CacheEntry>,
    max_size_bytes: usize,
    current_size_bytes: usize,
}

impl SimpleCache {
    pub fn new(max_size_mb: u32) -> Self {
        Self {
            entries: HashMap::new(),
            max_size_bytes: (max_size_mb as usize) * 1024 * 1024,
            current_size_bytes: 0,
        }
    }

    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key).filter(|entry| !entry.is_expired())
    }

    pub fn put(&mut self, key: String, entry: CacheEntry) {
        self.clean_expired();

        let entry_size = entry.size_bytes();

        while self.current_size_bytes + entry_size > self.max_size_bytes && !self.entries.is_empty()
        {
            if let Some((key_to_remove, entry_to_remove)) = self.entries.iter().next() {
                let key_to_remove = key_to_remove.clone();
                let size_to_remove = entry_to_remove.size_bytes();
                self.entries.remove(&key_to_remove);
                self.current_size_bytes = self.current_size_bytes.saturating_sub(size_to_remove);
            }
        }

        if let Some(old_entry) = self.entries.remove(&key) {
            self.current_size_bytes = self
                .current_size_bytes
                .saturating_sub(old_entry.size_bytes());
        }

        self.entries.insert(key, entry);
        self.current_size_bytes += entry_size;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.current_size_bytes = 0;
    }

    pub fn clean_expired(&mut self) {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in expired_keys {
            if let Some(entry) = self.entries.remove(&key) {
                self.current_size_bytes = self.current_size_bytes.saturating_sub(entry.size_bytes());
            }
        }
    }

    pub fn size_bytes(&self) -> usize {
        self.current_size_bytes
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.entries.len(),
            total_size_bytes: self.size_bytes(),
            max_size_bytes: self.max_size_bytes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub entry_count: usize,
    pub total_size_bytes: usize,
    pub max_size_bytes: usize,
}

impl Default for SimpleCache {
    fn default() -> Self {
        Self::new(25)
    }
}

/// Cache key generation utilities
pub mod keys {
    use base64::{engine::general_purpose, Engine as _};

    pub fn api_response(endpoint: &str, params: &str) -> String {
        let combined = format!("{endpoint}:{params}");
        format!("api:{}", general_purpose::URL_SAFE_NO_PAD.encode(combined))
    }

    pub fn verses(surah_id: u32) -> String {
        api_response("verses", &surah_id.to_string())
    }
}

pub fn expiry_from_hours(hours: u32) -> u64 {
    hours as u64 * 3600 * 1000
}

#[cfg(target_arch = "wasm32")]
mod wasm_impl {
    use super::*;
    use web_sys::{window, Storage};

    const STORAGE_KEY: &str = "tilawah_cache";

    impl SimpleCache {
        pub fn load_from_storage() -> Option<Self> {
            let storage = Self::get_local_storage()?;
            let data = storage.get_item(STORAGE_KEY).ok()??;
            serde_json::from_str::<SimpleCache>(&data).ok()
        }

        pub fn save_to_storage(&self) {
            if let Ok(data) = serde_json::to_string(self) {
                if let Some(storage) = Self::get_local_storage() {
                    let _ = storage.set_item(STORAGE_KEY, &data);
                }
            }
        }

        fn get_local_storage() -> Option<Storage> {
            window()?.local_storage().ok()?
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native_impl {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    impl SimpleCache {
        pub fn load_from_storage() -> Option<Self> {
            Self::get_cache_file_path()
                .and_then(|path| fs::read_to_string(path).ok())
                .and_then(|data| serde_json::from_str::<SimpleCache>(&data).ok())
        }

        pub fn save_to_storage(&self) {
            if let Some(path) = Self::get_cache_file_path() {
                if let Ok(data) = serde_json::to_string(self) {
                    let _ = fs::write(path, data);
                }
            }
        }

        fn get_cache_file_path() -> Option<PathBuf> {
            dirs::cache_dir()
                .map(|dir: PathBuf| dir.join("tilawah"))
                .map(|dir: PathBuf| {
                    let _ = fs::create_dir_all(&dir);
                    dir.join("cache.json")
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_with_age(data: Vec<u8>, age_ms: u64, expiry_ms: u64) -> CacheEntry {
        let mut entry = CacheEntry::new(data, expiry_ms);
        entry.timestamp_ms = now_ms().saturating_sub(age_ms);
        entry
    }

    #[test]
    fn fresh_entries_are_returned() {
        let mut cache = SimpleCache::new(1);
        cache.put(
            "k".to_string(),
            CacheEntry::new(vec![1, 2, 3], expiry_from_hours(1)),
        );
        assert!(cache.get("k").is_some());
    }

    #[test]
    fn expired_entries_are_not_returned() {
        let mut cache = SimpleCache::new(1);
        cache.put("k".to_string(), entry_with_age(vec![1], 10_000, 5_000));
        assert!(cache.get("k").is_none());
    }

    #[test]
    fn clean_expired_reclaims_size() {
        let mut cache = SimpleCache::new(1);
        cache.put("old".to_string(), entry_with_age(vec![0; 64], 10_000, 5_000));
        cache.put(
            "new".to_string(),
            CacheEntry::new(vec![0; 64], expiry_from_hours(1)),
        );
        cache.clean_expired();
        assert!(cache.get("old").is_none());
        assert!(cache.get("new").is_some());
        assert_eq!(cache.stats().entry_count, 1);
    }

    #[test]
    fn eviction_keeps_total_under_limit() {
        // 8 x 200 KiB does not fit a 1 MiB budget.
        let mut cache = SimpleCache::new(1);
        for i in 0..8 {
            cache.put(
                format!("k{i}"),
                CacheEntry::new(vec![0; 200 * 1024], expiry_from_hours(1)),
            );
        }
        assert!(cache.size_bytes() <= 1024 * 1024);
        assert!(cache.stats().entry_count < 8);
    }

    #[test]
    fn put_replaces_existing_key_without_double_counting() {
        let mut cache = SimpleCache::new(1);
        cache.put(
            "k".to_string(),
            CacheEntry::new(vec![0; 128], expiry_from_hours(1)),
        );
        let before = cache.size_bytes();
        cache.put(
            "k".to_string(),
            CacheEntry::new(vec![0; 128], expiry_from_hours(1)),
        );
        assert_eq!(cache.size_bytes(), before);
        assert_eq!(cache.stats().entry_count, 1);
    }

    #[test]
    fn api_keys_are_stable_and_distinct() {
        let a = keys::api_response("qaris", "");
        let b = keys::api_response("qaris", "");
        let c = keys::api_response("surahs", "");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.starts_with("api:"));
    }
}
