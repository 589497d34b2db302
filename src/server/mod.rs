//! Pass-through proxy over the quranicaudio.com catalog API.
//!
//! Each endpoint consults a short-lived server-side cache, makes at most one
//! upstream request, and masks any failure with a schema-compatible static
//! payload. The browser never sees an upstream outage as an error.

pub mod fallback;

use dioxus::prelude::*;

use crate::api::models::{AudioFile, Qari, Recitation, Section, SectionReciter, Surah};

#[cfg(feature = "server")]
mod proxy {
    use crate::cache::{expiry_from_hours, keys, CacheEntry, SimpleCache};
    use dioxus::logger::tracing::warn;
    use once_cell::sync::Lazy;
    use reqwest::Client;
    use serde::de::DeserializeOwned;
    use std::sync::Mutex;

    const UPSTREAM_BASE_URL: &str = "https://quranicaudio.com/api";
    const FRESHNESS_HOURS: u32 = 1;

    static HTTP_CLIENT: Lazy<Client> = Lazy::new(Client::new);
    static UPSTREAM_CACHE: Lazy<Mutex<SimpleCache>> =
        Lazy::new(|| Mutex::new(SimpleCache::new(25)));

    fn cached_body(key: &str) -> Option<Vec<u8>> {
        let cache = UPSTREAM_CACHE.lock().unwrap_or_else(|e| e.into_inner());
        cache.get(key).map(|entry| entry.data.clone())
    }

    fn store_body(key: String, body: Vec<u8>) {
        let mut cache = UPSTREAM_CACHE.lock().unwrap_or_else(|e| e.into_inner());
        cache.put(key, CacheEntry::new(body, expiry_from_hours(FRESHNESS_HOURS)));
    }

    /// Raw upstream body for `{base}/{endpoint}`, cache-first. `None` covers
    /// transport errors and non-success statuses alike.
    pub(super) async fn fetch_body(endpoint: &str) -> Option<Vec<u8>> {
        let key = keys::api_response("upstream", endpoint);
        if let Some(body) = cached_body(&key) {
            return Some(body);
        }

        let url = format!("{UPSTREAM_BASE_URL}/{endpoint}");
        let response = match HTTP_CLIENT
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("upstream request to {url} failed: {e}");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("upstream {url} responded with status {}", response.status());
            return None;
        }

        match response.bytes().await {
            Ok(bytes) => {
                let body = bytes.to_vec();
                store_body(key, body.clone());
                Some(body)
            }
            Err(e) => {
                warn!("reading upstream body from {url} failed: {e}");
                None
            }
        }
    }

    pub(super) async fn fetch_typed<T>(endpoint: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let body = fetch_body(endpoint).await?;
        match serde_json::from_slice::<T>(&body) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("decoding upstream payload for {endpoint} failed: {e}");
                None
            }
        }
    }
}

#[server]
pub async fn fetch_sections() -> Result<Vec<Section>, ServerFnError> {
    Ok(proxy::fetch_typed::<Vec<Section>>("sections")
        .await
        .unwrap_or_else(fallback::sections))
}

#[server]
pub async fn fetch_qaris() -> Result<Vec<Qari>, ServerFnError> {
    Ok(proxy::fetch_typed::<Vec<Qari>>("qaris")
        .await
        .unwrap_or_else(fallback::qaris))
}

#[server]
pub async fn fetch_qari(id: u32) -> Result<Qari, ServerFnError> {
    Ok(proxy::fetch_typed::<Qari>(&format!("qaris/{id}"))
        .await
        .unwrap_or_else(|| fallback::qari(id)))
}

#[server]
pub async fn fetch_surahs() -> Result<Vec<Surah>, ServerFnError> {
    Ok(proxy::fetch_typed::<Vec<Surah>>("surahs")
        .await
        .unwrap_or_else(fallback::surahs))
}

#[server]
pub async fn fetch_surah(id: u32) -> Result<Surah, ServerFnError> {
    Ok(proxy::fetch_typed::<Surah>(&format!("surahs/{id}"))
        .await
        .unwrap_or_else(|| fallback::surah(id)))
}

/// Upstream occasionally answers this route with a non-array body; that is
/// treated as "no descriptors", not as an outage.
#[server]
pub async fn fetch_audio_files(qari_id: u32) -> Result<Vec<AudioFile>, ServerFnError> {
    let endpoint = format!("audio_files/{qari_id}");
    let Some(body) = proxy::fetch_body(&endpoint).await else {
        return Ok(fallback::audio_files(qari_id));
    };

    match serde_json::from_slice::<serde_json::Value>(&body) {
        Ok(serde_json::Value::Array(_)) => {
            match serde_json::from_slice::<Vec<AudioFile>>(&body) {
                Ok(files) => Ok(files),
                Err(_) => Ok(fallback::audio_files(qari_id)),
            }
        }
        Ok(_) => Ok(Vec::new()),
        Err(_) => Ok(fallback::audio_files(qari_id)),
    }
}

#[server]
pub async fn fetch_section_reciters(section_id: u32) -> Result<Vec<SectionReciter>, ServerFnError> {
    Ok(
        proxy::fetch_typed::<Vec<SectionReciter>>(&format!("section/{section_id}/reciters"))
            .await
            .unwrap_or_else(fallback::section_reciters),
    )
}

#[server]
pub async fn fetch_recitation(
    reciter_id: u32,
    surah_id: u32,
) -> Result<Vec<Recitation>, ServerFnError> {
    Ok(
        proxy::fetch_typed::<Vec<Recitation>>(&format!("reciters/{reciter_id}/surahs/{surah_id}"))
            .await
            .unwrap_or_else(|| fallback::recitation(reciter_id, surah_id)),
    )
}
