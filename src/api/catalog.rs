//! Typed catalog accessors over the proxy endpoints, cache-first on the
//! client so tab switches and reselects do not refetch.

use dioxus::logger::tracing::warn;

use crate::api::models::{AudioFile, Qari, Recitation, Section, SectionReciter, Surah};
use crate::cache::keys;
use crate::cache_service;
use crate::server;

const CATALOG_EXPIRY_HOURS: u32 = 24;

pub async fn get_sections() -> Result<Vec<Section>, String> {
    let cache_key = keys::api_response("sections", "");
    if let Some(cached) = cache_service::get_json::<Vec<Section>>(&cache_key) {
        return Ok(cached);
    }

    let sections = server::fetch_sections()
        .await
        .map_err(|e| e.to_string())?;
    let _ = cache_service::put_json(cache_key, &sections, Some(CATALOG_EXPIRY_HOURS));
    Ok(sections)
}

pub async fn get_all_qaris() -> Result<Vec<Qari>, String> {
    let cache_key = keys::api_response("qaris", "");
    if let Some(cached) = cache_service::get_json::<Vec<Qari>>(&cache_key) {
        return Ok(cached);
    }

    let qaris = server::fetch_qaris().await.map_err(|e| e.to_string())?;
    let _ = cache_service::put_json(cache_key, &qaris, Some(CATALOG_EXPIRY_HOURS));
    Ok(qaris)
}

/// Reciters for one section. The upstream per-section route only returns
/// id/name pairs, so this filters the full list client-side instead and
/// keeps the relative paths needed for playback.
pub async fn get_qaris_by_section(section_id: u32) -> Result<Vec<Qari>, String> {
    let qaris = get_all_qaris().await?;
    Ok(qaris
        .into_iter()
        .filter(|q| q.section_id == section_id)
        .collect())
}

#[allow(dead_code)]
pub async fn get_qari(id: u32) -> Result<Qari, String> {
    let cache_key = keys::api_response("qari", &id.to_string());
    if let Some(cached) = cache_service::get_json::<Qari>(&cache_key) {
        return Ok(cached);
    }

    let qari = server::fetch_qari(id).await.map_err(|e| e.to_string())?;
    let _ = cache_service::put_json(cache_key, &qari, Some(CATALOG_EXPIRY_HOURS));
    Ok(qari)
}

pub async fn get_surahs() -> Result<Vec<Surah>, String> {
    let cache_key = keys::api_response("surahs", "");
    if let Some(cached) = cache_service::get_json::<Vec<Surah>>(&cache_key) {
        return Ok(cached);
    }

    let surahs = server::fetch_surahs().await.map_err(|e| e.to_string())?;
    let _ = cache_service::put_json(cache_key, &surahs, Some(CATALOG_EXPIRY_HOURS));
    Ok(surahs)
}

#[allow(dead_code)]
pub async fn get_surah(id: u32) -> Result<Surah, String> {
    let cache_key = keys::api_response("surah", &id.to_string());
    if let Some(cached) = cache_service::get_json::<Surah>(&cache_key) {
        return Ok(cached);
    }

    let surah = server::fetch_surah(id).await.map_err(|e| e.to_string())?;
    let _ = cache_service::put_json(cache_key, &surah, Some(CATALOG_EXPIRY_HOURS));
    Ok(surah)
}

/// Descriptor list for a reciter. Never errors; a failed lookup degrades to
/// an empty list and the UI simply loses its duration badges.
pub async fn get_audio_files(qari_id: u32) -> Vec<AudioFile> {
    let cache_key = keys::api_response("audio_files", &qari_id.to_string());
    if let Some(cached) = cache_service::get_json::<Vec<AudioFile>>(&cache_key) {
        return cached;
    }

    match server::fetch_audio_files(qari_id).await {
        Ok(files) => {
            let _ = cache_service::put_json(cache_key, &files, Some(CATALOG_EXPIRY_HOURS));
            files
        }
        Err(e) => {
            warn!("fetching audio files for qari {qari_id} failed: {e}");
            Vec::new()
        }
    }
}

#[allow(dead_code)]
pub async fn get_section_reciters(section_id: u32) -> Result<Vec<SectionReciter>, String> {
    let cache_key = keys::api_response("section_reciters", &section_id.to_string());
    if let Some(cached) = cache_service::get_json::<Vec<SectionReciter>>(&cache_key) {
        return Ok(cached);
    }

    let reciters = server::fetch_section_reciters(section_id)
        .await
        .map_err(|e| e.to_string())?;
    let _ = cache_service::put_json(cache_key, &reciters, Some(CATALOG_EXPIRY_HOURS));
    Ok(reciters)
}

#[allow(dead_code)]
pub async fn get_recitation(reciter_id: u32, surah_id: u32) -> Result<Vec<Recitation>, String> {
    let cache_key = keys::api_response("recitation", &format!("{reciter_id}:{surah_id}"));
    if let Some(cached) = cache_service::get_json::<Vec<Recitation>>(&cache_key) {
        return Ok(cached);
    }

    let recitations = server::fetch_recitation(reciter_id, surah_id)
        .await
        .map_err(|e| e.to_string())?;
    let _ = cache_service::put_json(cache_key, &recitations, Some(CATALOG_EXPIRY_HOURS));
    Ok(recitations)
}
