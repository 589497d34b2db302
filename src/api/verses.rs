//! Uthmani-script verse text from the quran.com API, fetched directly from
//! the browser. A failed fetch surfaces an error message alongside a small
//! fixed sample so the reading pane keeps its layout.

use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;

use crate::api::models::Verse;
use crate::cache::keys;
use crate::cache_service;

const QURAN_TEXT_BASE_URL: &str = "https://api.quran.com/api/v4/quran/verses/uthmani";
const VERSES_EXPIRY_HOURS: u32 = 24;

static HTTP_CLIENT: Lazy<Client> = Lazy::new(Client::new);

#[derive(Debug, Deserialize)]
struct VersesResponse {
    verses: Vec<Verse>,
}

pub async fn get_verses(surah_id: u32) -> Result<Vec<Verse>, String> {
    let cache_key = keys::verses(surah_id);
    if let Some(cached) = cache_service::get_json::<Vec<Verse>>(&cache_key) {
        return Ok(cached);
    }

    let url = format!("{QURAN_TEXT_BASE_URL}?chapter_number={surah_id}");
    let response = HTTP_CLIENT
        .get(&url)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !response.status().is_success() {
        return Err(format!(
            "Failed to fetch Quran text: {}",
            response.status()
        ));
    }

    let decoded: VersesResponse = response.json().await.map_err(|e| e.to_string())?;
    if decoded.verses.is_empty() {
        return Err("Invalid response format".to_string());
    }

    let _ = cache_service::put_json(cache_key, &decoded.verses, Some(VERSES_EXPIRY_HOURS));
    Ok(decoded.verses)
}

/// Sample verses shown behind the error panel when the text API is down.
pub fn fallback_verses() -> Vec<Verse> {
    vec![
        Verse {
            verse_number: 1,
            text_uthmani: "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ".to_string(),
        },
        Verse {
            verse_number: 2,
            text_uthmani: "الْحَمْدُ لِلَّهِ رَبِّ الْعَالَمِينَ".to_string(),
        },
        Verse {
            verse_number: 3,
            text_uthmani: "الرَّحْمَٰنِ الرَّحِيمِ".to_string(),
        },
    ]
}

/// Western to Eastern Arabic digits for the verse-end markers.
pub fn to_arabic_digits(num: u32) -> String {
    const DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];
    num.to_string()
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => DIGITS[d as usize],
            None => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arabic_digits_cover_all_verse_numbers() {
        assert_eq!(to_arabic_digits(0), "٠");
        assert_eq!(to_arabic_digits(7), "٧");
        assert_eq!(to_arabic_digits(114), "١١٤");
        assert_eq!(to_arabic_digits(286), "٢٨٦");
    }

    #[test]
    fn fallback_sample_is_numbered_from_one() {
        let verses = fallback_verses();
        assert_eq!(verses.len(), 3);
        assert!(verses
            .iter()
            .enumerate()
            .all(|(i, v)| v.verse_number == i as u32 + 1));
        assert!(verses.iter().all(|v| !v.text_uthmani.is_empty()));
    }

    #[test]
    fn verses_response_decodes_quran_com_shape() {
        let json = r#"{
            "verses": [
                { "verse_number": 1, "text_uthmani": "بِسْمِ اللَّهِ" }
            ],
            "meta": { "filters": { "chapter_number": "1" } }
        }"#;
        let decoded: VersesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(decoded.verses.len(), 1);
        assert_eq!(decoded.verses[0].verse_number, 1);
    }
}
