use serde::{Deserialize, Serialize};

/// Number of chapters in the recited text.
pub const SURAH_COUNT: u32 = 114;

/// Host that serves the actual audio bytes. The catalog API only describes
/// the files; the playable URL is derived from the reciter path and surah id.
pub const DOWNLOAD_BASE_URL: &str = "https://download.quranicaudio.com/quran/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Section {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Qari {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub arabic_name: Option<String>,
    pub relative_path: String,
    #[serde(default)]
    pub file_formats: String,
    #[serde(default)]
    pub section_id: u32,
    #[serde(default)]
    pub home: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub torrent_filename: Option<String>,
    #[serde(default)]
    pub torrent_info_hash: Option<String>,
    #[serde(default)]
    pub torrent_seeders: Option<i64>,
    #[serde(default)]
    pub torrent_leechers: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SurahName {
    pub complex: String,
    pub simple: String,
    pub english: String,
    pub arabic: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SurahRevelation {
    pub place: String,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Surah {
    pub id: u32,
    #[serde(default)]
    pub page: Vec<u32>,
    #[serde(default)]
    pub bismillah_pre: bool,
    #[serde(default)]
    pub ayat: u32,
    pub name: SurahName,
    #[serde(default)]
    pub revelation: SurahRevelation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AudioFormat {
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub bit_rate: u64,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub nb_streams: u32,
    #[serde(default)]
    pub start_time: f64,
    #[serde(default)]
    pub format_name: String,
    #[serde(default)]
    pub nb_programs: u32,
    #[serde(default)]
    pub probe_score: u32,
    #[serde(default)]
    pub format_long_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AudioMetadata {
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub track: String,
    #[serde(default)]
    pub artist: String,
}

/// Per-surah descriptor for one reciter. Feeds duration badges only; the
/// stream URL is always built from the qari path, never from this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AudioFile {
    pub qari_id: u32,
    pub surah_id: u32,
    #[serde(default)]
    pub main_id: u64,
    #[serde(default)]
    pub recitation_id: u32,
    #[serde(default)]
    pub filenum: Option<u32>,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub extension: String,
    #[serde(default)]
    pub stream_count: u64,
    #[serde(default)]
    pub download_count: u64,
    #[serde(default)]
    pub format: AudioFormat,
    #[serde(default)]
    pub metadata: AudioMetadata,
    #[serde(default)]
    pub qari: Qari,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SectionReciter {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Recitation {
    pub id: u64,
    pub chapter_id: u32,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub total_seconds: u32,
    pub audio_url: String,
    #[serde(default)]
    pub reciter: SectionReciter,
}

/// One verse of Uthmani-script text from the quran.com API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Verse {
    pub verse_number: u32,
    pub text_uthmani: String,
}

/// Resolve the playable media URL for a reciter/surah pair. The surah id is
/// always zero-padded to exactly three digits.
pub fn construct_audio_url(relative_path: &str, surah_id: u32) -> String {
    format!("{DOWNLOAD_BASE_URL}{relative_path}{surah_id:03}.mp3")
}

/// Format seconds as `M:SS`, with an hours component only when >= 1 hour.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_url_pads_surah_id_to_three_digits() {
        assert_eq!(
            construct_audio_url("abdullaah_basfar/", 1),
            "https://download.quranicaudio.com/quran/abdullaah_basfar/001.mp3"
        );
        assert_eq!(
            construct_audio_url("abdullaah_basfar/", 18),
            "https://download.quranicaudio.com/quran/abdullaah_basfar/018.mp3"
        );
        assert_eq!(
            construct_audio_url("abdullaah_basfar/", 114),
            "https://download.quranicaudio.com/quran/abdullaah_basfar/114.mp3"
        );
    }

    #[test]
    fn audio_url_is_pure_in_path_and_id() {
        for id in 1..=SURAH_COUNT {
            let url = construct_audio_url("mishari/", id);
            assert_eq!(url, construct_audio_url("mishari/", id));
            assert!(url.ends_with(&format!("{id:03}.mp3")));
        }
    }

    #[test]
    fn duration_formatting_matches_expected_cases() {
        assert_eq!(format_duration(0.0), "0:00");
        assert_eq!(format_duration(59.0), "0:59");
        assert_eq!(format_duration(60.0), "1:00");
        assert_eq!(format_duration(3661.0), "1:01:01");
    }

    #[test]
    fn duration_formatting_tolerates_bad_input() {
        assert_eq!(format_duration(f64::NAN), "0:00");
        assert_eq!(format_duration(-5.0), "0:00");
        assert_eq!(format_duration(61.9), "1:01");
    }

    #[test]
    fn qari_decodes_upstream_payload() {
        let json = r#"{
            "id": 1,
            "name": "Abdullah Awad al-Juhani",
            "arabic_name": "عبدالله عواد الجهني",
            "relative_path": "abdullaah_3awwaad_al-juhaynee/",
            "file_formats": "mp3",
            "section_id": 1,
            "home": true,
            "description": null,
            "torrent_filename": null,
            "torrent_info_hash": null,
            "torrent_seeders": null,
            "torrent_leechers": null
        }"#;
        let qari: Qari = serde_json::from_str(json).unwrap();
        assert_eq!(qari.id, 1);
        assert_eq!(qari.relative_path, "abdullaah_3awwaad_al-juhaynee/");
        assert!(qari.home);
        assert!(qari.description.is_none());
    }

    #[test]
    fn surah_decodes_upstream_payload() {
        let json = r#"{
            "id": 1,
            "page": [1, 1],
            "bismillah_pre": false,
            "ayat": 7,
            "name": {
                "complex": "Al-Fātiĥah",
                "simple": "Al-Fatihah",
                "english": "The Opener",
                "arabic": "الفاتحة"
            },
            "revelation": { "place": "makkah", "order": 5 }
        }"#;
        let surah: Surah = serde_json::from_str(json).unwrap();
        assert_eq!(surah.ayat, 7);
        assert_eq!(surah.name.simple, "Al-Fatihah");
        assert_eq!(surah.revelation.order, 5);
    }
}
