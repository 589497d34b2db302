//! Static stand-in payloads served when the upstream catalog is unreachable.
//! Shapes match the live API so the UI never has to special-case an outage.

use crate::api::models::{
    AudioFile, AudioFormat, AudioMetadata, Qari, Recitation, Section, SectionReciter, Surah,
    SurahName, SurahRevelation, SURAH_COUNT,
};

pub fn sections() -> Vec<Section> {
    vec![
        Section {
            id: 1,
            name: "Recitations".to_string(),
        },
        Section {
            id: 2,
            name: "Recitations from Haramain Taraweeh".to_string(),
        },
        Section {
            id: 3,
            name: "Non-Hafs Recitations".to_string(),
        },
        Section {
            id: 4,
            name: "Recitations with Translations".to_string(),
        },
    ]
}

pub fn qaris() -> Vec<Qari> {
    vec![
        Qari {
            id: 1,
            name: "Abdullah Awad al-Juhani".to_string(),
            arabic_name: Some("عبدالله عواد الجهني".to_string()),
            relative_path: "abdullaah_3awwaad_al-juhaynee/".to_string(),
            file_formats: "mp3".to_string(),
            section_id: 1,
            home: true,
            description: None,
            torrent_filename: Some(
                "[Quran] Abdullah Awad al-Juhani [127Kbps - 128Kbps].torrent".to_string(),
            ),
            torrent_info_hash: Some("b3f798af9d7c913a7ffa9c278a0299d5d4ef6780".to_string()),
            torrent_seeders: Some(2),
            torrent_leechers: Some(2),
        },
        Qari {
            id: 2,
            name: "AbdulMuhsin al-Qasim".to_string(),
            arabic_name: Some("عبدالمحسن القاسم".to_string()),
            relative_path: "abdul_muhsin_al_qasim/".to_string(),
            file_formats: "mp3".to_string(),
            section_id: 1,
            home: true,
            ..Default::default()
        },
    ]
}

pub fn qari(id: u32) -> Qari {
    Qari {
        id,
        name: "Abdullah Basfar".to_string(),
        arabic_name: Some("عبد الله بصفر".to_string()),
        relative_path: "abdullaah_basfar/".to_string(),
        file_formats: "mp3".to_string(),
        section_id: 1,
        home: true,
        ..Default::default()
    }
}

pub fn surahs() -> Vec<Surah> {
    vec![
        Surah {
            id: 1,
            page: vec![1, 1],
            bismillah_pre: false,
            ayat: 7,
            name: SurahName {
                complex: "Al-Fātiĥah".to_string(),
                simple: "Al-Fatihah".to_string(),
                english: "The Opener".to_string(),
                arabic: "الفاتحة".to_string(),
            },
            revelation: SurahRevelation {
                place: "makkah".to_string(),
                order: 5,
            },
        },
        Surah {
            id: 2,
            page: vec![2, 49],
            bismillah_pre: true,
            ayat: 286,
            name: SurahName {
                complex: "Al-Baqarah".to_string(),
                simple: "Al-Baqarah".to_string(),
                english: "The Cow".to_string(),
                arabic: "البقرة".to_string(),
            },
            revelation: SurahRevelation {
                place: "madinah".to_string(),
                order: 87,
            },
        },
        Surah {
            id: 3,
            page: vec![50, 76],
            bismillah_pre: true,
            ayat: 200,
            name: SurahName {
                complex: "Āli `Imrān".to_string(),
                simple: "Ali 'Imran".to_string(),
                english: "Family of Imran".to_string(),
                arabic: "آل عمران".to_string(),
            },
            revelation: SurahRevelation {
                place: "madinah".to_string(),
                order: 89,
            },
        },
    ]
}

pub fn surah(id: u32) -> Surah {
    Surah {
        id,
        page: vec![50, 76],
        bismillah_pre: true,
        ayat: 200,
        name: SurahName {
            complex: format!("Surah {id}"),
            simple: format!("Surah {id}"),
            english: format!("Surah {id}"),
            arabic: format!("سورة {id}"),
        },
        revelation: SurahRevelation {
            place: "makkah".to_string(),
            order: 89,
        },
    }
}

/// One descriptor per surah so every chapter stays playable offline of the
/// catalog, durations staggered so the badge column is not uniform.
pub fn audio_files(qari_id: u32) -> Vec<AudioFile> {
    (1..=SURAH_COUNT)
        .map(|surah_id| AudioFile {
            qari_id,
            surah_id,
            main_id: (surah_id as u64) + 999,
            recitation_id: 5,
            filenum: None,
            file_name: format!("{surah_id:03}.mp3"),
            extension: "mp3".to_string(),
            stream_count: 100,
            download_count: 200,
            format: AudioFormat {
                size: 15_659_136,
                bit_rate: 128_083,
                duration: 300.0 + ((surah_id - 1) as f64) * 10.0,
                nb_streams: 2,
                start_time: 0.0,
                format_name: "mp3".to_string(),
                nb_programs: 0,
                probe_score: 51,
                format_long_name: "MP2/3 (MPEG audio layer 2/3)".to_string(),
            },
            metadata: AudioMetadata {
                album: "Quran".to_string(),
                genre: "Quran".to_string(),
                title: format!("Surah {surah_id}"),
                track: format!("{surah_id}/{SURAH_COUNT}"),
                artist: "Fallback Reciter".to_string(),
            },
            qari: Qari {
                id: qari_id,
                name: "Fallback Reciter".to_string(),
                arabic_name: Some("القارئ الاحتياطي".to_string()),
                relative_path: "abdullaah_basfar/".to_string(),
                file_formats: "mp3".to_string(),
                section_id: 1,
                home: true,
                ..Default::default()
            },
        })
        .collect()
}

pub fn section_reciters() -> Vec<SectionReciter> {
    vec![
        SectionReciter {
            id: 1,
            name: "Abdullah Basfar".to_string(),
        },
        SectionReciter {
            id: 2,
            name: "Abdur-Rahman as-Sudais".to_string(),
        },
        SectionReciter {
            id: 3,
            name: "Abu Bakr al-Shatri".to_string(),
        },
        SectionReciter {
            id: 4,
            name: "Mishari Rashid al-`Afasy".to_string(),
        },
        SectionReciter {
            id: 5,
            name: "Hani ar-Rifai".to_string(),
        },
    ]
}

pub fn recitation(reciter_id: u32, surah_id: u32) -> Vec<Recitation> {
    vec![Recitation {
        id: 1,
        chapter_id: surah_id,
        file_size: 1_000_000,
        format: "mp3".to_string(),
        total_seconds: 180,
        audio_url: "https://download.quranicaudio.com/quran/abdullaah_basfar/001.mp3".to_string(),
        reciter: SectionReciter {
            id: reciter_id,
            name: "Abdullah Basfar".to_string(),
        },
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::construct_audio_url;

    #[test]
    fn sections_cover_the_four_catalog_groups() {
        let sections = sections();
        assert_eq!(sections.len(), 4);
        assert_eq!(sections[0].name, "Recitations");
        assert!(sections.iter().all(|s| s.id >= 1 && s.id <= 4));
    }

    #[test]
    fn audio_files_cover_every_surah_with_staggered_durations() {
        let files = audio_files(7);
        assert_eq!(files.len(), SURAH_COUNT as usize);
        assert_eq!(files[0].format.duration, 300.0);
        assert_eq!(files[113].format.duration, 1430.0);
        assert!(files.iter().all(|f| f.qari_id == 7));
        assert!(files.iter().enumerate().all(|(i, f)| f.surah_id == i as u32 + 1));
    }

    #[test]
    fn audio_file_qari_path_resolves_to_playable_url() {
        let files = audio_files(1);
        let url = construct_audio_url(&files[0].qari.relative_path, files[0].surah_id);
        assert_eq!(
            url,
            "https://download.quranicaudio.com/quran/abdullaah_basfar/001.mp3"
        );
    }

    #[test]
    fn parameterized_payloads_echo_the_request_ids() {
        assert_eq!(qari(42).id, 42);
        assert_eq!(surah(99).id, 99);
        assert_eq!(surah(99).name.simple, "Surah 99");
        let recs = recitation(3, 5);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].chapter_id, 5);
        assert_eq!(recs[0].reciter.id, 3);
    }

    #[test]
    fn payloads_round_trip_through_json() {
        let qaris = qaris();
        let json = serde_json::to_string(&qaris).unwrap();
        let back: Vec<crate::api::models::Qari> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, qaris);

        let reciters = section_reciters();
        assert_eq!(reciters.len(), 5);
        assert_eq!(reciters[3].name, "Mishari Rashid al-`Afasy");
    }
}
