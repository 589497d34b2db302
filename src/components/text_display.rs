use crate::api::models::{Qari, Surah};
use crate::api::verses::{fallback_verses, get_verses, to_arabic_digits};
use crate::components::{Icon, PlaybackHandle};
use dioxus::prelude::*;

/// Uthmani text for the selected surah. Verses at or before the current
/// estimate are highlighted, and the estimated verse is kept in view while
/// the recitation plays.
#[component]
pub fn TextDisplay() -> Element {
    let handle = use_context::<PlaybackHandle>();
    let selected_surah = use_context::<Signal<Option<Surah>>>();
    let selected_reciter = use_context::<Signal<Option<Qari>>>();

    let verses_resource = use_resource(move || {
        let surah_id = selected_surah().map(|s| s.id);
        async move {
            match surah_id {
                Some(id) => get_verses(id).await,
                None => Ok(Vec::new()),
            }
        }
    });

    let current_verse = (handle.current_verse)();
    let is_playing = (handle.is_playing)();
    let surah_name = selected_surah()
        .map(|s| s.name.simple)
        .unwrap_or_default();
    let reciter_name = selected_reciter().map(|q| q.name);

    // Follow the recitation: keep the estimated verse centered.
    #[cfg(target_arch = "wasm32")]
    use_effect(move || {
        let verse = (handle.current_verse)();
        if verse == 0 {
            return;
        }
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            if let Some(element) = document.get_element_by_id(&format!("verse-{verse}")) {
                element.scroll_into_view();
            }
        }
    });

    rsx! {
        div { class: if is_playing { "text-card text-card-playing" } else { "text-card" },
            {match verses_resource() {
                None => rsx! {
                    div { class: "text-card-header",
                        h3 { "Loading Surah {surah_name}..." }
                    }
                    div { class: "verse-skeleton-list",
                        for _ in 0..5 {
                            div { class: "verse-skeleton" }
                        }
                    }
                },
                Some(result) => {
                    let (verses, error) = match result {
                        Ok(verses) => (verses, None),
                        Err(e) => (fallback_verses(), Some(e)),
                    };

                    rsx! {
                        div { class: "text-card-header",
                            h3 { "Surah {surah_name}" }
                            if let Some(name) = reciter_name.clone() {
                                div { class: "text-card-reciter",
                                    span { class: "text-card-reciter-label", "Reciter:" }
                                    span { "{name}" }
                                }
                            }
                        }

                        if let Some(e) = error {
                            div { class: "error-panel",
                                Icon { name: "alert".to_string(), class: "icon-sm".to_string() }
                                span { "Failed to load Quran text. Please try again later. ({e})" }
                            }
                        }

                        div { class: "verse-flow", dir: "rtl",
                            for verse in verses {
                                span { class: "verse-block",
                                    span {
                                        id: "verse-{verse.verse_number}",
                                        class: if current_verse > 0 && verse.verse_number <= current_verse {
                                            "verse-text verse-text-highlight"
                                        } else {
                                            "verse-text"
                                        },
                                        "{verse.text_uthmani}"
                                    }
                                    span { class: "verse-marker",
                                        span { class: "verse-marker-number", "{to_arabic_digits(verse.verse_number)}" }
                                        "۝"
                                    }
                                }
                            }
                        }
                    }
                }
            }}
        }
    }
}
