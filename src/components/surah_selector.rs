use crate::api::models::{format_duration, AudioFile, Qari, Surah};
use crate::components::{Icon, LoadingFlags, ShowTextSignal};
use dioxus::prelude::*;

/// Searchable chapter list with per-surah duration badges taken from the
/// reciter's descriptor list. Picking a surah starts playback and opens
/// the reading pane.
#[component]
pub fn SurahSelector() -> Element {
    let surahs = use_context::<Signal<Vec<Surah>>>();
    let mut selected_surah = use_context::<Signal<Option<Surah>>>();
    let selected_reciter = use_context::<Signal<Option<Qari>>>();
    let audio_files = use_context::<Signal<Vec<AudioFile>>>();
    let mut show_text = use_context::<ShowTextSignal>().0;
    let loading = use_context::<Signal<LoadingFlags>>();

    let mut search_query = use_signal(String::new);

    let reciter = selected_reciter();
    let current_id = selected_surah().map(|s| s.id);

    if reciter.is_none() {
        return rsx! {
            div { class: "hint-text", "Pick a reciter first to browse their surahs" }
        };
    }

    let raw_query = search_query().trim().to_string();
    let query = raw_query.to_lowercase();
    let all_surahs = surahs();
    let mut filtered = Vec::new();
    if query.is_empty() {
        filtered = all_surahs.clone();
    } else {
        for surah in &all_surahs {
            let simple = surah.name.simple.to_lowercase();
            let english = surah.name.english.to_lowercase();
            if simple.contains(&query)
                || english.contains(&query)
                || surah.name.arabic.contains(raw_query.as_str())
                || surah.id.to_string() == query
            {
                filtered.push(surah.clone());
            }
        }
    }
    let has_query = !query.is_empty();

    rsx! {
        div { class: "selector-panel",
            if let Some(ref qari) = reciter {
                div { class: "reciter-summary",
                    Icon { name: "headphones".to_string(), class: "icon-md".to_string() }
                    div {
                        span { class: "reciter-name", "{qari.name}" }
                        if let Some(ref arabic) = qari.arabic_name {
                            span { class: "reciter-arabic-name", "{arabic}" }
                        }
                    }
                }
            }

            div { class: "search-box",
                Icon { name: "search".to_string(), class: "search-icon".to_string() }
                input {
                    class: "search-input",
                    placeholder: "Search surahs by name or number",
                    value: search_query,
                    oninput: move |e| search_query.set(e.value()),
                }
            }

            if loading().surahs {
                div { class: "hint-text", "Loading surahs..." }
            } else if filtered.is_empty() {
                div { class: "hint-text",
                    if has_query {
                        "No surahs match \"{raw_query}\""
                    } else {
                        "No surahs found"
                    }
                }
            } else {
                div { class: "surah-list",
                    for surah in filtered {
                        button {
                            class: if current_id == Some(surah.id) {
                                "surah-row surah-row-active"
                            } else {
                                "surah-row"
                            },
                            onclick: {
                                let surah = surah.clone();
                                move |_| {
                                    selected_surah.set(Some(surah.clone()));
                                    show_text.set(true);
                                }
                            },
                            span { class: "surah-number", "{surah.id}" }
                            div { class: "surah-names",
                                span { class: "surah-name", "{surah.name.simple}" }
                                span { class: "surah-name-english", "{surah.name.english}" }
                            }
                            span { class: "surah-arabic", "{surah.name.arabic}" }
                            {
                                let duration = audio_files
                                    .read()
                                    .iter()
                                    .find(|f| f.surah_id == surah.id)
                                    .map(|f| f.format.duration)
                                    .filter(|d| *d > 0.0);
                                match duration {
                                    Some(secs) => rsx! {
                                        span { class: "surah-duration", "{format_duration(secs)}" }
                                    },
                                    None => rsx! {
                                        span { class: "surah-duration surah-duration-empty", "--:--" }
                                    },
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
