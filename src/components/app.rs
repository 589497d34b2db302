use crate::api::catalog;
use crate::api::models::{AudioFile, Qari, Section, Surah};
use crate::components::{
    AboutView, AppView, AudioController, BrowseTab, ContactView, Header, Icon,
    ParticleBackground, PlaybackHandle, Player, ReciterSelector, SectionBar, SurahSelector,
    TextDisplay,
};
use crate::components::selection::{next_index, previous_index, shuffle_index};
use crate::db::{initialize_database, load_settings, save_settings, PlayerSettings};
use crate::diagnostics::{log_perf, perf_start};
use crate::playback::PlaybackSession;
use dioxus::logger::tracing::warn;
use dioxus::prelude::*;
use rand::Rng;

/// Newtype contexts so same-shaped signals do not collide in the context map.
#[derive(Clone, Copy)]
pub struct SelectedSectionSignal(pub Signal<Option<u32>>);
#[derive(Clone, Copy)]
pub struct ShuffleSignal(pub Signal<bool>);
#[derive(Clone, Copy)]
pub struct ShowTextSignal(pub Signal<bool>);
#[derive(Clone, Copy)]
pub struct CatalogErrorSignal(pub Signal<Option<String>>);

/// Per-screen fetch indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadingFlags {
    pub sections: bool,
    pub surahs: bool,
    pub audio_files: bool,
}

/// Chapter navigation over the loaded surah list. Lives in context so the
/// player buttons and the end-of-track handler resolve moves identically.
#[derive(Clone, Copy)]
pub struct SurahNavigator {
    surahs: Signal<Vec<Surah>>,
    selected_surah: Signal<Option<Surah>>,
    shuffle: Signal<bool>,
    show_text: Signal<bool>,
}

impl SurahNavigator {
    fn current_position(&self) -> Option<(usize, usize)> {
        let surahs = self.surahs.peek();
        let selected = self.selected_surah.peek();
        let current_id = selected.as_ref()?.id;
        let index = surahs.iter().position(|s| s.id == current_id)?;
        Some((index, surahs.len()))
    }

    fn move_to(&mut self, index: usize) {
        let target = self.surahs.peek().get(index).cloned();
        if let Some(surah) = target {
            self.show_text.set(false);
            self.selected_surah.set(Some(surah));
        }
    }

    pub fn next(&mut self) {
        let Some((index, len)) = self.current_position() else {
            return;
        };
        let target = if *self.shuffle.peek() {
            shuffle_index(index, len, &mut rand::thread_rng())
        } else {
            next_index(index, len)
        };
        self.move_to(target);
    }

    pub fn previous(&mut self) {
        let Some((index, len)) = self.current_position() else {
            return;
        };
        let target = if *self.shuffle.peek() {
            shuffle_index(index, len, &mut rand::thread_rng())
        } else {
            previous_index(index, len)
        };
        self.move_to(target);
    }

    /// Turns shuffle on and jumps to a uniformly random chapter.
    pub fn shuffle_play(&mut self) {
        let len = self.surahs.peek().len();
        if len == 0 {
            return;
        }
        self.shuffle.set(true);
        let target = rand::thread_rng().gen_range(0..len);
        self.move_to(target);
    }
}

fn footer_year() -> String {
    use chrono::Datelike;
    chrono::Utc::now().year().to_string()
}

#[component]
pub fn AppShell() -> Element {
    let session = use_signal(PlaybackSession::default);
    let is_playing = use_signal(|| false);
    let current_verse = use_signal(|| 0u32);
    let next_requests = use_signal(|| 0u64);
    let pending_commands = use_signal(Vec::new);
    let mut handle = PlaybackHandle::new(
        session,
        is_playing,
        current_verse,
        next_requests,
        pending_commands,
    );

    let current_view = use_signal(|| AppView::Home);
    let active_tab = use_signal(|| BrowseTab::Reciters);
    let mut sections = use_signal(Vec::<Section>::new);
    let mut selected_section = use_signal(|| None::<u32>);
    let mut selected_reciter = use_signal(|| None::<Qari>);
    let mut surahs = use_signal(Vec::<Surah>::new);
    let mut selected_surah = use_signal(|| None::<Surah>);
    let mut audio_files = use_signal(Vec::<AudioFile>::new);
    let mut shuffle_enabled = use_signal(|| false);
    let mut show_text = use_signal(|| false);
    let mut loading = use_signal(LoadingFlags::default);
    let mut catalog_error = use_signal(|| None::<String>);
    let mut settings = use_signal(PlayerSettings::default);
    let mut settings_loaded = use_signal(|| false);

    let navigator = SurahNavigator {
        surahs,
        selected_surah,
        shuffle: shuffle_enabled,
        show_text,
    };

    use_context_provider(|| handle);
    use_context_provider(|| navigator);
    use_context_provider(|| current_view);
    use_context_provider(|| active_tab);
    use_context_provider(|| sections);
    use_context_provider(|| SelectedSectionSignal(selected_section));
    use_context_provider(|| selected_reciter);
    use_context_provider(|| surahs);
    use_context_provider(|| selected_surah);
    use_context_provider(|| audio_files);
    use_context_provider(|| ShuffleSignal(shuffle_enabled));
    use_context_provider(|| ShowTextSignal(show_text));
    use_context_provider(|| loading);
    use_context_provider(|| CatalogErrorSignal(catalog_error));
    use_context_provider(|| settings);

    // Restore persisted listening preferences, then load the catalog.
    use_effect(move || {
        spawn(async move {
            if let Err(_e) = initialize_database().await {
                warn!("failed to initialize settings store: {_e}");
            }
            if let Ok(saved) = load_settings().await {
                handle.set_volume(saved.volume);
                if saved.muted {
                    handle.toggle_mute();
                }
                if saved.repeat_enabled {
                    handle.toggle_repeat();
                }
                shuffle_enabled.set(saved.shuffle_enabled);
                show_text.set(saved.show_text);
                settings.set(saved);
            }
            settings_loaded.set(true);
        });

        spawn(async move {
            let started = perf_start();
            loading.write().sections = true;
            match catalog::get_sections().await {
                Ok(data) => {
                    // First section opens by default.
                    if selected_section.peek().is_none() {
                        selected_section.set(data.first().map(|s| s.id));
                    }
                    sections.set(data);
                }
                Err(e) => {
                    warn!("failed to load sections: {e}");
                    catalog_error.set(Some("Failed to load sections. Please try again later.".to_string()));
                }
            }
            loading.write().sections = false;
            log_perf("load_sections", started, "");
        });

        spawn(async move {
            let started = perf_start();
            loading.write().surahs = true;
            match catalog::get_surahs().await {
                Ok(data) => surahs.set(data),
                Err(e) => {
                    warn!("failed to load surahs: {e}");
                    catalog_error.set(Some("Failed to load surahs. Please try again later.".to_string()));
                }
            }
            loading.write().surahs = false;
            log_perf("load_surahs", started, "");
        });
    });

    // Descriptor list follows the selected reciter. Tagged with the reciter
    // id so a slow response for a reciter the listener already left never
    // lands in the signal.
    use_effect(move || {
        let Some(qari_id) = selected_reciter().map(|q| q.id) else {
            audio_files.set(Vec::new());
            return;
        };

        spawn(async move {
            loading.write().audio_files = true;
            let files = catalog::get_audio_files(qari_id).await;
            let still_current = selected_reciter.peek().as_ref().map(|q| q.id) == Some(qari_id);
            if still_current {
                audio_files.set(files);
            }
            loading.write().audio_files = false;
        });
    });

    // Feed reciter/surah picks into the playback session. Keyed so that
    // unrelated re-renders never restart the current recitation.
    let mut last_selection = use_signal(|| None::<(u32, u32)>);
    use_effect(move || {
        let reciter = selected_reciter();
        let surah = selected_surah();
        match (reciter, surah) {
            (Some(qari), Some(surah)) => {
                let key = (qari.id, surah.id);
                if *last_selection.peek() == Some(key) {
                    return;
                }
                last_selection.set(Some(key));
                let duration_hint = audio_files
                    .peek()
                    .iter()
                    .find(|f| f.surah_id == surah.id)
                    .map(|f| f.format.duration)
                    .filter(|d| *d > 0.0);
                handle.select(&qari, surah.id, duration_hint);
            }
            _ => {
                if last_selection.peek().is_some() {
                    last_selection.set(None);
                    handle.deselect();
                }
            }
        }
    });

    // Track-end advances. The session only announces the end; which chapter
    // comes next is resolved here through the navigator.
    let request_count = handle.next_request_count();
    let mut seen_requests = use_signal(|| 0u64);
    use_effect({
        let mut navigator = navigator;
        move || {
            let count = request_count();
            if count == *seen_requests.peek() {
                return;
            }
            seen_requests.set(count);
            navigator.next();
        }
    });

    // Persist preference changes once the initial load has settled.
    use_effect(move || {
        let snapshot = {
            let session = session();
            PlayerSettings {
                volume: session.volume(),
                muted: session.is_muted(),
                repeat_enabled: session.repeat_enabled(),
                shuffle_enabled: shuffle_enabled(),
                show_text: show_text(),
            }
        };
        if !*settings_loaded.peek() || *settings.peek() == snapshot {
            return;
        }
        settings.set(snapshot.clone());
        spawn(async move {
            if let Err(_e) = save_settings(snapshot).await {
                warn!("failed to persist player settings: {_e}");
            }
        });
    });

    let view = current_view();

    rsx! {
        div { class: "app-shell",
            ParticleBackground {}
            Header {}
            AudioController {}

            main { class: "app-main",
                {match view {
                    AppView::Home => rsx! { HomeView {} },
                    AppView::About => rsx! { AboutView {} },
                    AppView::Contact => rsx! { ContactView {} },
                }}
            }

            footer { class: "app-footer",
                p { "© {footer_year()} Quranic Audio Player. All rights reserved." }
                a {
                    href: "https://quran.com",
                    target: "_blank",
                    class: "footer-link",
                    "Visit Quran.com"
                }
            }
        }
    }
}

#[component]
fn HomeView() -> Element {
    let handle = use_context::<PlaybackHandle>();
    let mut navigator = use_context::<SurahNavigator>();
    let mut active_tab = use_context::<Signal<BrowseTab>>();
    let selected_reciter = use_context::<Signal<Option<Qari>>>();
    let selected_surah = use_context::<Signal<Option<Surah>>>();
    let mut show_text = use_context::<ShowTextSignal>().0;
    let loading = use_context::<Signal<LoadingFlags>>();
    let catalog_error = use_context::<CatalogErrorSignal>().0;

    let has_media = handle.session.read().media_url().is_some();
    let showing_text = show_text() && selected_surah().is_some();
    let reciter_chosen = selected_reciter().is_some();

    rsx! {
        h1 { class: "page-title", "Quranic Audio Player" }

        SectionBar {}

        div { class: "promo-card",
            div {
                h2 { class: "promo-title", "Read the Quran" }
                p { class: "promo-subtitle", "Visit Quran.com for reading, translations, and tafsir" }
            }
            a {
                class: "promo-link",
                href: "https://quran.com",
                target: "_blank",
                "Visit Quran.com "
                Icon { name: "external-link".to_string(), class: "icon-sm".to_string() }
            }
        }

        if reciter_chosen {
            div { class: "shuffle-play-row",
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| navigator.shuffle_play(),
                    Icon { name: "shuffle".to_string(), class: "icon-sm".to_string() }
                    " Shuffle Play"
                }
            }
        }

        if has_media {
            Player {}
        }

        if !showing_text {
            div { class: "browse-tabs",
                button {
                    class: if active_tab() == BrowseTab::Reciters { "tab tab-active" } else { "tab" },
                    onclick: move |_| active_tab.set(BrowseTab::Reciters),
                    "Reciters"
                }
                button {
                    class: if active_tab() == BrowseTab::Surahs { "tab tab-active" } else { "tab" },
                    onclick: move |_| active_tab.set(BrowseTab::Surahs),
                    "Surahs"
                }
            }

            {match active_tab() {
                BrowseTab::Reciters => rsx! { ReciterSelector {} },
                BrowseTab::Surahs => rsx! { SurahSelector {} },
            }}
        } else {
            div { class: "text-panel",
                div { class: "text-panel-bar",
                    button {
                        class: "btn btn-outline",
                        onclick: move |_| show_text.set(false),
                        "Back to Selection"
                    }
                    if let Some(surah) = selected_surah() {
                        h2 { class: "text-panel-heading",
                            "{surah.name.simple} ({surah.name.arabic})"
                        }
                    }
                }
                TextDisplay {}
            }
        }

        if !has_media && !loading().audio_files && !showing_text {
            div { class: "hint-text",
                if reciter_chosen {
                    "Select a surah to play"
                } else {
                    "Select a reciter and surah to play"
                }
            }
        }

        if loading().audio_files && !showing_text {
            div { class: "hint-text", "Loading audio files..." }
        }

        if let Some(message) = catalog_error() {
            if !showing_text {
                div { class: "error-text", "{message}" }
            }
        }
    }
}
