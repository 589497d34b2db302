use crate::api::models::{Qari, Section, Surah};
use crate::components::{
    BrowseTab, LoadingFlags, SelectedSectionSignal, ShowTextSignal,
};
use dioxus::prelude::*;

/// Catalog section pills. Picking a section resets the reciter and surah
/// selection, so playback stops and browsing starts over.
#[component]
pub fn SectionBar() -> Element {
    let sections = use_context::<Signal<Vec<Section>>>();
    let mut selected_section = use_context::<SelectedSectionSignal>().0;
    let mut selected_reciter = use_context::<Signal<Option<Qari>>>();
    let mut selected_surah = use_context::<Signal<Option<Surah>>>();
    let mut show_text = use_context::<ShowTextSignal>().0;
    let mut active_tab = use_context::<Signal<BrowseTab>>();
    let loading = use_context::<Signal<LoadingFlags>>();

    rsx! {
        div { class: "section-bar",
            if loading().sections {
                div { class: "hint-text", "Loading sections..." }
            } else {
                for section in sections() {
                    button {
                        class: if selected_section() == Some(section.id) {
                            "section-pill section-pill-active"
                        } else {
                            "section-pill"
                        },
                        onclick: move |_| {
                            selected_section.set(Some(section.id));
                            selected_reciter.set(None);
                            selected_surah.set(None);
                            show_text.set(false);
                            active_tab.set(BrowseTab::Reciters);
                        },
                        "{section.name}"
                    }
                }
            }
        }
    }
}
