use crate::api::catalog;
use crate::api::models::Qari;
use crate::components::{BrowseTab, Icon, SelectedSectionSignal};
use dioxus::prelude::*;

/// Searchable reciter list for the open section. Picking a reciter keeps
/// the current surah so recitations are easy to compare, and moves the
/// browsing tab over to the surah list.
#[component]
pub fn ReciterSelector() -> Element {
    let selected_section = use_context::<SelectedSectionSignal>().0;
    let mut selected_reciter = use_context::<Signal<Option<Qari>>>();
    let mut active_tab = use_context::<Signal<BrowseTab>>();

    let mut search_query = use_signal(String::new);

    let reciters = use_resource(move || {
        let section_id = selected_section();
        async move {
            match section_id {
                Some(id) => catalog::get_qaris_by_section(id).await,
                None => Ok(Vec::new()),
            }
        }
    });

    rsx! {
        div { class: "selector-panel",
            div { class: "search-box",
                Icon { name: "search".to_string(), class: "search-icon".to_string() }
                input {
                    class: "search-input",
                    placeholder: "Search reciters",
                    value: search_query,
                    oninput: move |e| search_query.set(e.value()),
                }
            }

            {match reciters() {
                None => rsx! {
                    div { class: "hint-text", "Loading reciters..." }
                },
                Some(Err(e)) => rsx! {
                    div { class: "error-text", "Failed to load reciters: {e}" }
                },
                Some(Ok(reciters)) => {
                    let raw_query = search_query().trim().to_string();
                    let query = raw_query.to_lowercase();
                    let mut filtered = Vec::new();
                    if query.is_empty() {
                        filtered = reciters.clone();
                    } else {
                        for reciter in &reciters {
                            let name = reciter.name.to_lowercase();
                            let arabic = reciter
                                .arabic_name
                                .as_deref()
                                .unwrap_or_default()
                                .to_lowercase();
                            if name.contains(&query) || arabic.contains(&query) {
                                filtered.push(reciter.clone());
                            }
                        }
                    }
                    let has_query = !query.is_empty();
                    let current_id = selected_reciter().map(|q| q.id);

                    rsx! {
                        if filtered.is_empty() {
                            div { class: "hint-text",
                                if has_query {
                                    "No reciters match \"{raw_query}\""
                                } else {
                                    "No reciters in this section"
                                }
                            }
                        } else {
                            div { class: "reciter-grid",
                                for reciter in filtered {
                                    button {
                                        class: if current_id == Some(reciter.id) {
                                            "reciter-card reciter-card-active"
                                        } else {
                                            "reciter-card"
                                        },
                                        onclick: {
                                            let reciter = reciter.clone();
                                            move |_| {
                                                selected_reciter.set(Some(reciter.clone()));
                                                active_tab.set(BrowseTab::Surahs);
                                            }
                                        },
                                        Icon { name: "headphones".to_string(), class: "icon-md".to_string() }
                                        div { class: "reciter-card-names",
                                            span { class: "reciter-name", "{reciter.name}" }
                                            if let Some(ref arabic) = reciter.arabic_name {
                                                span { class: "reciter-arabic-name", "{arabic}" }
                                            }
                                        }
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
