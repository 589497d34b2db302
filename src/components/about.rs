use crate::cache_service;
use crate::components::Icon;
use dioxus::prelude::*;

fn format_size(bytes: usize) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}

/// Static about page: what the player is, where the audio and text come
/// from, and how it is put together.
#[component]
pub fn AboutView() -> Element {
    let mut cache_stats = use_signal(cache_service::stats);
    let stats = cache_stats();
    let used = format_size(stats.total_size_bytes);
    let capacity = format_size(stats.max_size_bytes);

    rsx! {
        div { class: "about-page",
            h1 { class: "page-title", "About" }

            section { class: "about-card",
                h2 { "Our Mission" }
                p {
                    "The Quranic Audio Player makes listening to beautiful recitations \
                     of the Holy Quran simple and accessible. Browse reciters from \
                     around the world, pick any of the 114 surahs, and follow along \
                     with the Uthmani text while you listen."
                }
            }

            section { class: "about-card",
                h2 { "Features" }
                ul { class: "about-feature-list",
                    li {
                        Icon { name: "headphones".to_string(), class: "icon-sm".to_string() }
                        "Stream recitations from a wide range of renowned reciters"
                    }
                    li {
                        Icon { name: "book-open".to_string(), class: "icon-sm".to_string() }
                        "Read the Arabic text of each surah while it plays"
                    }
                    li {
                        Icon { name: "shuffle".to_string(), class: "icon-sm".to_string() }
                        "Shuffle and repeat modes, with your preferences remembered"
                    }
                    li {
                        Icon { name: "search".to_string(), class: "icon-sm".to_string() }
                        "Search reciters and surahs by name, in English or Arabic"
                    }
                }
            }

            section { class: "about-card",
                h2 { "Data Sources" }
                p {
                    "Audio recitations and the reciter catalog are provided by "
                    a {
                        href: "https://quranicaudio.com",
                        target: "_blank",
                        "QuranicAudio.com"
                    }
                    ". Quranic text is provided by the "
                    a {
                        href: "https://quran.com",
                        target: "_blank",
                        "Quran.com"
                    }
                    " API. We are grateful to both projects for making this content \
                     freely available."
                }
            }

            section { class: "about-card",
                h2 { "Storage" }
                p {
                    "Catalog responses and verse text are cached on this device so \
                     browsing stays fast: {stats.entry_count} entries, \
                     {used} of {capacity}."
                }
                div { class: "about-storage-actions",
                    button {
                        class: "btn btn-outline",
                        onclick: move |_| {
                            cache_service::clear_all();
                            cache_stats.set(cache_service::stats());
                        },
                        "Clear Cached Data"
                    }
                }
            }

            section { class: "about-card",
                h2 { "Technology" }
                p {
                    "The player is a single-page app with a lightweight server layer \
                     that proxies and caches catalog requests. Playback state, your \
                     volume, and your repeat and shuffle preferences are kept locally \
                     so the player picks up where you left off."
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_format_with_sensible_units() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(25 * 1024 * 1024), "25.0 MB");
    }
}
