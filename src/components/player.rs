use crate::api::models::{format_duration, Qari, Surah};
use crate::components::{Icon, PlaybackHandle, ShuffleSignal, SurahNavigator};
use crate::playback::TransportState;
use dioxus::prelude::*;

const RING_RADIUS: f64 = 45.0;

#[component]
pub fn Player() -> Element {
    let mut handle = use_context::<PlaybackHandle>();
    let mut navigator = use_context::<SurahNavigator>();
    let selected_surah = use_context::<Signal<Option<Surah>>>();
    let selected_reciter = use_context::<Signal<Option<Qari>>>();
    let mut shuffle_enabled = use_context::<ShuffleSignal>().0;

    let session = handle.session.read().clone();
    let is_playing = (handle.is_playing)();

    let elapsed = session.elapsed();
    let duration = session.duration();
    let progress = if duration > 0.0 {
        (elapsed / duration).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let circumference = 2.0 * std::f64::consts::PI * RING_RADIUS;
    let dash_offset = circumference * (1.0 - progress);
    let loading = session.state() == TransportState::Loading;
    let errored = session.state() == TransportState::Error;
    let controls_enabled = session.controls_enabled();
    let display_muted = session.is_display_muted();
    let volume_percent = (session.volume() * 100.0).round();
    let repeat_on = session.repeat_enabled();
    let shuffle_on = shuffle_enabled();

    let title = selected_surah()
        .map(|s| format!("Surah {}", s.name.simple))
        .unwrap_or_default();
    let reciter_name = selected_reciter().map(|q| q.name).unwrap_or_default();
    let surah_number = selected_surah().map(|s| s.id).unwrap_or(1);

    let on_seek = move |e: Event<FormData>| {
        if let Ok(percent) = e.value().parse::<f64>() {
            let duration = handle.session.peek().duration();
            if duration > 0.0 {
                handle.seek((percent.clamp(0.0, 100.0) / 100.0) * duration);
            }
        }
    };

    let on_volume_change = move |e: Event<FormData>| {
        if let Ok(val) = e.value().parse::<f64>() {
            handle.set_volume((val / 100.0).clamp(0.0, 1.0));
        }
    };

    rsx! {
        div { class: "player-card",
            if let Some(message) = session.error() {
                div { class: "player-error",
                    Icon { name: "alert".to_string(), class: "icon-sm".to_string() }
                    span { "{message}" }
                }
            }

            div { class: "player-heading",
                h2 { class: "player-title", "{title}" }
                p { class: "player-reciter", "{reciter_name}" }
            }

            div { class: "progress-ring-wrap",
                svg {
                    class: "progress-ring",
                    view_box: "0 0 100 100",
                    circle {
                        class: "progress-ring-track",
                        cx: "50",
                        cy: "50",
                        r: "{RING_RADIUS}",
                        fill: "none",
                        stroke_width: "4",
                    }
                    circle {
                        class: "progress-ring-fill",
                        cx: "50",
                        cy: "50",
                        r: "{RING_RADIUS}",
                        fill: "none",
                        stroke_width: "4",
                        stroke_dasharray: "{circumference}",
                        stroke_dashoffset: "{dash_offset}",
                        transform: "rotate(-90 50 50)",
                    }
                }
                button {
                    id: "play-pause-btn",
                    class: "play-button",
                    disabled: !controls_enabled || loading,
                    onclick: move |_| handle.toggle_play(),
                    if loading {
                        span { class: "spinner" }
                    } else if is_playing {
                        Icon { name: "pause".to_string(), class: "icon-lg".to_string() }
                    } else {
                        Icon { name: "play".to_string(), class: "icon-lg".to_string() }
                    }
                }
            }

            div { class: "player-times",
                span { "{format_duration(elapsed)}" }
                input {
                    r#type: "range",
                    class: "seek-slider",
                    min: "0",
                    max: "100",
                    value: "{progress * 100.0}",
                    disabled: !controls_enabled,
                    oninput: on_seek,
                }
                span { "{format_duration(duration)}" }
            }

            div { class: "player-controls",
                button {
                    class: if repeat_on { "control-btn control-active" } else { "control-btn" },
                    disabled: errored,
                    onclick: move |_| handle.toggle_repeat(),
                    Icon { name: "repeat".to_string(), class: "icon-md".to_string() }
                }
                button {
                    id: "prev-btn",
                    class: "control-btn",
                    disabled: !controls_enabled,
                    onclick: move |_| navigator.previous(),
                    Icon { name: "skip-back".to_string(), class: "icon-md".to_string() }
                }
                button {
                    id: "next-btn",
                    class: "control-btn",
                    disabled: !controls_enabled,
                    onclick: move |_| navigator.next(),
                    Icon { name: "skip-forward".to_string(), class: "icon-md".to_string() }
                }
                button {
                    class: if shuffle_on { "control-btn control-active" } else { "control-btn" },
                    disabled: errored,
                    onclick: move |_| {
                        let enabled = *shuffle_enabled.peek();
                        shuffle_enabled.set(!enabled);
                    },
                    Icon { name: "shuffle".to_string(), class: "icon-md".to_string() }
                }
            }

            div { class: "player-volume",
                button {
                    class: "control-btn",
                    onclick: move |_| handle.toggle_mute(),
                    if display_muted {
                        Icon { name: "volume-muted".to_string(), class: "icon-md".to_string() }
                    } else {
                        Icon { name: "volume".to_string(), class: "icon-md".to_string() }
                    }
                }
                input {
                    r#type: "range",
                    class: "volume-slider",
                    min: "0",
                    max: "100",
                    value: "{volume_percent}",
                    oninput: on_volume_change,
                }
            }

            a {
                class: "player-external",
                href: "https://quran.com/{surah_number}",
                target: "_blank",
                "Read along on Quran.com "
                Icon { name: "external-link".to_string(), class: "icon-sm".to_string() }
            }
        }
    }
}
