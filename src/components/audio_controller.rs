//! Bridge between the pure playback session and the browser audio element.
//!
//! [`PlaybackHandle`] is the shared, copyable entry point: UI components
//! call its input methods, it routes the resulting signals into Dioxus
//! state, and queues transport commands. The [`AudioController`] component
//! is the only code that touches the `HtmlAudioElement`; it drains the
//! queue and feeds transport observations back into the session.

use dioxus::prelude::*;

use crate::api::models::Qari;
use crate::playback::{Effects, PlaybackSession, SessionSignal, TransportCommand};

#[cfg(target_arch = "wasm32")]
use crate::playback::TransportState;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{window, HtmlAudioElement};

#[derive(Clone, Copy)]
pub struct PlaybackHandle {
    pub session: Signal<PlaybackSession>,
    pub is_playing: Signal<bool>,
    pub current_verse: Signal<u32>,
    next_requests: Signal<u64>,
    pending_commands: Signal<Vec<TransportCommand>>,
}

impl PlaybackHandle {
    pub fn new(
        session: Signal<PlaybackSession>,
        is_playing: Signal<bool>,
        current_verse: Signal<u32>,
        next_requests: Signal<u64>,
        pending_commands: Signal<Vec<TransportCommand>>,
    ) -> Self {
        Self {
            session,
            is_playing,
            current_verse,
            next_requests,
            pending_commands,
        }
    }

    fn apply(&mut self, effects: Effects) {
        for signal in effects.signals {
            match signal {
                SessionSignal::PlayingChanged(playing) => {
                    if *self.is_playing.peek() != playing {
                        self.is_playing.set(playing);
                    }
                }
                SessionSignal::VerseChanged(verse) => self.current_verse.set(verse),
                SessionSignal::NextRequested => {
                    let count = *self.next_requests.peek();
                    self.next_requests.set(count + 1);
                }
            }
        }
        if !effects.commands.is_empty() {
            self.pending_commands.write().extend(effects.commands);
        }
    }

    // UI inputs

    pub fn select(&mut self, qari: &Qari, surah_id: u32, duration_hint: Option<f64>) {
        let effects = self.session.write().select(qari, surah_id, duration_hint);
        self.current_verse.set(0);
        self.apply(effects);
    }

    pub fn deselect(&mut self) {
        let effects = self.session.write().deselect();
        self.current_verse.set(0);
        self.apply(effects);
    }

    pub fn toggle_play(&mut self) {
        let effects = self.session.write().toggle_play();
        self.apply(effects);
    }

    pub fn seek(&mut self, secs: f64) {
        let effects = self.session.write().seek(secs);
        self.apply(effects);
    }

    pub fn set_volume(&mut self, volume: f64) {
        let effects = self.session.write().set_volume(volume);
        self.apply(effects);
    }

    pub fn toggle_mute(&mut self) {
        let effects = self.session.write().toggle_mute();
        self.apply(effects);
    }

    pub fn toggle_repeat(&mut self) {
        let effects = self.session.write().toggle_repeat();
        self.apply(effects);
    }

    // Transport observations

    pub fn transport_loaded(&mut self, epoch: u64, duration: f64) {
        let effects = self.session.write().transport_loaded(epoch, duration);
        self.apply(effects);
    }

    pub fn play_settled(&mut self, epoch: u64, ok: bool) {
        let effects = self.session.write().play_settled(epoch, ok);
        self.apply(effects);
    }

    pub fn position_changed(&mut self, secs: f64) {
        let effects = self.session.write().position_changed(secs);
        self.apply(effects);
    }

    pub fn duration_changed(&mut self, duration: f64) {
        let effects = self.session.write().duration_changed(duration);
        self.apply(effects);
    }

    pub fn ended(&mut self) {
        let effects = self.session.write().ended();
        self.apply(effects);
    }

    pub fn transport_error(&mut self, message: impl Into<String>) {
        let effects = self.session.write().transport_error(message);
        self.apply(effects);
    }

    /// Monotonic count of end-of-track next requests; the shell watches
    /// this to advance the selection.
    pub fn next_request_count(&self) -> Signal<u64> {
        self.next_requests
    }

    pub fn pending_commands(&self) -> Signal<Vec<TransportCommand>> {
        self.pending_commands
    }
}

/// Initialize the global audio element once.
#[cfg(target_arch = "wasm32")]
fn get_or_create_audio_element() -> Option<HtmlAudioElement> {
    let document = window()?.document()?;

    if let Some(existing) = document.get_element_by_id("tilawah-audio") {
        return existing.dyn_into::<HtmlAudioElement>().ok();
    }

    let audio: HtmlAudioElement = document.create_element("audio").ok()?.dyn_into().ok()?;
    audio.set_id("tilawah-audio");
    audio.set_attribute("preload", "metadata").ok()?;
    document.body()?.append_child(&audio).ok()?;

    Some(audio)
}

#[cfg(target_arch = "wasm32")]
fn web_playback_error_message(audio: &HtmlAudioElement) -> Option<String> {
    let audio_js = wasm_bindgen::JsValue::from(audio.clone());
    let error_js = js_sys::Reflect::get(&audio_js, &"error".into()).ok()?;
    if error_js.is_null() || error_js.is_undefined() {
        return None;
    }
    let code = js_sys::Reflect::get(&error_js, &"code".into())
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0) as u16;

    Some(match code {
        1 => "Playback was aborted before the recitation loaded.".to_string(),
        2 => "Network error while loading this recitation.".to_string(),
        3 => "Audio playback failed due to a decode error.".to_string(),
        4 => "Failed to load audio because no supported source was found.".to_string(),
        _ => "Unable to load this audio source.".to_string(),
    })
}

#[cfg(target_arch = "wasm32")]
fn apply_command(audio: &HtmlAudioElement, command: TransportCommand, mut handle: PlaybackHandle) {
    match command {
        TransportCommand::Load { url } => {
            audio.set_src(&url);
            audio.load();
        }
        TransportCommand::Play => {
            let epoch = handle.session.peek().epoch();
            match audio.play() {
                Ok(promise) => {
                    spawn(async move {
                        let ok = wasm_bindgen_futures::JsFuture::from(promise).await.is_ok();
                        handle.play_settled(epoch, ok);
                    });
                }
                Err(_) => handle.play_settled(epoch, false),
            }
        }
        TransportCommand::Pause => {
            let _ = audio.pause();
        }
        TransportCommand::Seek(secs) => {
            audio.set_current_time(secs);
        }
        TransportCommand::SetVolume(volume) => {
            audio.set_volume(volume);
        }
        TransportCommand::ClearSource => {
            let _ = audio.pause();
            let _ = audio.remove_attribute("src");
            audio.load();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[component]
pub fn AudioController() -> Element {
    let mut handle = use_context::<PlaybackHandle>();

    // Drain queued transport commands as they appear.
    use_effect(move || {
        let mut pending = handle.pending_commands();
        let commands = pending();
        if commands.is_empty() {
            return;
        }
        pending.write().clear();

        let Some(audio) = get_or_create_audio_element() else {
            return;
        };
        for command in commands {
            apply_command(&audio, command, handle);
        }
    });

    // 200ms observation loop: position, metadata readiness, errors, ended.
    use_effect(move || {
        if get_or_create_audio_element().is_none() {
            return;
        }

        spawn(async move {
            let mut last_emit = 0.0f64;
            let mut last_duration = -1.0f64;
            let mut ended_reported = false;

            loop {
                gloo_timers::future::TimeoutFuture::new(200).await;

                let Some(audio) = get_or_create_audio_element() else {
                    continue;
                };
                if handle.session.peek().selection().is_none() {
                    ended_reported = false;
                    continue;
                }
                let epoch = handle.session.peek().epoch();

                if let Some(message) = web_playback_error_message(&audio) {
                    if handle.session.peek().error() != Some(message.as_str()) {
                        handle.transport_error(message);
                    }
                    continue;
                }

                // HAVE_METADATA and above means duration is known.
                if handle.session.peek().state() == TransportState::Loading
                    && audio.ready_state() >= 1
                {
                    handle.transport_loaded(epoch, audio.duration());
                }

                let time = audio.current_time();
                if (time - last_emit).abs() >= 0.2 {
                    last_emit = time;
                    handle.position_changed(time);
                }

                let dur = audio.duration();
                if dur.is_finite() && (dur - last_duration).abs() > 0.5 {
                    last_duration = dur;
                    handle.duration_changed(dur);
                }

                if audio.ended() {
                    if !ended_reported {
                        ended_reported = true;
                        handle.ended();
                    }
                } else {
                    ended_reported = false;
                }
            }
        });
    });

    rsx! {}
}

#[cfg(not(target_arch = "wasm32"))]
#[component]
pub fn AudioController() -> Element {
    rsx! {}
}
