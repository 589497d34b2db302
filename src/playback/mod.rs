//! Playback session state machine.
//!
//! Pure and transport-agnostic: every input method returns the commands the
//! audio transport must apply and the signals the UI should route. Exactly
//! one component owns the underlying audio element and is the only code
//! that applies [`TransportCommand`]s to it.
//!
//! Concurrency is serialized two ways. Selection changes bump an epoch, and
//! every asynchronous completion carries the epoch it was issued under;
//! completions from an older epoch are discarded, so the last selection
//! always wins. Transport mutations (play attempts) are additionally
//! guarded by a single in-flight latch so overlapping play/pause taps
//! cannot race the element.

use crate::api::models::{construct_audio_url, Qari};

/// Minimum seconds of audio attributed to one verse when estimating the
/// currently recited verse from elapsed time.
const MIN_VERSE_INTERVAL_SECS: f64 = 5.0;
/// A chapter is modeled as roughly twenty estimation segments.
const VERSE_SEGMENTS: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    Idle,
    Loading,
    Ready,
    Playing,
    Paused,
    Error,
}

/// Identity of the loaded resource, used to tag async completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionKey {
    pub qari_id: u32,
    pub surah_id: u32,
}

/// Mutations for the owning transport to apply to the audio element.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportCommand {
    Load { url: String },
    Play,
    Pause,
    Seek(f64),
    SetVolume(f64),
    ClearSource,
}

/// Notifications for the app shell.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionSignal {
    PlayingChanged(bool),
    VerseChanged(u32),
    /// The track finished without repeat; the shell decides where to go.
    NextRequested,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Effects {
    pub commands: Vec<TransportCommand>,
    pub signals: Vec<SessionSignal>,
}

impl Effects {
    pub fn none() -> Self {
        Self::default()
    }

    fn command(mut self, command: TransportCommand) -> Self {
        self.commands.push(command);
        self
    }

    fn signal(mut self, signal: SessionSignal) -> Self {
        self.signals.push(signal);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.signals.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSession {
    state: TransportState,
    selection: Option<SelectionKey>,
    media_url: Option<String>,
    epoch: u64,
    elapsed: f64,
    duration: f64,
    volume: f64,
    muted: bool,
    volume_before_mute: f64,
    repeat: bool,
    op_in_flight: bool,
    last_verse: u32,
    error: Option<String>,
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::new(0.7)
    }
}

impl PlaybackSession {
    pub fn new(volume: f64) -> Self {
        let volume = volume.clamp(0.0, 1.0);
        Self {
            state: TransportState::Idle,
            selection: None,
            media_url: None,
            epoch: 0,
            elapsed: 0.0,
            duration: 0.0,
            volume,
            muted: false,
            volume_before_mute: volume,
            repeat: false,
            op_in_flight: false,
            last_verse: 0,
            error: None,
        }
    }

    // Accessors

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn selection(&self) -> Option<SelectionKey> {
        self.selection
    }

    pub fn media_url(&self) -> Option<&str> {
        self.media_url.as_deref()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn remaining(&self) -> f64 {
        (self.duration - self.elapsed).max(0.0)
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Volume the transport should actually run at.
    pub fn effective_volume(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }

    /// The explicit mute flag only; a zeroed slider does not set it.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Muted for display purposes: the explicit flag or a zeroed slider.
    pub fn is_display_muted(&self) -> bool {
        self.muted || self.volume == 0.0
    }

    pub fn repeat_enabled(&self) -> bool {
        self.repeat
    }

    pub fn is_playing(&self) -> bool {
        self.state == TransportState::Playing
    }

    pub fn current_verse(&self) -> u32 {
        self.last_verse
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Transport controls are usable only with a loadable resource and no
    /// terminal error.
    pub fn controls_enabled(&self) -> bool {
        self.selection.is_some() && self.state != TransportState::Error
    }

    // Inputs

    /// Switch to a new reciter/surah pair. Bumps the epoch so completions
    /// of any earlier load are discarded when they eventually arrive.
    pub fn select(&mut self, qari: &Qari, surah_id: u32, duration_hint: Option<f64>) -> Effects {
        self.epoch += 1;
        self.selection = Some(SelectionKey {
            qari_id: qari.id,
            surah_id,
        });
        let url = construct_audio_url(&qari.relative_path, surah_id);
        self.media_url = Some(url.clone());
        self.state = TransportState::Loading;
        self.elapsed = 0.0;
        self.duration = duration_hint.filter(|d| d.is_finite() && *d > 0.0).unwrap_or(0.0);
        self.op_in_flight = false;
        self.last_verse = 0;
        self.error = None;

        Effects::none()
            .command(TransportCommand::Load { url })
            .command(TransportCommand::SetVolume(self.effective_volume()))
            .signal(SessionSignal::PlayingChanged(false))
    }

    pub fn deselect(&mut self) -> Effects {
        self.epoch += 1;
        self.selection = None;
        self.media_url = None;
        self.state = TransportState::Idle;
        self.elapsed = 0.0;
        self.duration = 0.0;
        self.op_in_flight = false;
        self.last_verse = 0;
        self.error = None;

        Effects::none()
            .command(TransportCommand::ClearSource)
            .signal(SessionSignal::PlayingChanged(false))
    }

    /// The transport finished loading metadata for the given epoch. Starts
    /// the single automatic play attempt.
    pub fn transport_loaded(&mut self, epoch: u64, duration: f64) -> Effects {
        if epoch != self.epoch || self.state != TransportState::Loading {
            return Effects::none();
        }

        self.state = TransportState::Ready;
        if duration.is_finite() && duration > 0.0 {
            self.duration = duration;
        }

        // One auto-play per load, holding the latch until it settles.
        self.op_in_flight = true;
        Effects::none().command(TransportCommand::Play)
    }

    /// A play attempt resolved. `ok = false` is the autoplay-policy path:
    /// recoverable, the listener just has to press play themselves.
    pub fn play_settled(&mut self, epoch: u64, ok: bool) -> Effects {
        if epoch != self.epoch {
            return Effects::none();
        }
        self.op_in_flight = false;
        if self.state == TransportState::Error {
            return Effects::none();
        }

        if ok {
            self.state = TransportState::Playing;
            Effects::none().signal(SessionSignal::PlayingChanged(true))
        } else {
            self.state = TransportState::Paused;
            Effects::none().signal(SessionSignal::PlayingChanged(false))
        }
    }

    /// Ignored while a play attempt is pending or no resource is loaded.
    pub fn toggle_play(&mut self) -> Effects {
        if self.op_in_flight || !self.controls_enabled() {
            return Effects::none();
        }

        match self.state {
            TransportState::Playing => {
                self.state = TransportState::Paused;
                Effects::none()
                    .command(TransportCommand::Pause)
                    .signal(SessionSignal::PlayingChanged(false))
            }
            TransportState::Ready | TransportState::Paused => {
                self.op_in_flight = true;
                Effects::none().command(TransportCommand::Play)
            }
            _ => Effects::none(),
        }
    }

    /// Periodic position report from the transport. Derives the recited
    /// verse estimate; emits only changed, non-zero indices.
    pub fn position_changed(&mut self, secs: f64) -> Effects {
        if self.selection.is_none() || !secs.is_finite() {
            return Effects::none();
        }
        self.elapsed = secs.max(0.0);

        if self.duration <= 0.0 {
            return Effects::none();
        }
        let interval = (self.duration / VERSE_SEGMENTS).max(MIN_VERSE_INTERVAL_SECS);
        let estimate = (self.elapsed / interval).ceil() as u32;
        if estimate > 0 && estimate != self.last_verse {
            self.last_verse = estimate;
            return Effects::none().signal(SessionSignal::VerseChanged(estimate));
        }
        Effects::none()
    }

    pub fn duration_changed(&mut self, duration: f64) -> Effects {
        if duration.is_finite() && duration > 0.0 {
            self.duration = duration;
        }
        Effects::none()
    }

    /// The track ran out. Repeat restarts in place; otherwise the shell is
    /// asked to move on.
    pub fn ended(&mut self) -> Effects {
        if self.selection.is_none() {
            return Effects::none();
        }

        if self.repeat {
            self.elapsed = 0.0;
            self.last_verse = 0;
            let mut effects = Effects::none().command(TransportCommand::Seek(0.0));
            if !self.op_in_flight {
                self.op_in_flight = true;
                effects = effects.command(TransportCommand::Play);
            }
            effects
        } else {
            self.state = TransportState::Idle;
            self.op_in_flight = false;
            Effects::none()
                .signal(SessionSignal::PlayingChanged(false))
                .signal(SessionSignal::NextRequested)
        }
    }

    /// Optimistic: the displayed position moves immediately, the transport
    /// clamps to the real media bounds.
    pub fn seek(&mut self, secs: f64) -> Effects {
        if !self.controls_enabled() || !secs.is_finite() {
            return Effects::none();
        }
        self.elapsed = secs.max(0.0);
        Effects::none().command(TransportCommand::Seek(self.elapsed))
    }

    /// A zeroed slider reads as muted without setting the explicit flag, so
    /// raising it again restores sound directly.
    pub fn set_volume(&mut self, volume: f64) -> Effects {
        self.volume = if volume.is_finite() {
            volume.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if self.muted && self.volume > 0.0 {
            self.muted = false;
        }
        Effects::none().command(TransportCommand::SetVolume(self.effective_volume()))
    }

    pub fn toggle_mute(&mut self) -> Effects {
        if self.muted {
            self.muted = false;
            if self.volume == 0.0 {
                self.volume = self.volume_before_mute;
            }
        } else {
            self.volume_before_mute = if self.volume > 0.0 {
                self.volume
            } else {
                self.volume_before_mute
            };
            self.muted = true;
        }
        Effects::none().command(TransportCommand::SetVolume(self.effective_volume()))
    }

    pub fn toggle_repeat(&mut self) -> Effects {
        self.repeat = !self.repeat;
        Effects::none()
    }

    /// Terminal until the next `select`.
    pub fn transport_error(&mut self, message: impl Into<String>) -> Effects {
        self.state = TransportState::Error;
        self.op_in_flight = false;
        self.error = Some(message.into());
        Effects::none().signal(SessionSignal::PlayingChanged(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_qari(id: u32) -> Qari {
        Qari {
            id,
            name: "Test Reciter".to_string(),
            relative_path: "test_reciter/".to_string(),
            ..Default::default()
        }
    }

    fn loaded_session() -> PlaybackSession {
        let mut session = PlaybackSession::default();
        session.select(&test_qari(1), 1, None);
        let epoch = session.epoch();
        session.transport_loaded(epoch, 300.0);
        session.play_settled(epoch, true);
        session
    }

    #[test]
    fn select_resolves_padded_media_url() {
        let mut session = PlaybackSession::default();
        let effects = session.select(&test_qari(1), 7, None);
        assert_eq!(
            session.media_url(),
            Some("https://download.quranicaudio.com/quran/test_reciter/007.mp3")
        );
        assert!(matches!(
            effects.commands.first(),
            Some(TransportCommand::Load { .. })
        ));
        assert_eq!(session.state(), TransportState::Loading);
    }

    #[test]
    fn load_completion_triggers_exactly_one_autoplay() {
        let mut session = PlaybackSession::default();
        session.select(&test_qari(1), 1, None);
        let epoch = session.epoch();

        let effects = session.transport_loaded(epoch, 240.0);
        assert_eq!(effects.commands, vec![TransportCommand::Play]);
        assert_eq!(session.state(), TransportState::Ready);
        assert_eq!(session.duration(), 240.0);

        // A duplicate loaded report must not issue a second play.
        let effects = session.transport_loaded(epoch, 240.0);
        assert!(effects.is_empty());
    }

    #[test]
    fn stale_load_completion_is_discarded() {
        let mut session = PlaybackSession::default();
        session.select(&test_qari(1), 1, None);
        let old_epoch = session.epoch();
        session.select(&test_qari(1), 2, None);

        let effects = session.transport_loaded(old_epoch, 999.0);
        assert!(effects.is_empty());
        assert_eq!(session.duration(), 0.0);
        assert_eq!(session.state(), TransportState::Loading);
    }

    #[test]
    fn stale_play_settlement_is_discarded() {
        let mut session = PlaybackSession::default();
        session.select(&test_qari(1), 1, None);
        let old_epoch = session.epoch();
        session.transport_loaded(old_epoch, 100.0);
        session.select(&test_qari(1), 2, None);

        let effects = session.play_settled(old_epoch, true);
        assert!(effects.is_empty());
        assert_ne!(session.state(), TransportState::Playing);
    }

    #[test]
    fn autoplay_rejection_settles_to_paused() {
        let mut session = PlaybackSession::default();
        session.select(&test_qari(1), 1, None);
        let epoch = session.epoch();
        session.transport_loaded(epoch, 100.0);

        let effects = session.play_settled(epoch, false);
        assert_eq!(session.state(), TransportState::Paused);
        assert_eq!(
            effects.signals,
            vec![SessionSignal::PlayingChanged(false)]
        );
        assert!(session.controls_enabled());
    }

    #[test]
    fn toggle_play_is_inert_while_attempt_pending() {
        let mut session = PlaybackSession::default();
        session.select(&test_qari(1), 1, None);
        let epoch = session.epoch();
        session.transport_loaded(epoch, 100.0);

        // Auto-play is still settling.
        assert!(session.toggle_play().is_empty());

        session.play_settled(epoch, true);
        let effects = session.toggle_play();
        assert_eq!(effects.commands, vec![TransportCommand::Pause]);
        assert_eq!(session.state(), TransportState::Paused);

        // Resume holds the latch again until settled.
        let effects = session.toggle_play();
        assert_eq!(effects.commands, vec![TransportCommand::Play]);
        assert!(session.toggle_play().is_empty());
    }

    #[test]
    fn toggle_play_requires_a_selection() {
        let mut session = PlaybackSession::default();
        assert!(session.toggle_play().is_empty());
    }

    #[test]
    fn verse_estimate_never_emits_zero_and_only_emits_changes() {
        let mut session = loaded_session();

        // duration 300 -> interval 15s
        assert!(session.position_changed(0.0).signals.is_empty());
        let effects = session.position_changed(1.0);
        assert_eq!(effects.signals, vec![SessionSignal::VerseChanged(1)]);

        // Same verse again: silent.
        assert!(session.position_changed(5.0).signals.is_empty());

        let effects = session.position_changed(16.0);
        assert_eq!(effects.signals, vec![SessionSignal::VerseChanged(2)]);
    }

    #[test]
    fn verse_estimate_is_monotonic_for_forward_playback() {
        let mut session = loaded_session();
        let mut last = 0;
        for t in 0..300 {
            for signal in session.position_changed(t as f64).signals {
                if let SessionSignal::VerseChanged(v) = signal {
                    assert!(v > last);
                    last = v;
                }
            }
        }
        assert!(last > 0);
    }

    #[test]
    fn short_tracks_use_the_five_second_floor() {
        let mut session = PlaybackSession::default();
        session.select(&test_qari(1), 1, None);
        let epoch = session.epoch();
        session.transport_loaded(epoch, 40.0);
        session.play_settled(epoch, true);

        // 40 / 20 = 2s per segment, floored to 5s.
        let effects = session.position_changed(6.0);
        assert_eq!(effects.signals, vec![SessionSignal::VerseChanged(2)]);
    }

    #[test]
    fn ended_with_repeat_restarts_in_place() {
        let mut session = loaded_session();
        session.toggle_repeat();
        session.position_changed(299.0);

        let effects = session.ended();
        assert_eq!(
            effects.commands,
            vec![TransportCommand::Seek(0.0), TransportCommand::Play]
        );
        assert!(effects.signals.is_empty());
        assert_eq!(session.elapsed(), 0.0);
        assert_eq!(session.current_verse(), 0);
    }

    #[test]
    fn ended_without_repeat_requests_next() {
        let mut session = loaded_session();
        let effects = session.ended();
        assert!(effects.commands.is_empty());
        assert!(effects.signals.contains(&SessionSignal::NextRequested));
        assert_eq!(session.state(), TransportState::Idle);
    }

    #[test]
    fn seek_is_optimistic() {
        let mut session = loaded_session();
        let effects = session.seek(120.0);
        assert_eq!(session.elapsed(), 120.0);
        assert_eq!(session.remaining(), 180.0);
        assert_eq!(effects.commands, vec![TransportCommand::Seek(120.0)]);
    }

    #[test]
    fn zero_volume_displays_muted_without_the_flag() {
        let mut session = PlaybackSession::default();
        session.set_volume(0.0);
        assert!(session.is_display_muted());

        // Raising the slider restores sound directly.
        session.set_volume(0.5);
        assert!(!session.is_display_muted());
        assert_eq!(session.volume(), 0.5);
    }

    #[test]
    fn mute_round_trip_restores_previous_volume() {
        let mut session = PlaybackSession::default();
        session.set_volume(0.6);

        let effects = session.toggle_mute();
        assert_eq!(effects.commands, vec![TransportCommand::SetVolume(0.0)]);
        assert!(session.is_display_muted());
        assert_eq!(session.volume(), 0.6);

        let effects = session.toggle_mute();
        assert_eq!(effects.commands, vec![TransportCommand::SetVolume(0.6)]);
        assert!(!session.is_display_muted());
    }

    #[test]
    fn volume_is_clamped() {
        let mut session = PlaybackSession::default();
        session.set_volume(3.0);
        assert_eq!(session.volume(), 1.0);
        session.set_volume(-1.0);
        assert_eq!(session.volume(), 0.0);
    }

    #[test]
    fn transport_error_disables_controls_until_reselect() {
        let mut session = loaded_session();
        session.transport_error("The audio file could not be loaded");

        assert_eq!(session.state(), TransportState::Error);
        assert!(!session.controls_enabled());
        assert!(session.toggle_play().is_empty());
        assert!(session.seek(10.0).is_empty());
        assert_eq!(
            session.error(),
            Some("The audio file could not be loaded")
        );

        // A fresh selection recovers.
        session.select(&test_qari(1), 2, None);
        assert!(session.controls_enabled());
        assert!(session.error().is_none());
    }

    #[test]
    fn duration_hint_seeds_display_until_transport_reports() {
        let mut session = PlaybackSession::default();
        session.select(&test_qari(1), 1, Some(250.0));
        assert_eq!(session.duration(), 250.0);

        let epoch = session.epoch();
        session.transport_loaded(epoch, 260.0);
        assert_eq!(session.duration(), 260.0);
    }

    #[test]
    fn deselect_clears_the_transport() {
        let mut session = loaded_session();
        let effects = session.deselect();
        assert!(effects.commands.contains(&TransportCommand::ClearSource));
        assert!(session.selection().is_none());
        assert!(session.media_url().is_none());
        assert_eq!(session.state(), TransportState::Idle);
    }
}
