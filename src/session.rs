//! Frame-driven game loop
//!
//! A [`Session`] owns one match plus everything around it: the frame clock,
//! the input tracker and the audio sink. The host calls [`Session::frame`]
//! once per redraw and stops scheduling frames once it reports the match is
//! over. Restart throws the whole match state away and builds a new one.

use crate::audio::AudioManager;
use crate::platform::{Clock, InputTracker, Key};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, MatchConfig, RenderSnapshot, tick};

pub struct Session {
    config: MatchConfig,
    state: GameState,
    input: InputTracker,
    clock: Box<dyn Clock>,
    audio: AudioManager,
    last_frame_ms: f64,
    /// Pause requested by the host (focus loss) for the next frame
    pending_pause: bool,
}

impl Session {
    pub fn new(config: MatchConfig, input: InputTracker, clock: Box<dyn Clock>, audio: AudioManager) -> Self {
        log::info!("Starting {} match: {}", config.mode.as_str(), config.names.join(" vs "));
        let last_frame_ms = clock.now_ms();
        let mut session = Self {
            state: GameState::new(config.clone()),
            config,
            input,
            clock,
            audio,
            last_frame_ms,
            pending_pause: false,
        };
        session.audio.start_music();
        session
    }

    /// Build a session from settings (controls, audio levels, match setup)
    pub fn from_settings(settings: &Settings, clock: Box<dyn Clock>, mut audio: AudioManager) -> Self {
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_music_volume(settings.music_volume);
        audio.set_muted(settings.muted);
        Self::new(settings.match_config(), InputTracker::new(settings.controls), clock, audio)
    }

    pub fn key_down(&mut self, key: Key) {
        self.input.key_down(key);
    }

    pub fn key_up(&mut self, key: Key) {
        self.input.key_up(key);
    }

    /// Window lost focus: drop held keys and pause a running match
    pub fn focus_lost(&mut self) {
        self.input.release_all();
        if self.state.phase == GamePhase::Active {
            self.pending_pause = true;
            log::info!("Auto-paused (focus lost)");
        }
    }

    /// Run one tick; returns the events it produced
    pub fn frame(&mut self) -> Vec<GameEvent> {
        let now = self.clock.now_ms();
        let dt = (now - self.last_frame_ms).max(0.0);
        self.last_frame_ms = now;

        let mut input = self.input.snapshot();
        if std::mem::take(&mut self.pending_pause) && self.state.phase == GamePhase::Active {
            // A user pause on the same frame would cancel this one out
            input.pause = true;
        }

        tick(&mut self.state, &input, dt);

        let events = self.state.drain_events();
        self.audio.handle_events(&events);
        events
    }

    /// False once the match has concluded; the host stops scheduling frames
    pub fn is_running(&self) -> bool {
        self.state.phase != GamePhase::Concluded
    }

    /// Discard the match and start over with the same setup
    pub fn restart(&mut self) {
        log::info!("Restarting {} match", self.config.mode.as_str());
        self.state = GameState::new(self.config.clone());
        self.input.release_all();
        self.input.clear_edges();
        self.pending_pause = false;
        self.last_frame_ms = self.clock.now_ms();
        self.audio.start_music();
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
