//! Arena Duel headless entry point
//!
//! Runs a demo match on a virtual 60 Hz clock. Human slots are driven by a
//! seeded bot so a given seed always replays the same match.
//!
//! Usage: `arena-duel [duo|solo|trio] [seed] [settings.json]`

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use arena_duel::Settings;
use arena_duel::audio::AudioManager;
use arena_duel::consts::FRAME_MS;
use arena_duel::platform::{ControlScheme, Key, ManualClock};
use arena_duel::session::Session;
use arena_duel::sim::{Controller, GameEvent, MatchMode};

/// Give up on demo matches that refuse to end (5 minutes of play)
const MAX_FRAMES: u32 = 60 * 60 * 5;

/// Random key-masher for one human slot
struct DemoBot {
    scheme: ControlScheme,
    held: Vec<Key>,
}

impl DemoBot {
    fn new(scheme: ControlScheme) -> Self {
        Self {
            scheme,
            held: Vec::new(),
        }
    }

    /// Release everything, then hold a fresh random set of keys
    fn act(&mut self, rng: &mut Pcg32, session: &mut Session) {
        for key in self.held.drain(..) {
            session.key_up(key);
        }

        let s = self.scheme;
        let vertical = [None, Some(s.up), Some(s.down)][rng.random_range(0..3)];
        let horizontal = [None, Some(s.left), Some(s.right)][rng.random_range(0..3)];
        let extras = [
            rng.random_bool(0.3).then_some(s.fire),
            rng.random_bool(0.1).then_some(s.shield),
        ];
        for key in [vertical, horizontal].into_iter().chain(extras).flatten() {
            session.key_down(key);
            self.held.push(key);
        }
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mode_arg = args.next();
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let mut settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    if let Some(mode) = mode_arg.as_deref() {
        match MatchMode::from_str(mode) {
            Some(mode) => settings.mode = mode,
            None => log::warn!("Unknown mode '{}', using {}", mode, settings.mode.as_str()),
        }
    }

    log::info!("Arena Duel (headless) starting, seed {}", seed);

    let clock = ManualClock::new();
    let mut session = Session::from_settings(&settings, Box::new(clock.clone()), AudioManager::default());
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut bots: Vec<DemoBot> = session
        .state()
        .combatants
        .iter()
        .filter(|c| c.controller == Controller::Human)
        .filter_map(|c| settings.controls.get(c.id).map(|scheme| DemoBot::new(*scheme)))
        .collect();

    let mut frames = 0;
    while session.is_running() && frames < MAX_FRAMES {
        // Bots change their mind every ~quarter second
        if frames.is_multiple_of(15) {
            for bot in bots.iter_mut() {
                bot.act(&mut rng, &mut session);
            }
        }

        clock.advance(FRAME_MS);
        for event in session.frame() {
            if let GameEvent::Eliminated { combatant } = event {
                log::info!("Frame {}: {} is out", frames, session.state().combatants[combatant].name);
            }
        }
        frames += 1;
    }

    if session.is_running() {
        log::info!("Demo stopped after {} frames without a winner", frames);
    }

    match serde_json::to_string_pretty(&session.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}
