//! Frame-driven simulation tick
//!
//! One call advances the match by exactly one step. Order within a tick:
//! controls → human fire → movement (incl. AI) → projectiles → shields → victory.

use super::state::{GameEvent, GamePhase, GameState};
use super::{movement, projectile, shield, victory};

/// Input state of one human combatant for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Shield key currently held
    pub shield: bool,
    /// Fire key went down (fresh press, not auto-repeat) since the previous tick
    pub fire_pressed: bool,
    /// Fire key went up at least once since the previous tick
    pub fire_released: bool,
    /// Fire key currently held
    pub fire_held: bool,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Per human slot (combatant ids 0 and 1)
    pub players: [PlayerInput; 2],
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    /// Input for a combatant slot, if that slot has human controls
    pub fn player(&self, id: usize) -> Option<&PlayerInput> {
        self.players.get(id)
    }
}

/// Advance the match by one tick; `dt_ms` is the wall time since the last tick
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f64) {
    if state.phase == GamePhase::Concluded {
        return;
    }

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Active => {
                state.phase = GamePhase::Paused;
                state.emit(GameEvent::Paused);
                log::info!("Match paused at tick {}", state.time_ticks);
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Active;
                state.emit(GameEvent::Resumed);
                log::info!("Match resumed at tick {}", state.time_ticks);
            }
            GamePhase::Concluded => {}
        }
    }

    if state.phase == GamePhase::Paused {
        if state.config.cooldowns_run_while_paused {
            state.clock_ms += dt_ms;
        }
        return;
    }

    state.clock_ms += dt_ms;
    state.time_ticks += 1;

    movement::apply_controls(state, input);
    projectile::handle_human_fire(state, input);
    movement::resolve_movement(state, input);
    projectile::update_projectiles(state);
    shield::update_shields(state);

    if let Some(outcome) = victory::evaluate(state) {
        victory::conclude(state, outcome);
    }
}
