//! Shield energy state machine
//!
//! Raising the shield drains it; lowering it lets it recharge. Draining it to
//! zero breaks it, which locks out recharge until a cooldown deadline on the
//! match clock has passed.

use serde::{Deserialize, Serialize};

use super::state::{Combatant, GameEvent, GameState};
use crate::consts::*;

/// Observable shield state, derived from combatant fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShieldState {
    /// Full and lowered
    Idle,
    Depleting,
    Recharging,
    /// Emptied; no recharge until the cooldown passes
    Broken,
}

pub fn shield_state(c: &Combatant) -> ShieldState {
    if c.shield_broken() {
        ShieldState::Broken
    } else if c.shield_active && c.shield > 0.0 {
        ShieldState::Depleting
    } else if !c.shield_active && c.shield < MAX_SHIELD {
        ShieldState::Recharging
    } else {
        ShieldState::Idle
    }
}

/// Apply one tick of drain/recharge to every living combatant
pub fn update_shields(state: &mut GameState) {
    let now = state.clock_ms;
    let mut broken = Vec::new();

    for c in state.combatants.iter_mut().filter(|c| c.is_alive()) {
        if step_shield(c, now) {
            broken.push(c.id);
        }
    }

    for id in broken {
        log::debug!("Shield broken for {}", state.combatants[id].name);
        state.emit(GameEvent::ShieldBroken { combatant: id });
    }
}

/// Advance a single shield; returns true if it broke on this tick
fn step_shield(c: &mut Combatant, now: f64) -> bool {
    if c.shield_broken_until.is_some_and(|until| now >= until) {
        c.shield_broken_until = None;
    }

    if c.shield_active && c.shield > 0.0 {
        c.shield -= SHIELD_DRAIN;
        if c.shield <= 0.0 {
            c.shield = 0.0;
            c.shield_active = false;
            c.shield_broken_until = Some(now + SHIELD_BREAK_COOLDOWN_MS);
            return true;
        }
    } else if !c.shield_active && !c.shield_broken() && c.shield < MAX_SHIELD {
        c.shield = (c.shield + SHIELD_RECHARGE).min(MAX_SHIELD);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Arena;
    use crate::sim::state::{MatchConfig, MatchMode};

    fn duo() -> GameState {
        GameState::new(MatchConfig::new(MatchMode::Duo, "", "", Arena::default()))
    }

    /// One 16 ms tick with the given shield key state for slot 0
    fn run(state: &mut GameState, held: bool) {
        state.clock_ms += 16.0;
        state.combatants[0].shield_active = held;
        update_shields(state);
    }

    #[test]
    fn test_drain_and_recharge_rates() {
        let mut state = duo();
        run(&mut state, true);
        assert_eq!(state.combatants[0].shield, 99.5);
        assert_eq!(shield_state(&state.combatants[0]), ShieldState::Depleting);

        run(&mut state, false);
        assert!((state.combatants[0].shield - 99.7).abs() < 1e-4);
        assert_eq!(shield_state(&state.combatants[0]), ShieldState::Recharging);

        for _ in 0..10 {
            run(&mut state, false);
        }
        assert_eq!(state.combatants[0].shield, MAX_SHIELD);
        assert_eq!(shield_state(&state.combatants[0]), ShieldState::Idle);
    }

    #[test]
    fn test_break_emits_once_and_locks_recharge() {
        let mut state = duo();
        for _ in 0..200 {
            run(&mut state, true);
        }
        let c = &state.combatants[0];
        assert_eq!(c.shield, 0.0);
        assert!(!c.shield_active);
        assert_eq!(shield_state(c), ShieldState::Broken);
        let breaks = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::ShieldBroken { combatant: 0 }))
            .count();
        assert_eq!(breaks, 1);
    }

    #[test]
    fn test_recharge_suppressed_for_full_cooldown() {
        let mut state = duo();
        state.combatants[0].shield = 0.5;
        run(&mut state, true);
        let broke_at = state.clock_ms;
        assert!(state.combatants[0].shield_broken());

        // Key released immediately; nothing recharges until the deadline
        while state.clock_ms + 16.0 < broke_at + SHIELD_BREAK_COOLDOWN_MS {
            run(&mut state, false);
            assert_eq!(state.combatants[0].shield, 0.0);
        }

        run(&mut state, false);
        run(&mut state, false);
        assert!(!state.combatants[0].shield_broken());
        assert!(state.combatants[0].shield > 0.0);
    }

    #[test]
    fn test_held_key_on_empty_shield_is_inert() {
        let mut state = duo();
        state.combatants[0].shield = 0.0;
        run(&mut state, true);
        assert_eq!(state.combatants[0].shield, 0.0);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_dead_combatants_skip_shield_updates() {
        let mut state = duo();
        state.combatants[1].health = 0;
        state.combatants[1].shield = 40.0;
        update_shields(&mut state);
        assert_eq!(state.combatants[1].shield, 40.0);
    }
}
