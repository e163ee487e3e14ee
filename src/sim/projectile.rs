//! Projectile spawning, flight, and hit resolution
//!
//! Projectiles fly in a straight cardinal line at a fixed speed. Each one is
//! destroyed when it leaves the arena or on its first hit against anyone
//! other than its owner; hit tests run in slot order so the first match wins.

use super::state::{CombatantId, Controller, GameEvent, GameState, Projectile};
use super::tick::TickInput;
use crate::consts::*;

/// Spawn a projectile at the owner's box center, traveling along its facing
pub fn spawn_projectile(state: &mut GameState, owner: CombatantId) -> u32 {
    let id = state.next_entity_id();
    let shooter = &state.combatants[owner];
    let projectile = Projectile {
        id,
        pos: shooter.center(),
        dir: shooter.facing,
        speed: PROJECTILE_SPEED,
        owner,
        radius: PROJECTILE_RADIUS,
    };
    log::debug!("{} fired projectile {} heading {:?}", shooter.name, id, projectile.dir);
    state.projectiles.push(projectile);
    state.emit(GameEvent::ShotFired { owner, projectile: id });
    id
}

/// Edge-triggered human fire with a release-gated latch
///
/// A press fires only if the latch is set. Any release since the last tick
/// re-arms the latch before the press is looked at, so release-and-press
/// between two ticks still counts as a new shot; holding the key never
/// auto-repeats.
pub fn handle_human_fire(state: &mut GameState, input: &TickInput) {
    for id in 0..state.combatants.len() {
        let c = &mut state.combatants[id];
        if c.controller != Controller::Human || !c.is_alive() {
            continue;
        }
        let Some(keys) = input.player(id).copied() else { continue };

        if keys.fire_released {
            c.can_shoot = true;
        }
        if keys.fire_pressed && c.can_shoot {
            c.can_shoot = false;
            spawn_projectile(state, id);
        }
        if !keys.fire_held {
            state.combatants[id].can_shoot = true;
        }
    }
}

/// Advance all projectiles, prune those out of bounds, and apply hits
pub fn update_projectiles(state: &mut GameState) {
    let arena = state.arena;
    let mut survivors = Vec::with_capacity(state.projectiles.len());

    for mut p in std::mem::take(&mut state.projectiles) {
        p.advance();
        if !arena.contains(p.pos) {
            continue;
        }

        let victim = state
            .combatants
            .iter()
            .position(|c| c.id != p.owner && c.is_alive() && c.aabb().contains_point(p.pos));

        match victim {
            Some(target) => {
                let health = state.combatants[target].apply_damage(PROJECTILE_DAMAGE);
                log::debug!("Projectile {} from {} hit {} ({} hp left)", p.id, p.owner, target, health);
                state.emit(GameEvent::Hit {
                    target,
                    shooter: p.owner,
                    health,
                });
                if health == 0 {
                    // Bodies keep their last pose, minus a raised shield
                    state.combatants[target].shield_active = false;
                    log::info!("{} eliminated", state.combatants[target].name);
                    state.emit(GameEvent::Eliminated { combatant: target });
                }
            }
            None => survivors.push(p),
        }
    }

    state.projectiles = survivors;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Arena;
    use crate::sim::state::{Direction, MatchConfig, MatchMode};
    use glam::Vec2;

    fn trio() -> GameState {
        GameState::new(MatchConfig::new(MatchMode::Trio, "", "", Arena::new(1280.0, 720.0)))
    }

    fn shoot(state: &mut GameState, owner: CombatantId, pos: Vec2, dir: Direction) {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos,
            dir,
            speed: PROJECTILE_SPEED,
            owner,
            radius: PROJECTILE_RADIUS,
        });
    }

    #[test]
    fn test_spawn_at_center_along_facing() {
        let mut state = trio();
        state.combatants[1].facing = Direction::Up;
        spawn_projectile(&mut state, 1);
        let p = &state.projectiles[0];
        assert_eq!(p.pos, state.combatants[1].center());
        assert_eq!(p.dir, Direction::Up);
        assert_eq!(p.owner, 1);
        assert!(matches!(state.events[0], GameEvent::ShotFired { owner: 1, .. }));
    }

    #[test]
    fn test_exit_destroys_without_damage() {
        let mut state = trio();
        shoot(&mut state, 0, Vec2::new(1275.0, 10.0), Direction::Right);
        update_projectiles(&mut state);
        assert!(state.projectiles.is_empty());
        assert!(state.combatants.iter().all(|c| c.health == MAX_HEALTH));
    }

    #[test]
    fn test_owner_is_never_hit() {
        let mut state = trio();
        let inside = state.combatants[0].center();
        shoot(&mut state, 0, inside, Direction::Down);
        update_projectiles(&mut state);
        assert_eq!(state.combatants[0].health, MAX_HEALTH);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_first_hit_in_slot_order() {
        let mut state = trio();
        // Stack slots 1 and 2 on the same spot; only slot 1 takes the hit
        let spot = Vec2::new(400.0, 200.0);
        state.combatants[1].pos = spot;
        state.combatants[2].pos = spot;
        shoot(&mut state, 0, spot + Vec2::new(10.0, 20.0), Direction::Right);
        update_projectiles(&mut state);

        assert_eq!(state.combatants[1].health, MAX_HEALTH - PROJECTILE_DAMAGE);
        assert_eq!(state.combatants[2].health, MAX_HEALTH);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.events, vec![GameEvent::Hit { target: 1, shooter: 0, health: 90 }]);
    }

    #[test]
    fn test_dead_combatants_are_not_hit() {
        let mut state = trio();
        let spot = Vec2::new(400.0, 200.0);
        state.combatants[1].pos = spot;
        state.combatants[1].health = 0;
        state.combatants[2].pos = spot;
        shoot(&mut state, 0, spot + Vec2::new(10.0, 20.0), Direction::Right);
        update_projectiles(&mut state);
        assert_eq!(state.combatants[2].health, 90);
    }

    #[test]
    fn test_elimination_event() {
        let mut state = trio();
        state.combatants[1].health = 10;
        let spot = state.combatants[1].center() - Vec2::new(10.0, 0.0);
        shoot(&mut state, 2, spot, Direction::Right);
        update_projectiles(&mut state);
        assert_eq!(state.combatants[1].health, 0);
        assert!(state.events.contains(&GameEvent::Eliminated { combatant: 1 }));
    }

    #[test]
    fn test_eliminated_combatant_drops_shield() {
        let mut state = trio();
        state.combatants[1].health = 10;
        state.combatants[1].shield_active = true;
        let spot = state.combatants[1].center() - Vec2::new(10.0, 0.0);
        shoot(&mut state, 0, spot, Direction::Right);
        update_projectiles(&mut state);
        assert!(!state.combatants[1].is_alive());
        assert!(!state.combatants[1].shield_active);
        assert_eq!(crate::sim::shield_state(&state.combatants[1]), crate::sim::ShieldState::Idle);
    }

    fn fire_keys(pressed: bool, released: bool, held: bool) -> TickInput {
        let mut input = TickInput::default();
        input.players[0].fire_pressed = pressed;
        input.players[0].fire_released = released;
        input.players[0].fire_held = held;
        input
    }

    #[test]
    fn test_release_and_press_between_ticks_fires_again() {
        let mut state = trio();
        handle_human_fire(&mut state, &fire_keys(true, false, true));
        assert_eq!(state.projectiles.len(), 1);

        // Key went up and down again before the next tick
        handle_human_fire(&mut state, &fire_keys(true, true, true));
        assert_eq!(state.projectiles.len(), 2);

        // Still held: nothing more
        handle_human_fire(&mut state, &fire_keys(false, false, true));
        assert_eq!(state.projectiles.len(), 2);
        assert!(!state.combatants[0].can_shoot);
    }
}
