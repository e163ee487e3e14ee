//! Movement resolution with collision rollback
//!
//! Axes are resolved separately, x before y. When a step makes the primary
//! pair (slots 0 and 1) collide, both members roll back on that axis. The AI
//! moves after the human passes; a third, AI-driven combatant is then checked
//! against each human and both bodies roll back to their pre-tick position.

use glam::Vec2;

use super::ai;
use super::geometry::overlaps;
use super::state::{CombatantId, Controller, Direction, GameState};
use super::tick::{PlayerInput, TickInput};
use crate::consts::MOVE_SPEED;

/// Slot of the combatant resolved in the third-entity pass
const THIRD_SLOT: CombatantId = 2;

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// Mirror held shield keys and update facing for every living human
pub fn apply_controls(state: &mut GameState, input: &TickInput) {
    for c in state.combatants.iter_mut() {
        if c.controller != Controller::Human || !c.is_alive() {
            continue;
        }
        let Some(keys) = input.player(c.id) else { continue };
        c.shield_active = keys.shield;
        if let Some(dir) = held_direction(keys) {
            c.facing = dir;
        }
    }
}

/// Facing implied by held keys: up, down, left, right in priority order
fn held_direction(keys: &PlayerInput) -> Option<Direction> {
    if keys.up {
        Some(Direction::Up)
    } else if keys.down {
        Some(Direction::Down)
    } else if keys.left {
        Some(Direction::Left)
    } else if keys.right {
        Some(Direction::Right)
    } else {
        None
    }
}

/// Resolve one tick of movement for all combatants, AI included
pub fn resolve_movement(state: &mut GameState, input: &TickInput) {
    let start: Vec<Vec2> = state.combatants.iter().map(|c| c.pos).collect();
    let intents: Vec<Vec2> = state
        .combatants
        .iter()
        .map(|c| {
            match input.player(c.id) {
                Some(keys) if c.controller == Controller::Human && c.is_alive() => {
                    human_intent(state, c.id, keys)
                }
                _ => Vec2::ZERO,
            }
        })
        .collect();

    axis_pass(state, &intents, &start, Axis::X);
    axis_pass(state, &intents, &start, Axis::Y);

    ai::update_ai(state);

    if state.combatants.len() > THIRD_SLOT {
        third_entity_pass(state, &start);
    }
}

/// Proposed per-axis displacement from held keys
///
/// A step is taken only if the box ends up fully inside the arena on that axis.
fn human_intent(state: &GameState, id: CombatantId, keys: &PlayerInput) -> Vec2 {
    let c = &state.combatants[id];
    let arena = state.arena;
    let mut d = Vec2::ZERO;
    if keys.left && c.pos.x - MOVE_SPEED >= 0.0 {
        d.x = -MOVE_SPEED;
    }
    if keys.right && c.pos.x + c.size.x + MOVE_SPEED <= arena.width {
        d.x = MOVE_SPEED;
    }
    if keys.up && c.pos.y - MOVE_SPEED >= 0.0 {
        d.y = -MOVE_SPEED;
    }
    if keys.down && c.pos.y + c.size.y + MOVE_SPEED <= arena.height {
        d.y = MOVE_SPEED;
    }
    d
}

fn axis_pass(state: &mut GameState, intents: &[Vec2], start: &[Vec2], axis: Axis) {
    for (c, d) in state.combatants.iter_mut().zip(intents) {
        match axis {
            Axis::X => c.pos.x += d.x,
            Axis::Y => c.pos.y += d.y,
        }
    }

    if pair_collides(state, 0, 1) {
        for id in [0, 1] {
            let c = &mut state.combatants[id];
            match axis {
                Axis::X => c.pos.x = start[id].x,
                Axis::Y => c.pos.y = start[id].y,
            }
        }
    }
}

/// Check the third combatant against slot 0, then slot 1; a colliding pair
/// returns to its pre-tick positions.
///
/// A rollback can land a body on one that already moved, so the checks
/// repeat (primary pair included) until nothing collides. Each reverting
/// round returns at least one more body to its pre-tick spot.
fn third_entity_pass(state: &mut GameState, start: &[Vec2]) {
    for _ in 0..state.combatants.len() {
        let mut settled = true;
        for (a, b) in [(THIRD_SLOT, 0), (THIRD_SLOT, 1), (0, 1)] {
            if pair_collides(state, a, b) {
                state.combatants[a].pos = start[a];
                state.combatants[b].pos = start[b];
                settled = false;
            }
        }
        if settled {
            break;
        }
    }
}

/// Both combatants exist, are alive, and their boxes overlap
fn pair_collides(state: &GameState, a: CombatantId, b: CombatantId) -> bool {
    match (state.combatants.get(a), state.combatants.get(b)) {
        (Some(ca), Some(cb)) => ca.is_alive() && cb.is_alive() && overlaps(&ca.aabb(), &cb.aabb()),
        _ => false,
    }
}
