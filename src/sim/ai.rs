//! Computer-controlled pursuit and firing
//!
//! Plain proportional pursuit: no pathfinding, no lead, no line-of-sight.
//! The AI fires along its facing whenever a target is in range, whether or
//! not the shot can actually connect.

use glam::Vec2;

use super::geometry::overlaps;
use super::projectile::spawn_projectile;
use super::state::{CombatantId, Controller, Direction, GameState, MatchMode};
use crate::clamp_components;
use crate::consts::*;

/// How an AI combatant picks whom to chase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSelection {
    /// Always chase one specific combatant
    Designated(CombatantId),
    /// Chase whichever living human is closest this tick
    NearestHuman,
}

impl TargetSelection {
    pub fn for_mode(mode: MatchMode) -> Self {
        match mode {
            MatchMode::Trio => TargetSelection::NearestHuman,
            MatchMode::Duo | MatchMode::Solo => TargetSelection::Designated(0),
        }
    }
}

/// Pick the pursuit target for `ai_id` (None if nobody is left to chase)
pub fn select_target(state: &GameState, ai_id: CombatantId, selection: TargetSelection) -> Option<CombatantId> {
    match selection {
        TargetSelection::Designated(id) => state
            .combatants
            .get(id)
            .filter(|c| c.id != ai_id && c.is_alive())
            .map(|c| c.id),
        TargetSelection::NearestHuman => {
            let origin = state.combatants[ai_id].center();
            let mut best: Option<(CombatantId, f32)> = None;
            for c in &state.combatants {
                if c.id == ai_id || c.controller != Controller::Human || !c.is_alive() {
                    continue;
                }
                let dist = origin.distance(c.center());
                // Later candidates win ties
                match best {
                    Some((_, best_dist)) if dist > best_dist => {}
                    _ => best = Some((c.id, dist)),
                }
            }
            best.map(|(id, _)| id)
        }
    }
}

/// Displacement for one pursuit step from `from` toward `to` (box centers)
pub fn pursuit_step(from: Vec2, to: Vec2) -> Vec2 {
    clamp_components((to - from) * AI_PURSUIT_FACTOR, MOVE_SPEED)
}

/// Move and fire every living AI combatant
pub fn update_ai(state: &mut GameState) {
    let selection = TargetSelection::for_mode(state.mode());
    let ai_ids: Vec<CombatantId> = state
        .combatants
        .iter()
        .filter(|c| c.is_ai() && c.is_alive())
        .map(|c| c.id)
        .collect();

    for ai_id in ai_ids {
        let Some(target_id) = select_target(state, ai_id, selection) else {
            continue;
        };
        let target_box = state.combatants[target_id].aabb();
        let target_center = target_box.center();
        let arena = state.arena;

        let ai = &mut state.combatants[ai_id];
        let old = ai.pos;
        let offset = target_center - ai.center();
        let step = pursuit_step(ai.center(), target_center);

        ai.pos += step;
        if overlaps(&ai.aabb(), &target_box) {
            // Only the intruder backs off
            ai.pos = old;
        }
        ai.pos = arena.clamp_box(ai.pos, ai.size);
        if let Some(dir) = Direction::from_displacement(step) {
            ai.facing = dir;
        }

        let distance = offset.length();
        if distance < AI_FIRE_RANGE && state.clock_ms >= ai.fire_ready_at {
            ai.fire_ready_at = state.clock_ms + AI_FIRE_COOLDOWN_MS;
            spawn_projectile(state, ai_id);
            log::debug!("AI {} fired at {} from {:.0} units", ai_id, target_id, distance);
        }
    }
}
