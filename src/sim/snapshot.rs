//! Read-only view of the match for renderers and HUDs

use glam::Vec2;
use serde::Serialize;

use super::shield::{ShieldState, shield_state};
use super::state::{CombatantId, Direction, GamePhase, GameState};

#[derive(Debug, Clone, Serialize)]
pub struct CombatantView {
    pub id: CombatantId,
    pub name: String,
    pub is_ai: bool,
    pub pos: Vec2,
    pub size: Vec2,
    pub health: u32,
    pub shield: f32,
    pub shield_active: bool,
    pub shield_broken: bool,
    pub shield_state: ShieldState,
    pub facing: Direction,
    pub alive: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub radius: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub combatants: Vec<CombatantView>,
    pub projectiles: Vec<ProjectileView>,
    /// Set once the match is concluded with a single survivor
    pub winner: Option<String>,
    pub draw: bool,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let combatants = state
            .combatants
            .iter()
            .map(|c| CombatantView {
                id: c.id,
                name: c.name.clone(),
                is_ai: c.is_ai(),
                pos: c.pos,
                size: c.size,
                health: c.health,
                shield: c.shield,
                shield_active: c.shield_active,
                shield_broken: c.shield_broken(),
                shield_state: shield_state(c),
                facing: c.facing,
                alive: c.is_alive(),
            })
            .collect();

        let projectiles = state
            .projectiles
            .iter()
            .map(|p| ProjectileView {
                pos: p.pos,
                radius: p.radius,
            })
            .collect();

        Self {
            tick: state.time_ticks,
            phase: state.phase,
            combatants,
            projectiles,
            winner: state.winner_name().map(str::to_string),
            draw: state.phase == GamePhase::Concluded && state.winner_name().is_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Arena;
    use crate::sim::state::{MatchConfig, MatchMode};

    #[test]
    fn test_snapshot_keeps_eliminated_combatants() {
        let mut state = GameState::new(MatchConfig::new(MatchMode::Trio, "", "", Arena::default()));
        state.combatants[1].health = 0;
        let snap = RenderSnapshot::capture(&state);
        assert_eq!(snap.combatants.len(), 3);
        assert!(!snap.combatants[1].alive);
        assert!(snap.combatants[2].is_ai);
        assert_eq!(snap.winner, None);
        assert!(!snap.draw);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(MatchConfig::default());
        let json = serde_json::to_value(RenderSnapshot::capture(&state)).expect("serialize");
        assert_eq!(json["phase"], "Active");
        assert_eq!(json["combatants"][0]["name"], "Player 1");
        assert_eq!(json["combatants"][1]["health"], 100);
    }
}
