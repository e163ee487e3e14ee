//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per tick, cooldowns as deadlines on the match clock
//! - Stable iteration order (by combatant slot, projectiles by spawn order)
//! - No rendering, audio, or platform dependencies

pub mod ai;
pub mod geometry;
pub mod movement;
pub mod projectile;
pub mod shield;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod victory;

pub use ai::{TargetSelection, pursuit_step, select_target};
pub use geometry::{Aabb, Arena, overlaps};
pub use shield::{ShieldState, shield_state};
pub use snapshot::RenderSnapshot;
pub use state::{
    CombatantId, Combatant, Controller, Direction, GameEvent, GamePhase, GameState, MatchConfig,
    MatchMode, MatchOutcome, Projectile,
};
pub use tick::{PlayerInput, TickInput, tick};
