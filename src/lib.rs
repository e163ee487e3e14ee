//! Arena Duel - a 2-3 combatant arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, projectiles, shields, AI, victory)
//! - `platform`: Clock and key-event abstraction
//! - `audio`: Event to sound-effect mapping
//! - `settings`: Match and audio configuration
//! - `session`: Frame-driven game loop owning the simulation

pub mod audio;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::Session;
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal frame interval (ms) used by the headless demo clock
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 720.0;

    /// Combatant box size
    pub const COMBATANT_SIZE: f32 = 40.0;
    /// Spawn x coordinates by slot
    pub const SPAWN_X: [f32; 3] = [100.0, 600.0, 1100.0];
    /// Units moved per tick per axis (also the AI's max speed)
    pub const MOVE_SPEED: f32 = 5.0;
    /// Early-collision margin added on every side of a box
    pub const COLLISION_MARGIN: f32 = 5.0;

    pub const MAX_HEALTH: u32 = 100;
    pub const MAX_SHIELD: f32 = 100.0;
    /// Shield drained per tick while raised
    pub const SHIELD_DRAIN: f32 = 0.5;
    /// Shield restored per tick while lowered
    pub const SHIELD_RECHARGE: f32 = 0.2;
    /// Recharge lockout after a shield break
    pub const SHIELD_BREAK_COOLDOWN_MS: f64 = 3000.0;

    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    pub const PROJECTILE_DAMAGE: u32 = 10;

    /// Proportional gain from target offset to AI displacement
    pub const AI_PURSUIT_FACTOR: f32 = 0.3;
    /// AI only fires at targets closer than this
    pub const AI_FIRE_RANGE: f32 = 300.0;
    pub const AI_FIRE_COOLDOWN_MS: f64 = 50.0;

    pub const DEFAULT_P1_NAME: &str = "Player 1";
    pub const DEFAULT_P2_NAME: &str = "Player 2";
    pub const AI_NAME: &str = "Computer";
}

/// Clamp each component of `v` to [-max, max]
#[inline]
pub fn clamp_components(v: Vec2, max: f32) -> Vec2 {
    Vec2::new(v.x.clamp(-max, max), v.y.clamp(-max, max))
}
