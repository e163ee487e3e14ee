//! Game state and core simulation types
//!
//! Everything a match needs lives in [`GameState`]; restarting a match means
//! building a fresh one from the same [`MatchConfig`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Aabb, Arena};
use crate::consts::*;

/// Slot index of a combatant (0, 1, or 2)
pub type CombatantId = usize;

/// Cardinal facing / travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector in screen space (y grows downward)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// Dominant-axis direction of a displacement (None for zero)
    pub fn from_displacement(d: Vec2) -> Option<Self> {
        if d == Vec2::ZERO {
            return None;
        }
        Some(if d.x.abs() >= d.y.abs() {
            if d.x < 0.0 { Direction::Left } else { Direction::Right }
        } else if d.y < 0.0 {
            Direction::Up
        } else {
            Direction::Down
        })
    }
}

/// Who drives a combatant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Controller {
    Human,
    Ai,
}

/// Match mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchMode {
    /// Two humans
    #[default]
    Duo,
    /// One human against the computer
    Solo,
    /// Two humans plus a computer-controlled third combatant
    Trio,
}

impl MatchMode {
    pub fn participant_count(self) -> usize {
        match self {
            MatchMode::Duo | MatchMode::Solo => 2,
            MatchMode::Trio => 3,
        }
    }

    pub fn controller_for(self, slot: CombatantId) -> Controller {
        match (self, slot) {
            (MatchMode::Solo, 1) | (MatchMode::Trio, 2) => Controller::Ai,
            _ => Controller::Human,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Duo => "duo",
            MatchMode::Solo => "solo",
            MatchMode::Trio => "trio",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "duo" | "2p" => Some(MatchMode::Duo),
            "solo" | "1p" => Some(MatchMode::Solo),
            "trio" | "3p" => Some(MatchMode::Trio),
            _ => None,
        }
    }
}

/// Immutable per-match setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub mode: MatchMode,
    /// Display names by slot (AI slots are always "Computer")
    pub names: Vec<String>,
    pub arena: Arena,
    /// Keep the match clock (and so pending cooldowns) running while paused
    #[serde(default)]
    pub cooldowns_run_while_paused: bool,
}

impl MatchConfig {
    /// Build a config, substituting defaults for blank human names
    pub fn new(mode: MatchMode, p1_name: &str, p2_name: &str, arena: Arena) -> Self {
        let pick = |raw: &str, default: &str| {
            if raw.trim().is_empty() {
                default.to_string()
            } else {
                raw.to_string()
            }
        };
        let names = (0..mode.participant_count())
            .map(|slot| match (mode.controller_for(slot), slot) {
                (Controller::Ai, _) => AI_NAME.to_string(),
                (Controller::Human, 0) => pick(p1_name, DEFAULT_P1_NAME),
                (Controller::Human, _) => pick(p2_name, DEFAULT_P2_NAME),
            })
            .collect();
        Self {
            mode,
            names,
            arena,
            cooldowns_run_while_paused: false,
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new(MatchMode::Duo, "", "", Arena::default())
    }
}

/// One participant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub controller: Controller,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub health: u32,
    pub shield: f32,
    pub shield_active: bool,
    /// Match time (ms) at which a broken shield may recharge again
    pub shield_broken_until: Option<f64>,
    /// Fire latch for humans; cleared on fire, restored on key release
    pub can_shoot: bool,
    /// Match time (ms) at which the AI may fire again
    pub fire_ready_at: f64,
    pub facing: Direction,
}

impl Combatant {
    pub fn new(id: CombatantId, name: String, controller: Controller, pos: Vec2, facing: Direction) -> Self {
        Self {
            id,
            name,
            controller,
            pos,
            size: Vec2::splat(COMBATANT_SIZE),
            health: MAX_HEALTH,
            shield: MAX_SHIELD,
            shield_active: false,
            shield_broken_until: None,
            can_shoot: true,
            fire_ready_at: 0.0,
            facing,
        }
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.aabb().center()
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    #[inline]
    pub fn is_ai(&self) -> bool {
        self.controller == Controller::Ai
    }

    #[inline]
    pub fn shield_broken(&self) -> bool {
        self.shield_broken_until.is_some()
    }

    /// Subtract damage, saturating at zero. Returns remaining health.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }
}

/// A live projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub dir: Direction,
    pub speed: f32,
    pub owner: CombatantId,
    pub radius: f32,
}

impl Projectile {
    /// Move one speed-step along the fixed direction
    pub fn advance(&mut self) {
        self.pos += self.dir.unit() * self.speed;
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Active,
    Paused,
    Concluded,
}

/// Terminal result of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Winner(CombatantId),
    /// Nobody left standing after the deciding tick
    Draw,
}

/// Fire-and-forget notifications for audio/UI consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired { owner: CombatantId, projectile: u32 },
    Hit { target: CombatantId, shooter: CombatantId, health: u32 },
    ShieldBroken { combatant: CombatantId },
    Eliminated { combatant: CombatantId },
    Paused,
    Resumed,
    MatchConcluded { outcome: MatchOutcome },
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: MatchConfig,
    pub arena: Arena,
    /// Match clock in milliseconds; cooldown deadlines are measured against it
    pub clock_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub outcome: Option<MatchOutcome>,
    /// Combatants in slot order
    pub combatants: Vec<Combatant>,
    /// Live projectiles in spawn order
    pub projectiles: Vec<Projectile>,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a fresh match
    pub fn new(config: MatchConfig) -> Self {
        let arena = config.arena;
        let y = arena.height / 2.0 - COMBATANT_SIZE / 2.0;
        // Slots come from the mode; a hand-edited config may carry too few or too many names
        let combatants = SPAWN_X
            .iter()
            .take(config.mode.participant_count())
            .enumerate()
            .map(|(slot, &x)| {
                let facing = if slot == 0 { Direction::Right } else { Direction::Left };
                let controller = config.mode.controller_for(slot);
                let name = config.names.get(slot).cloned().unwrap_or_else(|| match controller {
                    Controller::Ai => AI_NAME.to_string(),
                    Controller::Human => format!("Player {}", slot + 1),
                });
                Combatant::new(slot, name, controller, Vec2::new(x, y), facing)
            })
            .collect();

        Self {
            config,
            arena,
            clock_ms: 0.0,
            time_ticks: 0,
            phase: GamePhase::Active,
            outcome: None,
            combatants,
            projectiles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn mode(&self) -> MatchMode {
        self.config.mode
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Display name of the winner, if the match has one
    pub fn winner_name(&self) -> Option<&str> {
        match self.outcome? {
            MatchOutcome::Winner(id) => self.combatants.get(id).map(|c| c.name.as_str()),
            MatchOutcome::Draw => None,
        }
    }
}
