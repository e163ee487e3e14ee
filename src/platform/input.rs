//! Key events to per-tick input snapshots
//!
//! Hosts forward raw key-down/key-up events; once per frame the session asks
//! for a [`TickInput`]. Movement and shield keys are level-triggered (read
//! from the held set). Fire is edge-triggered: a fresh key-down is reported
//! as a press and any key-up as a release, so a release-and-press that lands
//! between two ticks is still seen as a new press. OS auto-repeat key-downs
//! are not presses.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::sim::{PlayerInput, TickInput};

/// Every key the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    Space,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    M,
    Enter,
    P,
}

impl Key {
    /// Parse a browser-style key name (`"w"`, `"ArrowUp"`, `" "`, ...)
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name {
            "w" | "W" => Key::W,
            "a" | "A" => Key::A,
            "s" | "S" => Key::S,
            "d" | "D" => Key::D,
            "q" | "Q" => Key::Q,
            " " | "Space" => Key::Space,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "m" | "M" => Key::M,
            "Enter" => Key::Enter,
            "p" | "P" => Key::P,
            _ => return None,
        };
        Some(key)
    }
}

/// Key bindings for one human slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlScheme {
    pub up: Key,
    pub down: Key,
    pub left: Key,
    pub right: Key,
    pub fire: Key,
    pub shield: Key,
}

impl ControlScheme {
    /// WASD, Space to fire, Q for shield
    pub fn player_one() -> Self {
        Self {
            up: Key::W,
            down: Key::S,
            left: Key::A,
            right: Key::D,
            fire: Key::Space,
            shield: Key::Q,
        }
    }

    /// Arrow keys, Enter to fire, M for shield
    pub fn player_two() -> Self {
        Self {
            up: Key::ArrowUp,
            down: Key::ArrowDown,
            left: Key::ArrowLeft,
            right: Key::ArrowRight,
            fire: Key::Enter,
            shield: Key::M,
        }
    }
}

pub const PAUSE_KEY: Key = Key::P;

/// Accumulates key events between ticks
#[derive(Debug, Clone)]
pub struct InputTracker {
    schemes: [ControlScheme; 2],
    held: HashSet<Key>,
    fire_pressed: [bool; 2],
    fire_released: [bool; 2],
    pause_pressed: bool,
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::new([ControlScheme::player_one(), ControlScheme::player_two()])
    }
}

impl InputTracker {
    pub fn new(schemes: [ControlScheme; 2]) -> Self {
        Self {
            schemes,
            held: HashSet::new(),
            fire_pressed: [false; 2],
            fire_released: [false; 2],
            pause_pressed: false,
        }
    }

    pub fn key_down(&mut self, key: Key) {
        if !self.held.insert(key) {
            return;
        }
        if key == PAUSE_KEY {
            self.pause_pressed = true;
        }
        for (slot, scheme) in self.schemes.iter().enumerate() {
            if key == scheme.fire {
                self.fire_pressed[slot] = true;
            }
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if !self.held.remove(&key) {
            return;
        }
        for (slot, scheme) in self.schemes.iter().enumerate() {
            if key == scheme.fire {
                self.fire_released[slot] = true;
            }
        }
    }

    /// Drop every held key (window lost focus)
    pub fn release_all(&mut self) {
        let held: Vec<Key> = self.held.iter().copied().collect();
        for key in held {
            self.key_up(key);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Build the input for the next tick and clear one-shot edges
    pub fn snapshot(&mut self) -> TickInput {
        let mut players = [PlayerInput::default(); 2];
        for (slot, scheme) in self.schemes.iter().enumerate() {
            players[slot] = PlayerInput {
                up: self.is_held(scheme.up),
                down: self.is_held(scheme.down),
                left: self.is_held(scheme.left),
                right: self.is_held(scheme.right),
                shield: self.is_held(scheme.shield),
                fire_pressed: self.fire_pressed[slot],
                fire_released: self.fire_released[slot],
                fire_held: self.is_held(scheme.fire),
            };
        }
        let input = TickInput {
            players,
            pause: self.pause_pressed,
        };

        self.clear_edges();
        input
    }

    /// Forget presses and releases not yet handed to a tick
    pub fn clear_edges(&mut self) {
        self.fire_pressed = [false; 2];
        self.fire_released = [false; 2];
        self.pause_pressed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_keys_follow_held_state() {
        let mut tracker = InputTracker::default();
        tracker.key_down(Key::D);
        tracker.key_down(Key::M);
        let input = tracker.snapshot();
        assert!(input.players[0].right);
        assert!(input.players[1].shield);

        // Still held next frame
        assert!(tracker.snapshot().players[0].right);

        tracker.key_up(Key::D);
        assert!(!tracker.snapshot().players[0].right);
    }

    #[test]
    fn test_fire_press_is_an_edge() {
        let mut tracker = InputTracker::default();
        tracker.key_down(Key::Space);
        let first = tracker.snapshot();
        assert!(first.players[0].fire_pressed);
        assert!(first.players[0].fire_held);

        let second = tracker.snapshot();
        assert!(!second.players[0].fire_pressed);
        assert!(second.players[0].fire_held);
    }

    #[test]
    fn test_tap_within_one_frame() {
        let mut tracker = InputTracker::default();
        tracker.key_down(Key::Enter);
        tracker.key_up(Key::Enter);
        let input = tracker.snapshot();
        assert!(input.players[1].fire_pressed);
        assert!(input.players[1].fire_released);
        assert!(!input.players[1].fire_held);
    }

    #[test]
    fn test_auto_repeat_is_not_a_press() {
        let mut tracker = InputTracker::default();
        tracker.key_down(Key::Space);
        tracker.snapshot();
        tracker.key_down(Key::Space);
        tracker.key_down(Key::Space);
        let input = tracker.snapshot();
        assert!(!input.players[0].fire_pressed);
        assert!(input.players[0].fire_held);
    }

    #[test]
    fn test_release_and_press_within_one_frame() {
        let mut tracker = InputTracker::default();
        tracker.key_down(Key::Space);
        tracker.snapshot();
        tracker.key_up(Key::Space);
        tracker.key_down(Key::Space);
        let input = tracker.snapshot();
        assert!(input.players[0].fire_released);
        assert!(input.players[0].fire_pressed);
        assert!(input.players[0].fire_held);

        let next = tracker.snapshot();
        assert!(!next.players[0].fire_released);
        assert!(!next.players[0].fire_pressed);
    }

    #[test]
    fn test_clear_edges_keeps_held_keys() {
        let mut tracker = InputTracker::default();
        tracker.key_down(Key::Space);
        tracker.key_down(Key::P);
        tracker.key_down(Key::W);
        tracker.clear_edges();
        let input = tracker.snapshot();
        assert!(!input.players[0].fire_pressed);
        assert!(!input.pause);
        assert!(input.players[0].up);
        assert!(input.players[0].fire_held);
    }

    #[test]
    fn test_pause_ignores_auto_repeat() {
        let mut tracker = InputTracker::default();
        tracker.key_down(Key::P);
        assert!(tracker.snapshot().pause);
        tracker.key_down(Key::P);
        assert!(!tracker.snapshot().pause);
        tracker.key_up(Key::P);
        tracker.key_down(Key::P);
        assert!(tracker.snapshot().pause);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("ArrowLeft"), Some(Key::ArrowLeft));
        assert_eq!(Key::from_name(" "), Some(Key::Space));
        assert_eq!(Key::from_name("CapsLock"), None);
    }

    #[test]
    fn test_release_all() {
        let mut tracker = InputTracker::default();
        tracker.key_down(Key::W);
        tracker.key_down(Key::Q);
        tracker.key_down(Key::Enter);
        tracker.release_all();
        let input = tracker.snapshot();
        assert!(!input.players[0].up);
        assert!(!input.players[0].shield);
        assert!(!input.players[1].fire_held);
        assert!(input.players[1].fire_released);
    }
}
