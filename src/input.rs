/// Input handling system
/// Turns per-frame key states into observer movement and tuning values
use std::collections::HashMap;

use crate::{
    math::{AA_LEVEL_MAX, AA_LEVEL_MIN, MOVER_SPEED_DEFAULT, MOVER_SPEED_MAX, MOVER_SPEED_STEP},
    observer::CameraMovement,
};

/// Keys the core reacts to. The windowing layer maps its own key codes onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Up,
    Down,
    Left,
    Right,
    /// Slow the drifting portal mover
    N,
    /// Speed up the drifting portal mover
    M,
    Digit1,
    Digit2,
    Digit3,
}

pub struct InputHandler {
    keys_pressed: HashMap<Key, bool>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            keys_pressed: HashMap::new(),
        }
    }

    /// Record the state of a key for the coming frame
    pub fn set_key(&mut self, key: Key, pressed: bool) {
        self.keys_pressed.insert(key, pressed);
    }

    /// Release every key
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
    }

    /// Check if a key is currently pressed
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.get(&key).copied().unwrap_or(false)
    }

    /// Observer movements for the held keys, in a fixed order
    pub fn camera_movements(&self) -> Vec<CameraMovement> {
        const BINDINGS: [(Key, CameraMovement); 8] = [
            (Key::W, CameraMovement::Forward),
            (Key::S, CameraMovement::Backward),
            (Key::A, CameraMovement::Left),
            (Key::D, CameraMovement::Right),
            (Key::Up, CameraMovement::LookUp),
            (Key::Down, CameraMovement::LookDown),
            (Key::Left, CameraMovement::TurnLeft),
            (Key::Right, CameraMovement::TurnRight),
        ];

        BINDINGS
            .iter()
            .filter(|(key, _)| self.is_key_pressed(*key))
            .map(|(_, movement)| *movement)
            .collect()
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Tunable values the core exposes to the keyboard
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    /// Drift speed scalar, clamped to `[0, MOVER_SPEED_MAX]`
    pub mover_speed: f32,
    /// Antialiasing level forwarded to the shader
    pub aa_level: u32,
}

impl Controls {
    pub fn new() -> Self {
        Self {
            mover_speed: MOVER_SPEED_DEFAULT,
            aa_level: AA_LEVEL_MIN,
        }
    }

    /// Apply one frame of tuning keys
    pub fn update(&mut self, input: &InputHandler) {
        if input.is_key_pressed(Key::N) {
            self.change_mover_speed(-MOVER_SPEED_STEP);
        }
        if input.is_key_pressed(Key::M) {
            self.change_mover_speed(MOVER_SPEED_STEP);
        }

        for (key, level) in [(Key::Digit1, 1), (Key::Digit2, 2), (Key::Digit3, 3)] {
            if input.is_key_pressed(key) && self.aa_level != level {
                log::debug!("Antialiasing level {} -> {}", self.aa_level, level);
                self.aa_level = level;
            }
        }
    }

    pub fn change_mover_speed(&mut self, delta: f32) {
        self.mover_speed = (self.mover_speed + delta).clamp(0.0, MOVER_SPEED_MAX);
    }

    pub fn set_aa_level(&mut self, level: u32) {
        let clamped = level.clamp(AA_LEVEL_MIN, AA_LEVEL_MAX);
        if clamped != level {
            log::warn!("Antialiasing level {} out of range, using {}", level, clamped);
        }
        self.aa_level = clamped;
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_state() {
        let mut input = InputHandler::new();
        assert!(!input.is_key_pressed(Key::W));

        input.set_key(Key::W, true);
        assert!(input.is_key_pressed(Key::W));

        input.set_key(Key::W, false);
        assert!(!input.is_key_pressed(Key::W));
    }

    #[test]
    fn test_camera_movements_order() {
        let mut input = InputHandler::new();
        input.set_key(Key::Left, true);
        input.set_key(Key::W, true);

        assert_eq!(
            input.camera_movements(),
            vec![CameraMovement::Forward, CameraMovement::TurnLeft]
        );

        input.clear();
        assert!(input.camera_movements().is_empty());
    }

    #[test]
    fn test_mover_speed_clamped() {
        let mut input = InputHandler::new();
        let mut controls = Controls::new();

        input.set_key(Key::M, true);
        for _ in 0..1000 {
            controls.update(&input);
        }
        assert_eq!(controls.mover_speed, MOVER_SPEED_MAX);

        input.clear();
        input.set_key(Key::N, true);
        for _ in 0..1000 {
            controls.update(&input);
        }
        assert_eq!(controls.mover_speed, 0.0);
    }

    #[test]
    fn test_mover_speed_step() {
        let mut input = InputHandler::new();
        let mut controls = Controls::new();

        input.set_key(Key::N, true);
        controls.update(&input);

        assert!((controls.mover_speed - (MOVER_SPEED_DEFAULT - MOVER_SPEED_STEP)).abs() < 1e-9);
    }

    #[test]
    fn test_aa_level_selection() {
        let mut input = InputHandler::new();
        let mut controls = Controls::new();
        assert_eq!(controls.aa_level, 1);

        input.set_key(Key::Digit2, true);
        controls.update(&input);
        assert_eq!(controls.aa_level, 2);

        // Highest held selector wins
        input.set_key(Key::Digit3, true);
        controls.update(&input);
        assert_eq!(controls.aa_level, 3);

        controls.set_aa_level(9);
        assert_eq!(controls.aa_level, AA_LEVEL_MAX);
    }
}
