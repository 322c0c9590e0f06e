/// Observer (camera) pose and key-driven navigation
///
/// The observer is a position plus a look target; the up vector is fixed. Portal
/// transit moves both together so the view direction survives a teleport.
use glam::{Mat4, Vec3};

use crate::math::{DEFAULT_LOOK_DIRECTION, MOVEMENT_FACTOR, MathUtils, WORLD_UP};

/// Observer movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    LookUp,
    LookDown,
    TurnLeft,
    TurnRight,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    pub position: Vec3,
    pub look_target: Vec3,
    up: Vec3,
}

impl Observer {
    pub fn new(position: Vec3, look_target: Vec3) -> Self {
        Self {
            position,
            look_target,
            up: WORLD_UP,
        }
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Vector from the observer to its look target
    pub fn look_offset(&self) -> Vec3 {
        self.look_target - self.position
    }

    /// Unit view direction, falling back to -Z when the target sits on the observer
    pub fn direction(&self) -> Vec3 {
        self.look_offset()
            .try_normalize()
            .unwrap_or(DEFAULT_LOOK_DIRECTION)
    }

    /// Move to `position`, carrying the look offset along verbatim
    pub fn relocate(&mut self, position: Vec3) {
        let offset = self.look_offset();
        self.position = position;
        self.look_target = position + offset;
    }

    /// Up vector for the view basis; swaps to -Z when looking straight along `up`
    fn view_up(&self) -> Vec3 {
        if self.direction().cross(self.up).length_squared() < 1e-12 {
            DEFAULT_LOOK_DIRECTION
        } else {
            self.up
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.direction(), self.view_up())
    }

    /// Camera-to-world transform handed to the shader
    pub fn inverse_view_matrix(&self) -> Mat4 {
        self.view_matrix().inverse()
    }

    /// Apply one tick of movement
    pub fn process_movement(&mut self, movement: CameraMovement) {
        let step = MOVEMENT_FACTOR;
        let dir = self.direction();
        let side = dir.cross(self.up) * step;

        match movement {
            CameraMovement::Forward => self.translate(dir * step),
            CameraMovement::Backward => self.translate(-dir * step),
            CameraMovement::Left => self.translate(-side),
            CameraMovement::Right => self.translate(side),
            CameraMovement::LookUp => {
                self.look_target += self.up * step;
            }
            CameraMovement::LookDown => {
                self.look_target -= self.up * step;
            }
            CameraMovement::TurnLeft => {
                self.look_target = self.position + MathUtils::rotation(self.up, step) * dir;
            }
            CameraMovement::TurnRight => {
                self.look_target = self.position + MathUtils::rotation(self.up, -step) * dir;
            }
        }
    }

    fn translate(&mut self, delta: Vec3) {
        self.position += delta;
        self.look_target += delta;
    }
}

impl Default for Observer {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 1.0, 1.0), Vec3::new(0.0, 1.0, -1.0))
    }
}
