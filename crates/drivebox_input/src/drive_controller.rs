//! Keyboard driving input
//!
//! Controls:
//! - Up/W: accelerate forward
//! - Down/S: accelerate backward
//! - Left/A, Right/D: turn in place
//!
//! Keys set flags on press and clear them on release; the simulation reads
//! the flags once per frame and turns them into forces. When both turn keys
//! are held, the most recently pressed one wins.

use drivebox_math::{Quat, Vec3};
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Which way the car is being steered
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnDirection {
    Left,
    Right,
}

/// Keyboard state for driving the car
pub struct DriveController {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    /// The turn key that currently wins. Tracks the most recent press so
    /// holding both keys is deterministic.
    active_turn: Option<TurnDirection>,

    // Configuration
    /// Magnitude of the driving force in newtons
    pub drive_force: f32,
    /// Turn rate in radians per second
    pub turn_rate: f32,
}

impl Default for DriveController {
    fn default() -> Self {
        Self::new()
    }
}

impl DriveController {
    pub fn new() -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,
            active_turn: None,
            drive_force: 500.0,
            turn_rate: 5.0,
        }
    }

    /// Builder: set the driving force magnitude
    pub fn with_drive_force(mut self, force: f32) -> Self {
        self.drive_force = force;
        self
    }

    /// Builder: set the turn rate
    pub fn with_turn_rate(mut self, rate: f32) -> Self {
        self.turn_rate = rate;
        self
    }

    /// Process keyboard input, returning true if the key was handled
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;

        match key {
            KeyCode::ArrowUp | KeyCode::KeyW => {
                self.forward = pressed;
                true
            }
            KeyCode::ArrowDown | KeyCode::KeyS => {
                self.backward = pressed;
                true
            }
            KeyCode::ArrowLeft | KeyCode::KeyA => {
                self.left = pressed;
                if pressed {
                    self.active_turn = Some(TurnDirection::Left);
                } else if self.active_turn == Some(TurnDirection::Left) {
                    self.active_turn = self.right.then_some(TurnDirection::Right);
                }
                true
            }
            KeyCode::ArrowRight | KeyCode::KeyD => {
                self.right = pressed;
                if pressed {
                    self.active_turn = Some(TurnDirection::Right);
                } else if self.active_turn == Some(TurnDirection::Right) {
                    self.active_turn = self.left.then_some(TurnDirection::Left);
                }
                true
            }
            _ => false,
        }
    }

    /// Throttle input in -1.0..=1.0 (positive = forward)
    pub fn throttle(&self) -> f32 {
        (self.forward as i32 - self.backward as i32) as f32
    }

    /// Turn input in -1.0..=1.0 (positive = left / counterclockwise)
    pub fn turn(&self) -> f32 {
        match self.active_turn {
            Some(TurnDirection::Left) => 1.0,
            Some(TurnDirection::Right) => -1.0,
            None => 0.0,
        }
    }

    /// Whether any steering key currently wins
    pub fn is_turning(&self) -> bool {
        self.active_turn.is_some()
    }

    /// Whether any driving key is held
    pub fn is_driving(&self) -> bool {
        self.forward || self.backward || self.active_turn.is_some()
    }

    /// The driving force in world space for a body with the given orientation
    ///
    /// Forward is the body's local -Z. Returns zero when no throttle is held.
    pub fn drive_force_vector(&self, orientation: Quat) -> Vec3 {
        let throttle = self.throttle();
        if throttle == 0.0 {
            return Vec3::ZERO;
        }
        orientation.rotate(Vec3::new(0.0, 0.0, -throttle * self.drive_force))
    }

    /// The angular velocity for the current turn input (yaw about +Y)
    pub fn turn_angular_velocity(&self) -> Vec3 {
        Vec3::new(0.0, self.turn() * self.turn_rate, 0.0)
    }
}
