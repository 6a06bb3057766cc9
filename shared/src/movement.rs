//! First-person walk controller.
//!
//! Arcade-style kinematics for the camera rig:
//! - Exponential horizontal damping
//! - Scaled constant gravity
//! - Unnormalized directional input (diagonals are faster)
//! - Ground contact from a single downward probe (sampled by the caller)
//! - Teleport back to spawn after falling out of the world
//!
//! The controller never touches the scene itself. Callers sample ground contact,
//! then hand the rig over through the [`CameraRig`] trait.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{FALL_RESET_Y, SPAWN_POSITION};

/// Horizontal velocity decay rate (1/s).
pub const DAMPING: f32 = 10.0;

/// Downward acceleration. Scaled for the scene's pixel-sized world units.
pub const GRAVITY: f32 = 9.8 * 100.0;

/// Acceleration per held direction key.
pub const MOVE_ACCEL: f32 = 1600.0;

/// Upward velocity added by a jump.
pub const JUMP_IMPULSE: f32 = 350.0;

/// Tunable constants for [`WalkController`].
///
/// Defaults are the stock values; `scene.ron` may override them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub damping: f32,
    pub gravity: f32,
    pub move_accel: f32,
    pub jump_impulse: f32,
    pub fall_reset_y: f32,
    pub spawn_position: [f32; 3],
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            damping: DAMPING,
            gravity: GRAVITY,
            move_accel: MOVE_ACCEL,
            jump_impulse: JUMP_IMPULSE,
            fall_reset_y: FALL_RESET_Y,
            spawn_position: SPAWN_POSITION,
        }
    }
}

/// Held direction keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveFlags {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveFlags {
    /// Desired direction as `(x, z)`: `x = left - right`, `z = forward - backward`.
    pub fn axes(&self) -> (f32, f32) {
        let x = f32::from(u8::from(self.left)) - f32::from(u8::from(self.right));
        let z = f32::from(u8::from(self.forward)) - f32::from(u8::from(self.backward));
        (x, z)
    }
}

/// Something the controller can move around.
///
/// `move_right` follows the rig's local right axis; `move_forward` follows the
/// horizontal forward axis (world up crossed with local right).
pub trait CameraRig {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn move_right(&mut self, distance: f32);
    fn move_forward(&mut self, distance: f32);
}

impl CameraRig for Transform {
    fn position(&self) -> Vec3 {
        self.translation
    }

    fn set_position(&mut self, position: Vec3) {
        self.translation = position;
    }

    fn move_right(&mut self, distance: f32) {
        self.translation += self.right().as_vec3() * distance;
    }

    fn move_forward(&mut self, distance: f32) {
        // Stays on the horizontal plane however far the rig is pitched.
        let forward = Vec3::Y.cross(self.right().as_vec3());
        self.translation += forward * distance;
    }
}

/// What happened during one [`WalkController::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub grounded: bool,
    pub jumped: bool,
    pub respawned: bool,
}

/// Per-rig walk state: input flags, velocity and the jump latch.
///
/// Lives on the camera rig entity. Input systems call the setters, the walk
/// system calls [`WalkController::update`] once per frame.
#[derive(Component, Debug, Clone)]
pub struct WalkController {
    pub tuning: MovementTuning,
    flags: MoveFlags,
    jump_requested: bool,
    can_jump: bool,
    velocity: Vec3,
    locked: bool,
    last_step: StepReport,
}

impl Default for WalkController {
    fn default() -> Self {
        Self::new(MovementTuning::default())
    }
}

impl WalkController {
    pub fn new(tuning: MovementTuning) -> Self {
        Self {
            tuning,
            flags: MoveFlags::default(),
            jump_requested: false,
            can_jump: false,
            velocity: Vec3::ZERO,
            locked: false,
            last_step: StepReport::default(),
        }
    }

    pub fn set_forward(&mut self, pressed: bool) {
        self.flags.forward = pressed;
    }

    pub fn set_backward(&mut self, pressed: bool) {
        self.flags.backward = pressed;
    }

    pub fn set_left(&mut self, pressed: bool) {
        self.flags.left = pressed;
    }

    pub fn set_right(&mut self, pressed: bool) {
        self.flags.right = pressed;
    }

    pub fn set_flags(&mut self, flags: MoveFlags) {
        self.flags = flags;
    }

    pub fn flags(&self) -> MoveFlags {
        self.flags
    }

    /// Ask for a jump on the next update. Dropped if the rig cannot jump then.
    pub fn request_jump(&mut self) {
        self.jump_requested = true;
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn can_jump(&self) -> bool {
        self.can_jump
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Report from the most recent update.
    pub fn last_step(&self) -> StepReport {
        self.last_step
    }

    /// Advance one frame.
    ///
    /// `ground_contact` must be sampled at the rig position before the call.
    /// While unlocked the rig and velocity are left untouched.
    pub fn update(&mut self, dt: f32, ground_contact: bool, rig: &mut impl CameraRig) -> StepReport {
        let mut report = StepReport::default();
        if !self.locked {
            self.jump_requested = false;
            self.last_step = report;
            return report;
        }

        let dt = dt.max(0.0);
        let tuning = self.tuning;

        // --- Damping and gravity ---
        self.velocity.x -= self.velocity.x * tuning.damping * dt;
        self.velocity.z -= self.velocity.z * tuning.damping * dt;
        self.velocity.y -= tuning.gravity * dt;

        // --- Input ---
        let (move_x, move_z) = self.flags.axes();
        if self.flags.forward || self.flags.backward {
            self.velocity.z -= move_z * tuning.move_accel * dt;
        }
        if self.flags.left || self.flags.right {
            self.velocity.x -= move_x * tuning.move_accel * dt;
        }

        // --- Ground ---
        if ground_contact {
            self.velocity.y = self.velocity.y.max(0.0);
            self.can_jump = true;
            report.grounded = true;
        }

        // --- Jump ---
        if std::mem::take(&mut self.jump_requested) && self.can_jump {
            self.velocity.y += tuning.jump_impulse;
            self.can_jump = false;
            report.jumped = true;
        }

        // --- Integrate ---
        // Forward velocity is stored negated relative to the rig's forward axis.
        rig.move_right(self.velocity.x * dt);
        rig.move_forward(-self.velocity.z * dt);
        let mut position = rig.position();
        position.y += self.velocity.y * dt;
        rig.set_position(position);

        // --- Fell out of the world ---
        if position.y < tuning.fall_reset_y {
            self.velocity.y = 0.0;
            rig.set_position(Vec3::from_array(tuning.spawn_position));
            self.can_jump = true;
            report.respawned = true;
        }

        self.last_step = report;
        report
    }
}
