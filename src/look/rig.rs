//! Look domain: camera rig state driven by look input and the locomotion snapshot.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::ControlScheme;
use crate::movement::{LocomotionSnapshot, WallSide};

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LookTuning {
    /// Degrees per mouse count
    pub mouse_sensitivity: f32,
    /// Degrees per second at full stick deflection
    pub gamepad_sensitivity: f32,
    pub pitch_clamp: f32,
    pub freelook_max_angle: f32,
    /// Eye roll per degree of neck yaw while freelooking
    pub freelook_tilt_factor: f32,
    pub slide_tilt: f32,
    pub wall_run_tilt: f32,
    pub slide_head_drop: f32,
    pub wall_run_head_shift: f32,
    pub wall_run_head_drop: f32,
    /// Smoothing rate for roll, neck return and head offset
    pub settle_rate: f32,
    /// Neck height above the capsule center
    pub eye_height: f32,
}

impl Default for LookTuning {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 0.1,
            gamepad_sensitivity: 100.0,
            pitch_clamp: 90.0,
            freelook_max_angle: 120.0,
            freelook_tilt_factor: 0.2,
            slide_tilt: -7.0,
            wall_run_tilt: 9.0,
            slide_head_drop: 0.4,
            wall_run_head_shift: 0.2,
            wall_run_head_drop: 0.1,
            settle_rate: 6.0,
            eye_height: 0.7,
        }
    }
}

impl LookTuning {
    /// Convert raw look input to degrees this frame: x turns right, y looks up.
    /// Mouse deltas are already per frame; stick input is a rate.
    pub fn scaled_look(&self, look: Vec2, scheme: ControlScheme, dt: f32) -> Vec2 {
        match scheme {
            ControlScheme::KeyboardMouse => Vec2::new(look.x, -look.y) * self.mouse_sensitivity,
            ControlScheme::Gamepad => look * self.gamepad_sensitivity * dt,
        }
    }
}

/// Camera rig angles in degrees. Positive yaw looks left, positive pitch looks
/// up, positive roll tilts the view left.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct LookRig {
    pub pitch: f32,
    /// Accumulated freelook yaw, reset whenever freelook ends
    pub freelook_yaw: f32,
    /// Yaw currently applied to the neck
    pub neck_yaw: f32,
    pub eye_roll: f32,
    /// Head position relative to the neck
    pub head_offset: Vec3,
}

impl LookRig {
    /// Advance the rig one frame. Returns the body yaw change in degrees
    /// (positive turns left); zero while freelooking.
    pub fn advance(
        &mut self,
        look: Vec2,
        snapshot: &LocomotionSnapshot,
        scheme: ControlScheme,
        dt: f32,
        tuning: &LookTuning,
    ) -> f32 {
        let look = tuning.scaled_look(look, scheme, dt);
        let t = (dt * tuning.settle_rate).clamp(0.0, 1.0);

        if snapshot.freelooking {
            self.freelook_yaw = (self.freelook_yaw - look.x)
                .clamp(-tuning.freelook_max_angle, tuning.freelook_max_angle);
            self.neck_yaw = self.freelook_yaw;

            if snapshot.sliding {
                self.eye_roll = lerp(self.eye_roll, tuning.slide_tilt, t);
                self.head_offset = self
                    .head_offset
                    .lerp(Vec3::new(0.0, -tuning.slide_head_drop, 0.0), t);
            } else if snapshot.wall_running {
                let (roll, shift) = match snapshot.wall_side {
                    WallSide::Right => (tuning.wall_run_tilt, -tuning.wall_run_head_shift),
                    WallSide::Left => (-tuning.wall_run_tilt, tuning.wall_run_head_shift),
                    WallSide::None => (self.eye_roll, self.head_offset.x),
                };
                self.eye_roll = lerp(self.eye_roll, roll, t);
                self.head_offset = self
                    .head_offset
                    .lerp(Vec3::new(shift, -tuning.wall_run_head_drop, 0.0), t);
            } else {
                self.eye_roll = self.neck_yaw * tuning.freelook_tilt_factor;
            }
            0.0
        } else {
            self.head_offset = self.head_offset.lerp(Vec3::ZERO, t);
            self.pitch = (self.pitch + look.y).clamp(-tuning.pitch_clamp, tuning.pitch_clamp);
            self.neck_yaw = lerp(self.neck_yaw, 0.0, t);
            self.eye_roll = lerp(self.eye_roll, 0.0, t);
            self.freelook_yaw = 0.0;
            -look.x
        }
    }

    pub fn neck_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.neck_yaw.to_radians())
    }

    pub fn head_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch.to_radians())
    }

    pub fn eye_rotation(&self) -> Quat {
        Quat::from_rotation_z(self.eye_roll.to_radians())
    }
}

fn lerp(current: f32, target: f32, t: f32) -> f32 {
    current + (target - current) * t
}
