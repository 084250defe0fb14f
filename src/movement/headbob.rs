//! Movement domain: cosmetic head-bob advanced in the late phase.

use bevy::prelude::*;

use crate::movement::components::LocomotionMode;
use crate::movement::resources::MovementTuning;

const SETTLE_DISTANCE: f32 = 0.001;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadBob {
    /// Oscillator phase, advanced by body speed
    pub phase: f32,
    pub intensity: f32,
    /// Current eye offset (x sway, y bounce)
    pub offset: Vec2,
}

impl HeadBob {
    pub fn advance(
        &mut self,
        mode: LocomotionMode,
        grounded: bool,
        moving: bool,
        body_speed: f32,
        dt: f32,
        tuning: &MovementTuning,
    ) {
        let intensity = match mode {
            LocomotionMode::Crouch | LocomotionMode::Slide => Some(tuning.head_bob_crouch_intensity),
            LocomotionMode::WallRun | LocomotionMode::Sprint => Some(tuning.head_bob_sprint_intensity),
            LocomotionMode::Walk => Some(tuning.head_bob_walk_intensity),
            LocomotionMode::LedgeGrab | LocomotionMode::Airborne => None,
        };
        if let Some(intensity) = intensity {
            self.intensity = intensity;
            self.phase += body_speed * 2.0 * dt;
        }

        let wall_running = mode == LocomotionMode::WallRun;
        let target = if (grounded && moving) || wall_running {
            Vec2::new((self.phase / 2.0).sin(), self.phase.sin()) * self.intensity
        } else {
            Vec2::ZERO
        };

        let t = (dt * tuning.lerp_rate).min(1.0);
        self.offset = self.offset.lerp(target, t);

        if target == Vec2::ZERO && self.offset.length() <= SETTLE_DISTANCE {
            self.offset = Vec2::ZERO;
        }
    }
}
