//! Respawn domain: body heat drained by cold exposure.

use bevy::prelude::*;

use crate::respawn::sequence::RespawnTuning;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct HeatMeter {
    pub current: f32,
    pub max: f32,
    /// Toggled by walking through an exposure volume
    pub exposed: bool,
    /// Number of heat sources currently overlapped
    pub warming: u32,
    /// Latched when the meter empties, cleared by a refill
    depleted: bool,
}

impl HeatMeter {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            max,
            exposed: false,
            warming: 0,
            depleted: false,
        }
    }

    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.current / self.max
        }
    }

    pub fn toggle_exposure(&mut self) {
        self.exposed = !self.exposed;
        debug!("Cold exposure: {}", self.exposed);
    }

    /// Forget which volumes the body was in. Used when it is teleported, since
    /// it never crosses back out of them.
    pub fn reset_exposure(&mut self) {
        self.exposed = false;
        self.warming = 0;
    }

    pub fn refill(&mut self) {
        self.current = self.max;
        self.depleted = false;
    }

    /// Warm or drain for one frame. Returns true on the frame the meter empties;
    /// it does not fire again until refilled.
    pub fn tick(&mut self, dt: f32, tuning: &RespawnTuning) -> bool {
        if self.warming > 0 {
            self.current += tuning.heat_warm_per_sec * dt;
        } else if self.exposed {
            self.current -= tuning.heat_drain_per_sec * dt;
        }
        self.current = self.current.clamp(0.0, self.max);

        if self.current <= 0.0 && !self.depleted {
            self.depleted = true;
            return true;
        }
        false
    }
}
