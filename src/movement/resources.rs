//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementTuning {
    pub crouch_speed: f32,
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub wall_run_speed: f32,
    /// Scale applied to the slide decay curve
    pub slide_speed: f32,
    /// Upper bound on slide speed, reached at the start of a slide
    pub slide_speed_cap: f32,
    /// Added to the decay curve so a slide never ends at zero speed
    pub slide_speed_bias: f32,
    pub slide_decay_exponent: f32,
    pub slide_duration: f32,
    /// Exponential smoothing rate for speed, direction and capsule height
    pub lerp_rate: f32,
    /// Direction smoothing rate while airborne
    pub air_lerp_rate: f32,
    /// Move axis magnitude below which the player counts as idle
    pub input_threshold: f32,

    pub gravity: f32,
    /// Vertical velocity held while grounded so slopes don't bounce
    pub ground_stick_velocity: f32,
    /// Gap below the feet that still counts as standing on the ground
    pub ground_check_distance: f32,
    pub jump_force: f32,

    pub capsule_radius: f32,
    pub stand_height: f32,
    pub crouch_height: f32,
    /// Capsule height snaps to its target once within this distance
    pub height_epsilon: f32,

    pub wall_ray_distance: f32,
    pub wall_run_gravity: f32,
    pub wall_run_duration: f32,
    pub wall_run_cooldown: f32,
    pub wall_run_min_speed: f32,
    /// Facing slerp rate while wall-running
    pub wall_run_turn_rate: f32,
    pub wall_forward_jump_force: f32,
    pub wall_side_jump_force: f32,

    pub wall_bounce_probe_distance: f32,
    /// Fraction of `jump_force` used by a wall bounce
    pub wall_bounce_vertical_factor: f32,
    /// Backward push applied to the travel direction by a wall bounce
    pub wall_bounce_force: f32,
    /// Seconds to turn around after a wall bounce
    pub wall_bounce_turn_time: f32,

    /// Horizontal distance in front of the body where ledges are searched
    pub ledge_probe_reach: f32,
    /// Height above the capsule center where the downward ledge probe starts
    pub ledge_probe_top: f32,
    /// Height above the capsule center where the downward ledge probe ends
    pub ledge_probe_bottom: f32,
    /// Origin height of the line-of-sight check toward the ledge
    pub ledge_obstruction_height: f32,
    /// How far below the ledge top the front-face probe runs
    pub ledge_face_drop: f32,
    /// Height above the ledge point the capsule center is pulled to
    pub ledge_mount_offset: f32,
    pub ledge_homing_speed: f32,
    pub ledge_release_distance: f32,

    pub hard_landing_velocity: f32,
    pub roll_forward_velocity: f32,
    pub soft_landing_velocity: f32,

    pub head_bob_enabled: bool,
    pub head_bob_walk_intensity: f32,
    pub head_bob_sprint_intensity: f32,
    pub head_bob_crouch_intensity: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            crouch_speed: 3.0,
            walk_speed: 6.0,
            sprint_speed: 12.0,
            wall_run_speed: 12.0,
            slide_speed: 30.0,
            slide_speed_cap: 20.0,
            slide_speed_bias: 0.2,
            slide_decay_exponent: 0.5,
            slide_duration: 1.5,
            lerp_rate: 6.0,
            air_lerp_rate: 1.0,
            input_threshold: 0.01,

            gravity: -9.81,
            ground_stick_velocity: -2.0,
            ground_check_distance: 0.05,
            jump_force: 5.0,

            capsule_radius: 0.5,
            stand_height: 1.95,
            crouch_height: 1.0,
            height_epsilon: 0.001,

            wall_ray_distance: 1.0,
            wall_run_gravity: -1.0,
            wall_run_duration: 2.0,
            wall_run_cooldown: 1.0,
            wall_run_min_speed: 8.0,
            wall_run_turn_rate: 4.0,
            wall_forward_jump_force: 0.4,
            wall_side_jump_force: 0.2,

            wall_bounce_probe_distance: 0.5,
            wall_bounce_vertical_factor: 1.0 / 1.2,
            wall_bounce_force: 0.5,
            wall_bounce_turn_time: 0.4,

            ledge_probe_reach: 1.0,
            ledge_probe_top: 0.6,
            ledge_probe_bottom: 0.3,
            ledge_obstruction_height: 1.0,
            ledge_face_drop: 0.1,
            ledge_mount_offset: 1.5,
            ledge_homing_speed: 2.4,
            ledge_release_distance: 0.3,

            hard_landing_velocity: -10.0,
            roll_forward_velocity: 5.0,
            soft_landing_velocity: -4.0,

            head_bob_enabled: true,
            head_bob_walk_intensity: 0.1,
            head_bob_sprint_intensity: 0.2,
            head_bob_crouch_intensity: 0.05,
        }
    }
}

impl MovementTuning {
    /// Apex height of a standing jump: h = v² / (2g)
    pub fn jump_height(&self) -> f32 {
        self.jump_force * self.jump_force / (2.0 * self.gravity.abs())
    }

    /// Slide speed for a given remaining slide time. Front-loaded: capped at
    /// the start, decaying toward `slide_speed_bias * slide_speed` at the end.
    pub fn slide_speed_at(&self, remaining: f32) -> f32 {
        let curve = remaining.max(0.0).powf(self.slide_decay_exponent) + self.slide_speed_bias;
        (curve * self.slide_speed).min(self.slide_speed_cap)
    }
}

/// Press/release distinction for a button edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEdge {
    Pressed,
    Released,
}

impl ButtonEdge {
    pub fn is_pressed(self) -> bool {
        self == ButtonEdge::Pressed
    }
}

/// Device input sampled this frame, before it is dispatched to the controller.
#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub axis: Vec2,
    pub axis_changed: bool,
    pub jump: Option<ButtonEdge>,
    pub sprint: Option<ButtonEdge>,
    pub crouch: Option<ButtonEdge>,
    pub freelook: Option<ButtonEdge>,
    /// Mouse delta (counts) or right stick (unit axis) this frame
    pub look: Vec2,
}

impl MovementInput {
    pub fn clear_edges(&mut self) {
        self.axis_changed = false;
        self.jump = None;
        self.sprint = None;
        self.crouch = None;
        self.freelook = None;
        self.look = Vec2::ZERO;
    }
}
