//! Movement domain: input edge handlers.
//!
//! These run as soon as the input is sampled, outside the tick order, and act on
//! the grounded/wall state sampled by the most recent tick.

use bevy::prelude::*;

use crate::core::ControlScheme;
use crate::movement::collaborators::{AnimationCue, CueSink, facing_rotation};
use crate::movement::components::{Maneuver, PendingRotation, WallSide};
use crate::movement::controller::LocomotionController;
use crate::movement::resources::{ButtonEdge, MovementTuning};

/// Stick deflection that counts as steering away from a wall during a wall jump.
const WALL_JUMP_STEER_THRESHOLD: f32 = 0.1;

impl LocomotionController {
    pub fn on_move(&mut self, axis: Vec2) {
        self.held.axis = axis;
    }

    pub fn set_control_scheme(&mut self, scheme: ControlScheme) {
        self.control_scheme = scheme;
    }

    /// Gamepad sprint toggles on press; keyboard sprint mirrors the key.
    pub fn on_sprint(&mut self, edge: ButtonEdge) {
        match self.control_scheme {
            ControlScheme::Gamepad => {
                if edge.is_pressed() && self.state.moving && !self.state.crouching {
                    self.held.sprint = !self.held.sprint;
                }
            }
            ControlScheme::KeyboardMouse => {
                self.held.sprint = edge.is_pressed();
            }
        }
    }

    pub fn on_crouch(&mut self, edge: ButtonEdge) {
        self.held.crouch = edge.is_pressed();
        if !self.state.maneuver.is_sliding() {
            self.state.crouching = self.held.crouch;
        }
    }

    pub fn on_freelook(&mut self, edge: ButtonEdge) {
        self.held.freelook = edge.is_pressed();
    }

    /// Ground jump, wall-run jump or wall bounce, in that priority.
    pub fn on_jump(
        &mut self,
        edge: ButtonEdge,
        body_rotation: Quat,
        tuning: &MovementTuning,
        cues: &mut impl CueSink,
    ) {
        if !edge.is_pressed() || self.state.movement_locked {
            return;
        }

        let forward = body_rotation * Vec3::NEG_Z;
        let right = body_rotation * Vec3::X;
        let s = &mut self.state;
        let was_grounded = s.grounded;

        if s.grounded && !s.crouching {
            s.vertical_velocity = tuning.jump_force;
            s.grounded = false;
            if !s.animating {
                cues.play(AnimationCue::Jump);
                s.animating = true;
            }
        } else if s.maneuver.is_wall_running() {
            s.vertical_velocity = tuning.jump_force;

            let steer = self.held.axis.x;
            let (away, steering_away) = match s.wall_side {
                WallSide::Right => (-right, steer < -WALL_JUMP_STEER_THRESHOLD),
                WallSide::Left => (right, steer > WALL_JUMP_STEER_THRESHOLD),
                WallSide::None => (Vec3::ZERO, false),
            };
            let side_force = if steering_away {
                tuning.wall_side_jump_force * 2.0
            } else {
                tuning.wall_side_jump_force
            };
            s.horizontal_direction += away * side_force + forward * tuning.wall_forward_jump_force;

            s.maneuver = Maneuver::None;
            s.wall_run_timer = 0.0;
            debug!("Wall-run jump: side={:?}, steering_away={}", s.wall_side, steering_away);
        } else if !s.grounded && s.wall_ahead && !s.maneuver.is_ledge_grabbing() {
            s.vertical_velocity = tuning.jump_force * tuning.wall_bounce_vertical_factor;
            s.horizontal_direction = -forward * tuning.wall_bounce_force;
            cues.play(AnimationCue::WallBounce);
            s.pending_rotation = Some(PendingRotation {
                target: facing_rotation(-forward),
                progress: 0.0,
            });
            debug!("Wall bounce");
        }

        s.may_wall_run = !was_grounded && s.wall_detected();
    }
}
