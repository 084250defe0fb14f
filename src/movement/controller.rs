//! Movement domain: the per-tick locomotion state machine.
//!
//! `LocomotionController::tick` runs the fixed step order every frame:
//! gravity, speed, slide timer, wall probe, wall-run, vertical motion, landing,
//! crouch/stand, ledge probe, wall-bounce probe, movement. Later steps read what
//! earlier steps wrote, so the order is part of the behaviour.

use bevy::prelude::*;

use crate::core::ControlScheme;
use crate::movement::collaborators::{
    AnimationCue, CharacterMover, CueSink, PhysicsQuery, facing_rotation,
};
use crate::movement::components::{
    LocomotionMode, LocomotionSnapshot, Maneuver, MovementState,
};
use crate::movement::headbob::HeadBob;
use crate::movement::landing::classify_landing;
use crate::movement::probes::{
    LedgeProbe, probe_grounded, probe_ledge, probe_overhead_clear, probe_wall_ahead, probe_walls,
};
use crate::movement::resources::MovementTuning;

/// Button and axis state as last reported by the input edges.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeldInputs {
    pub axis: Vec2,
    pub sprint: bool,
    pub crouch: bool,
    pub freelook: bool,
}

#[derive(Component, Debug, Clone, Default)]
pub struct LocomotionController {
    pub state: MovementState,
    pub held: HeldInputs,
    pub head_bob: HeadBob,
    pub control_scheme: ControlScheme,
    previous_position: Option<Vec3>,
}

impl LocomotionController {
    pub fn new(control_scheme: ControlScheme) -> Self {
        Self {
            control_scheme,
            ..default()
        }
    }

    pub fn tick(
        &mut self,
        dt: f32,
        tuning: &MovementTuning,
        physics: &impl PhysicsQuery,
        mover: &mut impl CharacterMover,
        cues: &mut impl CueSink,
    ) {
        if dt <= 0.0 {
            return;
        }

        let was_grounded = self.state.grounded;
        let fall_velocity = self.state.vertical_velocity;
        // A rising body has left the ground even while the floor is within reach
        self.state.grounded = self.state.vertical_velocity <= 0.0
            && probe_grounded(physics, mover.position(), mover.height(), mover.radius(), tuning);
        let touchdown_velocity = if !was_grounded && self.state.grounded {
            fall_velocity
        } else {
            0.0
        };
        self.state.moving = self.held.axis.length() >= tuning.input_threshold
            || self.state.maneuver.is_wall_running();
        if !self.state.moving && self.control_scheme == ControlScheme::Gamepad {
            // Stick sprint is a toggle that lapses when the player stops
            self.held.sprint = false;
        }

        self.apply_gravity(dt, tuning);
        self.resolve_speed(dt, tuning);
        self.advance_slide(dt);

        let wall = probe_walls(physics, mover.position(), mover.right(), tuning);
        self.state.wall_side = wall.side;
        self.state.wall_normal = wall.normal;
        self.update_wall_run(dt, tuning, mover);

        mover.move_by(Vec3::Y * self.state.vertical_velocity * dt);

        self.play_landing_cue(touchdown_velocity, tuning, cues);
        self.resolve_stance(dt, tuning, physics, mover);
        self.update_ledge_grab(tuning, physics, mover, cues);
        self.update_wall_bounce(dt, tuning, physics, mover);
        self.integrate_movement(dt, tuning, mover);

        self.state.sprinting = self.held.sprint && !self.state.crouching;
        self.state.mode = self.resolve_mode();
    }

    /// Late phase: sample the velocities the landing check reads next tick and
    /// advance the head-bob. Must run after the tick has moved the body.
    pub fn late_update(&mut self, dt: f32, tuning: &MovementTuning, position: Vec3, forward: Vec3) {
        if dt <= 0.0 {
            return;
        }

        let velocity = match self.previous_position {
            Some(previous) => (position - previous) / dt,
            None => Vec3::ZERO,
        };
        self.previous_position = Some(position);
        self.state.last_vertical_velocity = velocity.y;
        self.state.last_forward_velocity = velocity.dot(forward);

        if tuning.head_bob_enabled {
            self.head_bob.advance(
                self.state.mode,
                self.state.grounded,
                self.state.moving,
                velocity.length(),
                dt,
                tuning,
            );
        }
    }

    /// Clear all motion after a teleport. Held buttons survive, the lock flag is
    /// owned by the respawn sequence.
    pub fn reset_motion(&mut self, position: Vec3) {
        let movement_locked = self.state.movement_locked;
        self.state = MovementState {
            movement_locked,
            ..default()
        };
        self.head_bob = HeadBob::default();
        self.previous_position = Some(position);
    }

    pub fn is_freelooking(&self) -> bool {
        self.held.freelook || self.state.maneuver.is_active()
    }

    pub fn snapshot(&self) -> LocomotionSnapshot {
        LocomotionSnapshot {
            mode: self.state.mode,
            grounded: self.state.grounded,
            moving: self.state.moving,
            freelooking: self.is_freelooking(),
            sliding: self.state.maneuver.is_sliding(),
            wall_running: self.state.maneuver.is_wall_running(),
            wall_side: self.state.wall_side,
            speed: self.state.current_speed,
            eye_offset: self.head_bob.offset,
        }
    }

    fn resolve_mode(&self) -> LocomotionMode {
        let s = &self.state;
        match s.maneuver {
            Maneuver::Slide { .. } => LocomotionMode::Slide,
            Maneuver::WallRun { .. } => LocomotionMode::WallRun,
            Maneuver::LedgeGrab { .. } => LocomotionMode::LedgeGrab,
            Maneuver::None if !s.grounded => LocomotionMode::Airborne,
            Maneuver::None if s.crouching => LocomotionMode::Crouch,
            Maneuver::None if s.sprinting => LocomotionMode::Sprint,
            Maneuver::None => LocomotionMode::Walk,
        }
    }

    fn apply_gravity(&mut self, dt: f32, tuning: &MovementTuning) {
        let s = &mut self.state;
        if s.grounded && s.vertical_velocity < 0.0 {
            s.vertical_velocity = tuning.ground_stick_velocity;
        } else if s.maneuver.is_wall_running() {
            s.vertical_velocity = approach(
                s.vertical_velocity,
                tuning.wall_run_gravity,
                dt * tuning.lerp_rate,
            );
        } else if s.maneuver.is_ledge_grabbing() || s.movement_locked {
            s.vertical_velocity = 0.0;
        } else {
            s.vertical_velocity += tuning.gravity * dt;
        }
    }

    fn resolve_speed(&mut self, dt: f32, tuning: &MovementTuning) {
        let s = &mut self.state;
        let target = match s.maneuver {
            Maneuver::Slide { .. } => {
                s.current_speed = tuning.slide_speed_at(s.slide_timer);
                return;
            }
            Maneuver::WallRun { .. } => tuning.wall_run_speed,
            // Airborne keeps whatever speed it took off with
            _ if !s.grounded => return,
            _ if s.crouching => tuning.crouch_speed,
            _ if s.sprinting => tuning.sprint_speed,
            _ => tuning.walk_speed,
        };
        s.current_speed = approach(s.current_speed, target, dt * tuning.lerp_rate);
    }

    fn advance_slide(&mut self, dt: f32) {
        let s = &mut self.state;
        if !s.maneuver.is_sliding() {
            return;
        }

        s.slide_timer -= dt;
        if s.slide_timer <= 0.0 {
            s.slide_timer = 0.0;
            s.maneuver = Maneuver::None;
            if s.crouching {
                self.held.crouch = false;
            }
            debug!("Slide ended: sprint_held={}", self.held.sprint);
        }
    }

    fn update_wall_run(&mut self, dt: f32, tuning: &MovementTuning, mover: &mut impl CharacterMover) {
        let speed = mover.velocity().length();
        let s = &mut self.state;

        let gates_hold = s.wall_detected()
            && !s.grounded
            && speed > tuning.wall_run_min_speed
            && self.held.sprint;

        if !s.maneuver.is_wall_running() {
            let can_engage = gates_hold
                && !self.held.crouch
                && s.may_wall_run
                && s.wall_run_timer <= 0.0
                && s.wall_run_cooldown <= 0.0;
            if can_engage {
                let direction = Vec3::Y.cross(s.wall_normal).normalize_or_zero();
                s.maneuver = Maneuver::WallRun {
                    direction,
                    facing: facing_rotation(direction),
                };
                s.slide_timer = 0.0;
                s.wall_run_timer = tuning.wall_run_duration;
                debug!("Wall-run engaged: side={:?}, speed={:.2}", s.wall_side, speed);
            }
        } else if !gates_hold {
            s.maneuver = Maneuver::None;
            s.wall_run_timer = 0.0;
            debug!(
                "Wall-run released: wall={:?}, grounded={}, speed={:.2}, sprint={}",
                s.wall_side, s.grounded, speed, self.held.sprint
            );
        }

        if let Maneuver::WallRun { facing, .. } = s.maneuver {
            s.wall_run_timer -= dt;
            let turn = (dt * tuning.wall_run_turn_rate).min(1.0);
            mover.set_rotation(mover.rotation().slerp(facing, turn));

            if s.wall_run_timer <= 0.0 {
                s.maneuver = Maneuver::None;
                s.wall_run_timer = 0.0;
                s.wall_run_cooldown = tuning.wall_run_cooldown;
                debug!("Wall-run expired, cooldown {:.2}s", tuning.wall_run_cooldown);
            }
        } else {
            s.wall_run_cooldown = (s.wall_run_cooldown - dt).max(0.0);
        }
    }

    /// The touchdown tick can move less than a full step before the floor stops
    /// it, so the impact is the harder of the late sample and the fall speed
    /// carried into that tick.
    fn play_landing_cue(
        &mut self,
        touchdown_velocity: f32,
        tuning: &MovementTuning,
        cues: &mut impl CueSink,
    ) {
        let s = &mut self.state;
        if !s.grounded || s.maneuver.is_sliding() {
            s.animating = false;
            return;
        }

        let impact = s.last_vertical_velocity.min(touchdown_velocity);
        match classify_landing(impact, s.last_forward_velocity, tuning) {
            Some(cue) if !s.animating => {
                cues.play(cue);
                s.animating = true;
            }
            Some(_) => {}
            None => s.animating = false,
        }
    }

    fn resolve_stance(
        &mut self,
        dt: f32,
        tuning: &MovementTuning,
        physics: &impl PhysicsQuery,
        mover: &mut impl CharacterMover,
    ) {
        let s = &mut self.state;
        let clear = probe_overhead_clear(physics, mover.position(), mover.height(), mover.radius());
        s.overhead_blocked = !clear;
        let t = dt * tuning.lerp_rate;

        if self.held.crouch || s.maneuver.is_sliding() {
            let old_height = mover.height();
            let new_height =
                approach_height(old_height, tuning.crouch_height, t, tuning.height_epsilon);
            mover.set_height(new_height);

            let shrunk = old_height - new_height;
            if shrunk > 0.0 && s.grounded {
                mover.move_by(Vec3::NEG_Y * shrunk / 2.0);
            }

            if s.sprinting && s.moving && !s.maneuver.is_sliding() {
                s.maneuver = Maneuver::Slide {
                    direction: s.horizontal_direction,
                };
                s.slide_timer = tuning.slide_duration;
                s.wall_run_timer = 0.0;
                debug!("Slide started: speed={:.2}", s.current_speed);
            }

            s.sprinting = false;
            s.crouching = true;
        } else if clear {
            let old_height = mover.height();
            let new_height =
                approach_height(old_height, tuning.stand_height, t, tuning.height_epsilon);
            mover.set_height(new_height);

            let grown = new_height - old_height;
            if grown > 0.0 {
                // Keep the feet planted while the capsule grows around its center
                mover.move_by(Vec3::Y * grown / 2.0);
            }

            s.crouching = false;
            s.sprinting = self.held.sprint;
        } else {
            s.crouching = true;
        }
    }

    fn update_ledge_grab(
        &mut self,
        tuning: &MovementTuning,
        physics: &impl PhysicsQuery,
        mover: &impl CharacterMover,
        cues: &mut impl CueSink,
    ) {
        let s = &mut self.state;
        if s.last_vertical_velocity >= 0.0
            || s.grounded
            || s.movement_locked
            || s.maneuver.is_ledge_grabbing()
        {
            return;
        }

        match probe_ledge(physics, mover.position(), mover.forward(), tuning) {
            LedgeProbe::Grab { anchor } => {
                s.maneuver = Maneuver::LedgeGrab { anchor };
                s.slide_timer = 0.0;
                s.wall_run_timer = 0.0;
                s.vertical_velocity = 0.0;
                s.animating = true;
                cues.play(AnimationCue::LedgeGrab);
                debug!("Ledge grabbed at {:?}", anchor);
            }
            LedgeProbe::Obstructed => {
                debug!("Obstacle in the way, cannot grab ledge");
            }
            LedgeProbe::NoSurface | LedgeProbe::NoFace => {}
        }
    }

    fn update_wall_bounce(
        &mut self,
        dt: f32,
        tuning: &MovementTuning,
        physics: &impl PhysicsQuery,
        mover: &mut impl CharacterMover,
    ) {
        let s = &mut self.state;
        s.wall_ahead = probe_wall_ahead(physics, mover.position(), mover.forward(), tuning);

        if let Some(mut pending) = s.pending_rotation {
            pending.progress += dt;
            let fraction = (pending.progress / tuning.wall_bounce_turn_time.max(f32::EPSILON)).min(1.0);
            mover.set_rotation(mover.rotation().slerp(pending.target, fraction));
            s.pending_rotation = (fraction < 1.0).then_some(pending);
        }
    }

    fn integrate_movement(&mut self, dt: f32, tuning: &MovementTuning, mover: &mut impl CharacterMover) {
        let s = &mut self.state;
        let wish = mover.forward() * self.held.axis.y + mover.right() * self.held.axis.x;

        if s.movement_locked || s.maneuver.is_ledge_grabbing() {
            s.horizontal_direction = Vec3::ZERO;
        } else if s.grounded {
            s.horizontal_direction = lerp_vec(s.horizontal_direction, wish, dt * tuning.lerp_rate);
        } else if let Maneuver::WallRun { direction, .. } = s.maneuver {
            s.horizontal_direction =
                lerp_vec(s.horizontal_direction, direction, dt * tuning.lerp_rate);
        } else if s.moving {
            s.horizontal_direction =
                lerp_vec(s.horizontal_direction, wish, dt * tuning.air_lerp_rate);
        }

        match s.maneuver {
            Maneuver::Slide { direction } => {
                mover.move_by(direction * s.current_speed * dt);
            }
            Maneuver::LedgeGrab { anchor } => {
                let target = anchor + Vec3::Y * tuning.ledge_mount_offset;
                let to_target = target - mover.position();
                let distance = to_target.length();
                if distance < tuning.ledge_release_distance {
                    s.maneuver = Maneuver::None;
                    s.animating = false;
                    debug!("Ledge mounted");
                } else {
                    let step = (tuning.ledge_homing_speed * dt).min(distance);
                    mover.move_by(to_target / distance * step);
                }
            }
            Maneuver::WallRun { .. } => {
                mover.move_by(s.horizontal_direction * s.current_speed * dt);
            }
            Maneuver::None => {
                if s.horizontal_direction.length() < tuning.input_threshold {
                    s.horizontal_direction =
                        move_towards(s.horizontal_direction, Vec3::ZERO, dt * tuning.lerp_rate);
                }
                mover.move_by(s.horizontal_direction * s.current_speed * dt);
            }
        }
    }
}

/// Exponential smoothing step with the blend factor clamped to [0, 1].
pub(crate) fn approach(current: f32, target: f32, t: f32) -> f32 {
    current + (target - current) * t.clamp(0.0, 1.0)
}

fn lerp_vec(current: Vec3, target: Vec3, t: f32) -> Vec3 {
    current.lerp(target, t.clamp(0.0, 1.0))
}

fn move_towards(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_delta || distance <= f32::EPSILON {
        target
    } else {
        current + delta / distance * max_delta
    }
}

/// Height smoothing that lands exactly on the target once within `epsilon`.
pub(crate) fn approach_height(current: f32, target: f32, t: f32, epsilon: f32) -> f32 {
    let next = approach(current, target, t);
    if (next - target).abs() <= epsilon {
        target
    } else {
        next
    }
}
