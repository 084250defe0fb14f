//! Movement domain: components and physics layers for locomotion.

use avian3d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Floors and platforms
    Ground,
    /// Wall-runnable and wall-bounceable surfaces
    Wall,
    /// Graspable ledges
    Ledge,
    /// Player capsule
    Player,
    /// Trigger volumes (death zones, checkpoints, heat sources) - never block movement
    Sensor,
}

#[derive(Component, Debug)]
pub struct Player;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// Marker for ledge colliders
#[derive(Component, Debug)]
pub struct Ledge;

/// Primary locomotion mode. Exactly one is active per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LocomotionMode {
    #[default]
    Walk,
    Sprint,
    Crouch,
    Slide,
    WallRun,
    LedgeGrab,
    Airborne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WallSide {
    #[default]
    None,
    Left,
    Right,
}

/// Timed special moves. Holding them in one enum keeps them mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Maneuver {
    #[default]
    None,
    /// Travel direction is frozen at slide entry
    Slide { direction: Vec3 },
    /// Wall-parallel travel direction and the facing it turns toward
    WallRun { direction: Vec3, facing: Quat },
    /// World point of the grabbed ledge
    LedgeGrab { anchor: Vec3 },
}

impl Maneuver {
    pub fn is_sliding(&self) -> bool {
        matches!(self, Maneuver::Slide { .. })
    }

    pub fn is_wall_running(&self) -> bool {
        matches!(self, Maneuver::WallRun { .. })
    }

    pub fn is_ledge_grabbing(&self) -> bool {
        matches!(self, Maneuver::LedgeGrab { .. })
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Maneuver::None)
    }
}

/// Timed reorientation started by a wall bounce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingRotation {
    pub target: Quat,
    /// Seconds elapsed since the turn started
    pub progress: f32,
}

/// Everything the controller remembers between ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementState {
    pub vertical_velocity: f32,
    pub horizontal_direction: Vec3,
    pub current_speed: f32,
    pub mode: LocomotionMode,
    pub maneuver: Maneuver,

    /// Sampled once at the start of each tick
    pub grounded: bool,
    pub crouching: bool,
    pub sprinting: bool,
    pub moving: bool,
    /// Latch preventing a second landing/jump cue within one landing
    pub animating: bool,
    /// Set by the respawn sequence while the body is disabled
    pub movement_locked: bool,

    pub slide_timer: f32,
    pub wall_run_timer: f32,
    pub wall_run_cooldown: f32,
    /// Latch: a fresh wall contact was present at the last jump
    pub may_wall_run: bool,

    pub wall_side: WallSide,
    /// Oriented toward the body's right, so `Vec3::Y.cross(wall_normal)` runs forward along the wall
    pub wall_normal: Vec3,
    pub wall_ahead: bool,
    pub overhead_blocked: bool,

    pub last_vertical_velocity: f32,
    pub last_forward_velocity: f32,
    pub pending_rotation: Option<PendingRotation>,
}

impl Default for MovementState {
    fn default() -> Self {
        Self {
            vertical_velocity: 0.0,
            horizontal_direction: Vec3::ZERO,
            current_speed: 0.0,
            mode: LocomotionMode::Walk,
            maneuver: Maneuver::None,
            grounded: false,
            crouching: false,
            sprinting: false,
            moving: false,
            animating: false,
            movement_locked: false,
            slide_timer: 0.0,
            wall_run_timer: 0.0,
            wall_run_cooldown: 0.0,
            may_wall_run: false,
            wall_side: WallSide::None,
            wall_normal: Vec3::ZERO,
            wall_ahead: false,
            overhead_blocked: false,
            last_vertical_velocity: 0.0,
            last_forward_velocity: 0.0,
            pending_rotation: None,
        }
    }
}

impl MovementState {
    pub fn ledge_anchor(&self) -> Option<Vec3> {
        match self.maneuver {
            Maneuver::LedgeGrab { anchor } => Some(anchor),
            _ => None,
        }
    }

    pub fn wall_detected(&self) -> bool {
        self.wall_side != WallSide::None
    }
}

/// Kinematic capsule driven by the controller.
#[derive(Component, Debug, Clone)]
pub struct CharacterBody {
    pub radius: f32,
    pub height: f32,
    pub enabled: bool,
    /// Displacement over the previous tick divided by its duration
    pub velocity: Vec3,
}

impl CharacterBody {
    pub fn new(radius: f32, height: f32) -> Self {
        Self {
            radius,
            height,
            enabled: true,
            velocity: Vec3::ZERO,
        }
    }

    /// Capsule collider matching the current height.
    pub fn collider(&self) -> Collider {
        Collider::capsule(self.radius, (self.height - 2.0 * self.radius).max(0.0))
    }
}

/// Read-only view of the controller published once per tick for the camera
/// and other dependents.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct LocomotionSnapshot {
    pub mode: LocomotionMode,
    pub grounded: bool,
    pub moving: bool,
    pub freelooking: bool,
    pub sliding: bool,
    pub wall_running: bool,
    pub wall_side: WallSide,
    pub speed: f32,
    /// Head-bob offset for the eyes, in head-local units
    pub eye_offset: Vec2,
}
