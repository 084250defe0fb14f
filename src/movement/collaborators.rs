//! Movement domain: the capabilities the locomotion controller borrows for one tick.
//!
//! The controller never talks to the physics world or the transform directly.
//! Everything it needs goes through these traits, which keeps the state machine
//! testable against scripted fakes and lets the app plug in the avian adapters.

use bevy::prelude::*;

/// Collision surface classes a probe can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceClass {
    /// Floors and platforms the grounded check stands on
    Ground,
    /// Vertical surfaces that support wall-running and wall-bouncing
    Wall,
    /// Graspable ledge geometry
    Ledge,
    /// Anything the capsule collides with (overhead clearance)
    Solid,
}

/// A single probe hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    /// World-space contact point
    pub point: Vec3,
    /// Surface normal at the contact, pointing away from the surface
    pub normal: Vec3,
    /// Distance travelled along the probe before the hit
    pub distance: f32,
}

/// Spatial queries against the collision world.
///
/// Directions do not need to be normalized; implementations normalize them and
/// treat a zero direction as a miss.
pub trait PhysicsQuery {
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        surface: SurfaceClass,
    ) -> Option<ProbeHit>;

    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        surface: SurfaceClass,
    ) -> Option<ProbeHit>;

    fn overlap_sphere(&self, center: Vec3, radius: f32, surface: SurfaceClass) -> bool;

    /// Cast along the segment `start -> end`.
    fn linecast(&self, start: Vec3, end: Vec3, surface: SurfaceClass) -> Option<ProbeHit> {
        let delta = end - start;
        let length = delta.length();
        if length <= f32::EPSILON {
            return None;
        }
        self.raycast(start, delta / length, length, surface)
    }
}

/// Kinematic capsule the controller drives.
pub trait CharacterMover {
    /// Collision-aware translation. A disabled mover ignores the call.
    fn move_by(&mut self, delta: Vec3);
    /// Capsule center in world space
    fn position(&self) -> Vec3;
    /// Velocity observed over the previous tick
    fn velocity(&self) -> Vec3;
    fn radius(&self) -> f32;
    fn height(&self) -> f32;
    fn set_height(&mut self, height: f32);
    fn rotation(&self) -> Quat;
    fn set_rotation(&mut self, rotation: Quat);
    fn is_enabled(&self) -> bool;

    /// Body forward on the horizontal plane (-Z in local space).
    fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }
}

/// Named animation triggers. Fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationCue {
    Jump,
    LandSoft,
    LandHard,
    Roll,
    WallBounce,
    LedgeGrab,
    FadeOut,
    FadeIn,
    HeatFadeOut,
    HeatFadeIn,
}

impl AnimationCue {
    /// Trigger name as authored on the camera/UI animators.
    pub fn trigger_name(self) -> &'static str {
        match self {
            AnimationCue::Jump => "CameraJumpTrigger",
            AnimationCue::LandSoft => "CameraLandTrigger",
            AnimationCue::LandHard => "CameraHardLandTrigger",
            AnimationCue::Roll => "CameraRollTrigger",
            AnimationCue::WallBounce => "CameraWallBounceTrigger",
            AnimationCue::LedgeGrab => "CameraLedgeGrabTrigger",
            AnimationCue::FadeOut => "FadeOut",
            AnimationCue::FadeIn => "FadeIn",
            AnimationCue::HeatFadeOut => "HeatFadeOut",
            AnimationCue::HeatFadeIn => "HeatFadeIn",
        }
    }
}

pub trait CueSink {
    fn play(&mut self, cue: AnimationCue);
}

impl CueSink for Vec<AnimationCue> {
    fn play(&mut self, cue: AnimationCue) {
        self.push(cue);
    }
}

/// Yaw-only rotation whose forward (-Z) points along `direction`.
pub fn facing_rotation(direction: Vec3) -> Quat {
    Quat::from_rotation_y(f32::atan2(-direction.x, -direction.z))
}
