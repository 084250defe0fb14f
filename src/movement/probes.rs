//! Movement domain: environment probes run by the locomotion tick.

use bevy::prelude::*;

use crate::movement::collaborators::{PhysicsQuery, SurfaceClass};
use crate::movement::components::WallSide;
use crate::movement::resources::MovementTuning;

/// Sphere cast down from the capsule's bottom sphere. Ground counts only when
/// it lies within `ground_check_distance` of the feet.
pub(crate) fn probe_grounded(
    physics: &impl PhysicsQuery,
    center: Vec3,
    height: f32,
    radius: f32,
    tuning: &MovementTuning,
) -> bool {
    let skin = tuning.ground_check_distance;
    let bottom = center - Vec3::Y * (height / 2.0 - radius).max(0.0);
    physics
        .sphere_cast(
            bottom + Vec3::Y * skin,
            radius,
            Vec3::NEG_Y,
            skin * 2.0,
            SurfaceClass::Ground,
        )
        .is_some()
}

/// Side-wall contact found by the left/right rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct WallProbe {
    pub side: WallSide,
    pub normal: Vec3,
}

impl WallProbe {
    const NONE: WallProbe = WallProbe {
        side: WallSide::None,
        normal: Vec3::ZERO,
    };
}

/// Right ray first; a hit there wins even if the left ray would also hit.
pub(crate) fn probe_walls(
    physics: &impl PhysicsQuery,
    position: Vec3,
    right: Vec3,
    tuning: &MovementTuning,
) -> WallProbe {
    if let Some(hit) = physics.raycast(position, right, tuning.wall_ray_distance, SurfaceClass::Wall) {
        return WallProbe {
            side: WallSide::Right,
            normal: -hit.normal,
        };
    }

    if let Some(hit) = physics.raycast(position, -right, tuning.wall_ray_distance, SurfaceClass::Wall) {
        return WallProbe {
            side: WallSide::Left,
            normal: hit.normal,
        };
    }

    WallProbe::NONE
}

/// Short forward ray used to decide whether a jump becomes a wall bounce.
pub(crate) fn probe_wall_ahead(
    physics: &impl PhysicsQuery,
    position: Vec3,
    forward: Vec3,
    tuning: &MovementTuning,
) -> bool {
    physics
        .raycast(
            position,
            forward,
            tuning.wall_bounce_probe_distance,
            SurfaceClass::Wall,
        )
        .is_some()
}

/// True when a sphere resting on top of the capsule touches nothing.
pub(crate) fn probe_overhead_clear(
    physics: &impl PhysicsQuery,
    center: Vec3,
    height: f32,
    radius: f32,
) -> bool {
    let check = center + Vec3::Y * (height / 2.0 + radius);
    !physics.overlap_sphere(check, radius, SurfaceClass::Solid)
}

/// Outcome of the three-stage ledge search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum LedgeProbe {
    /// The downward probe found no top surface
    NoSurface,
    /// Something sits between the head and the ledge top
    Obstructed,
    /// No front face to hold on to below the top surface
    NoFace,
    Grab { anchor: Vec3 },
}

pub(crate) fn probe_ledge(
    physics: &impl PhysicsQuery,
    position: Vec3,
    forward: Vec3,
    tuning: &MovementTuning,
) -> LedgeProbe {
    let forward = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
    if forward == Vec3::ZERO {
        return LedgeProbe::NoSurface;
    }
    let reach = forward * tuning.ledge_probe_reach;

    let down_start = position + Vec3::Y * tuning.ledge_probe_top + reach;
    let down_end = position + Vec3::Y * tuning.ledge_probe_bottom + reach;
    let Some(top) = physics.linecast(down_start, down_end, SurfaceClass::Ledge) else {
        return LedgeProbe::NoSurface;
    };

    let eye = position + Vec3::Y * tuning.ledge_obstruction_height;
    let to_top = top.point - eye;
    if physics
        .raycast(eye, to_top, position.distance(top.point), SurfaceClass::Ledge)
        .is_some()
    {
        return LedgeProbe::Obstructed;
    }

    let face_start = Vec3::new(position.x, top.point.y - tuning.ledge_face_drop, position.z);
    if physics
        .linecast(face_start, face_start + reach, SurfaceClass::Ledge)
        .is_none()
    {
        return LedgeProbe::NoFace;
    }

    LedgeProbe::Grab { anchor: top.point }
}
