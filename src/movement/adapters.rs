//! Movement domain: avian-backed implementations of the controller collaborators.

use avian3d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::collaborators::{
    AnimationCue, CharacterMover, CueSink, PhysicsQuery, ProbeHit, SurfaceClass,
};
use crate::movement::components::{CharacterBody, GameLayer};
use crate::movement::events::AnimationCueEvent;

/// Gap kept between the capsule and whatever it slides against.
const SKIN_WIDTH: f32 = 0.01;

/// Layers a probe against `surface` may hit.
pub fn surface_mask(surface: SurfaceClass) -> LayerMask {
    match surface {
        SurfaceClass::Ground => GameLayer::Ground.into(),
        SurfaceClass::Wall => GameLayer::Wall.into(),
        SurfaceClass::Ledge => GameLayer::Ledge.into(),
        SurfaceClass::Solid => [
            GameLayer::Default,
            GameLayer::Ground,
            GameLayer::Wall,
            GameLayer::Ledge,
        ]
        .into(),
    }
}

/// Spatial queries that never see the player's own collider.
pub struct SpatialPhysicsQuery<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    player: Entity,
}

impl<'a, 'w, 's> SpatialPhysicsQuery<'a, 'w, 's> {
    pub fn new(spatial_query: &'a SpatialQuery<'w, 's>, player: Entity) -> Self {
        Self {
            spatial_query,
            player,
        }
    }

    fn filter(&self, surface: SurfaceClass) -> SpatialQueryFilter {
        SpatialQueryFilter::from_mask(surface_mask(surface)).with_excluded_entities([self.player])
    }
}

impl PhysicsQuery for SpatialPhysicsQuery<'_, '_, '_> {
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        surface: SurfaceClass,
    ) -> Option<ProbeHit> {
        let direction = Dir3::new(direction).ok()?;
        let hit = self.spatial_query.cast_ray(
            origin,
            direction,
            max_distance,
            true,
            &self.filter(surface),
        )?;
        Some(ProbeHit {
            point: origin + *direction * hit.distance,
            normal: hit.normal,
            distance: hit.distance,
        })
    }

    fn sphere_cast(
        &self,
        origin: Vec3,
        radius: f32,
        direction: Vec3,
        max_distance: f32,
        surface: SurfaceClass,
    ) -> Option<ProbeHit> {
        let direction = Dir3::new(direction).ok()?;
        let hit = self.spatial_query.cast_shape(
            &Collider::sphere(radius),
            origin,
            Quat::IDENTITY,
            direction,
            &ShapeCastConfig::from_max_distance(max_distance),
            &self.filter(surface),
        )?;
        Some(ProbeHit {
            point: hit.point1,
            normal: hit.normal1,
            distance: hit.distance,
        })
    }

    fn overlap_sphere(&self, center: Vec3, radius: f32, surface: SurfaceClass) -> bool {
        !self
            .spatial_query
            .shape_intersections(
                &Collider::sphere(radius),
                center,
                Quat::IDENTITY,
                &self.filter(surface),
            )
            .is_empty()
    }
}

/// Kinematic capsule mover. Moves are swept against solid geometry and the
/// remainder slides along the first surface hit.
pub struct KinematicMover<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    player: Entity,
    transform: &'a mut Transform,
    body: &'a mut CharacterBody,
}

impl<'a, 'w, 's> KinematicMover<'a, 'w, 's> {
    pub fn new(
        spatial_query: &'a SpatialQuery<'w, 's>,
        player: Entity,
        transform: &'a mut Transform,
        body: &'a mut CharacterBody,
    ) -> Self {
        Self {
            spatial_query,
            player,
            transform,
            body,
        }
    }

    /// Sweep the capsule along `delta` and return how far it may travel.
    fn sweep(&self, delta: Vec3) -> (Vec3, Option<Vec3>) {
        let Ok((direction, distance)) = Dir3::new_and_length(delta) else {
            return (Vec3::ZERO, None);
        };

        let config = ShapeCastConfig {
            ignore_origin_penetration: true,
            ..ShapeCastConfig::from_max_distance(distance + SKIN_WIDTH)
        };
        let filter = SpatialQueryFilter::from_mask(surface_mask(SurfaceClass::Solid))
            .with_excluded_entities([self.player]);

        match self.spatial_query.cast_shape(
            &self.body.collider(),
            self.transform.translation,
            Quat::IDENTITY,
            direction,
            &config,
            &filter,
        ) {
            Some(hit) => {
                let allowed = (hit.distance - SKIN_WIDTH).clamp(0.0, distance);
                (*direction * allowed, Some(hit.normal1))
            }
            None => (delta, None),
        }
    }
}

impl CharacterMover for KinematicMover<'_, '_, '_> {
    fn move_by(&mut self, delta: Vec3) {
        if !self.body.enabled {
            return;
        }

        let (travelled, normal) = self.sweep(delta);
        self.transform.translation += travelled;

        if let Some(normal) = normal {
            let remaining = delta - travelled;
            let slide = remaining - normal * remaining.dot(normal);
            let (slid, _) = self.sweep(slide);
            self.transform.translation += slid;
        }
    }

    fn position(&self) -> Vec3 {
        self.transform.translation
    }

    fn velocity(&self) -> Vec3 {
        self.body.velocity
    }

    fn radius(&self) -> f32 {
        self.body.radius
    }

    fn height(&self) -> f32 {
        self.body.height
    }

    fn set_height(&mut self, height: f32) {
        self.body.height = height;
    }

    fn rotation(&self) -> Quat {
        self.transform.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation;
    }

    fn is_enabled(&self) -> bool {
        self.body.enabled
    }
}

/// Forwards cues to the `AnimationCueEvent` message queue.
pub struct MessageCueSink<'a, 'w> {
    entity: Entity,
    writer: &'a mut MessageWriter<'w, AnimationCueEvent>,
}

impl<'a, 'w> MessageCueSink<'a, 'w> {
    pub fn new(entity: Entity, writer: &'a mut MessageWriter<'w, AnimationCueEvent>) -> Self {
        Self { entity, writer }
    }
}

impl CueSink for MessageCueSink<'_, '_> {
    fn play(&mut self, cue: AnimationCue) {
        self.writer.write(AnimationCueEvent {
            entity: self.entity,
            cue,
        });
    }
}
