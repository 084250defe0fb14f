//! Movement domain: the per-frame locomotion tick.

use avian3d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::adapters::{KinematicMover, MessageCueSink, SpatialPhysicsQuery};
use crate::movement::events::AnimationCueEvent;
use crate::movement::{CharacterBody, LocomotionController, MovementTuning, Player};

pub(crate) fn tick_locomotion(
    mut commands: Commands,
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    spatial_query: SpatialQuery,
    mut players: Query<
        (
            Entity,
            &mut Transform,
            &mut CharacterBody,
            &mut LocomotionController,
        ),
        With<Player>,
    >,
    mut cue_writer: MessageWriter<AnimationCueEvent>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    for (entity, mut transform, mut body, mut controller) in &mut players {
        let start = transform.translation;
        let start_height = body.height;

        {
            let physics = SpatialPhysicsQuery::new(&spatial_query, entity);
            let mut mover = KinematicMover::new(&spatial_query, entity, &mut transform, &mut body);
            let mut cues = MessageCueSink::new(entity, &mut cue_writer);
            controller.tick(dt, &tuning, &physics, &mut mover, &mut cues);
        }

        body.velocity = (transform.translation - start) / dt;
        // Resized colliders land before the next frame's probes
        if body.height != start_height {
            commands.entity(entity).insert(body.collider());
        }
    }
}
