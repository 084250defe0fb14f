//! Respawn domain: trigger handling, heat drain and sequence application.

use avian3d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::movement::{
    AnimationCueEvent, CharacterBody, CueSink, LocomotionController, MessageCueSink, Player,
};
use crate::respawn::checkpoints::CheckpointRegistry;
use crate::respawn::components::{CheckpointVolume, DeathZone, ExposureZone, HeatSource};
use crate::respawn::heat::HeatMeter;
use crate::respawn::sequence::{
    RespawnAction, RespawnDiagnostic, RespawnReason, RespawnSequence, RespawnTuning,
};

/// Pick out the `(volume, player)` pair from a collision, if it is one.
pub(crate) fn volume_contact(
    collider1: Entity,
    collider2: Entity,
    is_volume: impl Fn(Entity) -> bool,
    player: Entity,
) -> Option<Entity> {
    if is_volume(collider1) && collider2 == player {
        Some(collider1)
    } else if is_volume(collider2) && collider1 == player {
        Some(collider2)
    } else {
        None
    }
}

pub(crate) fn attach_respawn_state(
    mut commands: Commands,
    tuning: Res<RespawnTuning>,
    players: Query<Entity, Added<Player>>,
) {
    for player in &players {
        commands
            .entity(player)
            .insert((RespawnSequence::default(), HeatMeter::new(tuning.heat_max)));
    }
}

/// Applies sequence side effects to the player's body and controller.
pub(crate) fn apply_respawn_actions(
    actions: &[RespawnAction],
    transform: &mut Transform,
    body: &mut CharacterBody,
    controller: &mut LocomotionController,
    heat: &mut HeatMeter,
    cues: &mut impl CueSink,
) {
    for action in actions {
        match *action {
            RespawnAction::PlayCue(cue) => cues.play(cue),
            RespawnAction::SetMoverEnabled(enabled) => body.enabled = enabled,
            RespawnAction::LockMovement(locked) => controller.state.movement_locked = locked,
            RespawnAction::Teleport(point) => {
                place_at(point, transform, body, controller);
                heat.reset_exposure();
            }
            RespawnAction::RefillHeat => heat.refill(),
        }
    }
}

fn place_at(
    point: Vec3,
    transform: &mut Transform,
    body: &mut CharacterBody,
    controller: &mut LocomotionController,
) {
    transform.translation = point;
    body.velocity = Vec3::ZERO;
    controller.reset_motion(point);
}

pub(crate) fn detect_death_zones(
    mut collision_events: MessageReader<CollisionStart>,
    tuning: Res<RespawnTuning>,
    death_zones: Query<(), With<DeathZone>>,
    mut players: Query<
        (
            Entity,
            &mut Transform,
            &mut CharacterBody,
            &mut LocomotionController,
            &mut HeatMeter,
            &mut RespawnSequence,
        ),
        With<Player>,
    >,
    mut cue_writer: MessageWriter<AnimationCueEvent>,
) {
    let Ok((entity, mut transform, mut body, mut controller, mut heat, mut sequence)) =
        players.single_mut()
    else {
        // Consume events if no player
        for _ in collision_events.read() {}
        return;
    };

    let mut actions = Vec::new();
    for event in collision_events.read() {
        let touched = volume_contact(
            event.collider1,
            event.collider2,
            |e| death_zones.contains(e),
            entity,
        );
        if touched.is_some() {
            sequence.begin(RespawnReason::Death, &tuning, &mut actions);
        }
    }

    apply_respawn_actions(
        &actions,
        &mut transform,
        &mut body,
        &mut controller,
        &mut heat,
        &mut MessageCueSink::new(entity, &mut cue_writer),
    );
}

pub(crate) fn track_checkpoints(
    mut collision_events: MessageReader<CollisionStart>,
    registry: Option<ResMut<CheckpointRegistry>>,
    checkpoints: Query<&CheckpointVolume>,
    players: Query<Entity, With<Player>>,
) {
    let Ok(player) = players.single() else {
        for _ in collision_events.read() {}
        return;
    };
    let Some(mut registry) = registry else {
        for event in collision_events.read() {
            if volume_contact(
                event.collider1,
                event.collider2,
                |e| checkpoints.contains(e),
                player,
            )
            .is_some()
            {
                warn!("Checkpoint crossed but no checkpoint registry exists");
            }
        }
        return;
    };

    for event in collision_events.read() {
        let Some(volume) = volume_contact(
            event.collider1,
            event.collider2,
            |e| checkpoints.contains(e),
            player,
        ) else {
            continue;
        };
        if let Ok(checkpoint) = checkpoints.get(volume) {
            registry.reach(checkpoint.ordinal);
        }
    }
}

pub(crate) fn track_heat_zones(
    mut collision_start: MessageReader<CollisionStart>,
    mut collision_end: MessageReader<CollisionEnd>,
    heat_sources: Query<(), With<HeatSource>>,
    exposure_zones: Query<(), With<ExposureZone>>,
    mut players: Query<(Entity, &mut HeatMeter), With<Player>>,
) {
    let Ok((player, mut heat)) = players.single_mut() else {
        for _ in collision_start.read() {}
        for _ in collision_end.read() {}
        return;
    };

    for event in collision_start.read() {
        let (a, b) = (event.collider1, event.collider2);
        if volume_contact(a, b, |e| heat_sources.contains(e), player).is_some() {
            heat.warming += 1;
            debug!("Entered heat source ({} active)", heat.warming);
        }
        if volume_contact(a, b, |e| exposure_zones.contains(e), player).is_some() {
            heat.toggle_exposure();
        }
    }

    for event in collision_end.read() {
        let (a, b) = (event.collider1, event.collider2);
        if volume_contact(a, b, |e| heat_sources.contains(e), player).is_some() {
            heat.warming = heat.warming.saturating_sub(1);
            debug!("Left heat source ({} active)", heat.warming);
        }
    }
}

/// Drain or warm the meter; an empty meter starts the heat respawn.
pub(crate) fn update_heat(
    time: Res<Time>,
    tuning: Res<RespawnTuning>,
    mut players: Query<
        (
            Entity,
            &mut Transform,
            &mut CharacterBody,
            &mut LocomotionController,
            &mut HeatMeter,
            &mut RespawnSequence,
        ),
        With<Player>,
    >,
    mut cue_writer: MessageWriter<AnimationCueEvent>,
) {
    let dt = time.delta_secs();
    for (entity, mut transform, mut body, mut controller, mut heat, mut sequence) in &mut players {
        // The body is frozen while a respawn runs
        if !sequence.is_idle() {
            continue;
        }

        if heat.tick(dt, &tuning) {
            info!("Heat depleted");
            let mut actions = Vec::new();
            sequence.begin(RespawnReason::Heat, &tuning, &mut actions);
            apply_respawn_actions(
                &actions,
                &mut transform,
                &mut body,
                &mut controller,
                &mut heat,
                &mut MessageCueSink::new(entity, &mut cue_writer),
            );
        }
    }
}

pub(crate) fn advance_respawn(
    time: Res<Time>,
    tuning: Res<RespawnTuning>,
    registry: Option<Res<CheckpointRegistry>>,
    mut players: Query<
        (
            Entity,
            &mut Transform,
            &mut CharacterBody,
            &mut LocomotionController,
            &mut HeatMeter,
            &mut RespawnSequence,
        ),
        With<Player>,
    >,
    mut cue_writer: MessageWriter<AnimationCueEvent>,
) {
    let dt = time.delta_secs();
    for (entity, mut transform, mut body, mut controller, mut heat, mut sequence) in &mut players {
        if sequence.is_idle() {
            continue;
        }

        let mut actions = Vec::new();
        sequence.advance(dt, &tuning, registry.as_deref(), &mut actions);
        apply_respawn_actions(
            &actions,
            &mut transform,
            &mut body,
            &mut controller,
            &mut heat,
            &mut MessageCueSink::new(entity, &mut cue_writer),
        );
    }
}

/// Warp straight to a registered point without touching `current_index`.
pub fn respawn_at(
    index: usize,
    registry: &CheckpointRegistry,
    transform: &mut Transform,
    body: &mut CharacterBody,
    controller: &mut LocomotionController,
    heat: &mut HeatMeter,
) -> Result<Vec3, RespawnDiagnostic> {
    let point = registry.point_at(index)?;
    place_at(point, transform, body, controller);
    heat.reset_exposure();
    info!("Warped to respawn point {} at {:?}", index, point);
    Ok(point)
}
