//! Movement domain: player bootstrap at the level start.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::core::ControlScheme;
use crate::movement::{
    CharacterBody, GameLayer, LocomotionController, LocomotionSnapshot, MovementTuning, Player,
};
use crate::respawn::CheckpointRegistry;

/// Spawn the player capsule at respawn point 0.
/// This system runs on entering GameState::Playing, so it also fires when
/// resuming from pause and must not spawn twice.
pub(crate) fn bootstrap_player(
    mut commands: Commands,
    tuning: Res<MovementTuning>,
    scheme: Res<ControlScheme>,
    registry: Option<Res<CheckpointRegistry>>,
    existing_player: Query<Entity, With<Player>>,
) {
    if !existing_player.is_empty() {
        return;
    }

    let spawn_point = match registry.as_ref().and_then(|r| r.respawn_points.first().copied()) {
        Some(point) => point,
        None => {
            warn!("No level start registered, spawning player at the origin");
            Vec3::Y * tuning.stand_height
        }
    };

    let body = CharacterBody::new(tuning.capsule_radius, tuning.stand_height);

    info!(
        "Spawning player: position={:?}, scheme={}, height={}",
        spawn_point,
        scheme.name(),
        tuning.stand_height
    );

    commands.spawn((
        // Identity & Locomotion
        (
            Player,
            LocomotionController::new(*scheme),
            LocomotionSnapshot::default(),
        ),
        Transform::from_translation(spawn_point),
        Visibility::default(),
        // Physics
        (
            RigidBody::Kinematic,
            body.collider(),
            body,
            CollisionEventsEnabled,
            CollisionLayers::new(
                GameLayer::Player,
                [
                    GameLayer::Default,
                    GameLayer::Ground,
                    GameLayer::Wall,
                    GameLayer::Ledge,
                    GameLayer::Sensor,
                ],
            ),
        ),
    ));
}
