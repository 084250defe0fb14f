//! Movement domain: first-person locomotion, probes and the avian adapters.

mod adapters;
mod bootstrap;
mod collaborators;
mod components;
mod controller;
#[cfg(feature = "dev-tools")]
mod dev;
mod edges;
mod events;
mod headbob;
mod landing;
mod probes;
mod resources;
mod systems;

pub use adapters::MessageCueSink;
pub use collaborators::{
    AnimationCue, CharacterMover, CueSink, PhysicsQuery, ProbeHit, SurfaceClass, facing_rotation,
};
pub use components::{
    CharacterBody, GameLayer, Ground, Ledge, LocomotionMode, LocomotionSnapshot, Maneuver,
    MovementState, PendingRotation, Player, Wall, WallSide,
};
pub use controller::{HeldInputs, LocomotionController};
pub use events::AnimationCueEvent;
pub use headbob::HeadBob;
pub use landing::classify_landing;
pub use resources::{ButtonEdge, MovementInput, MovementTuning};

use bevy::prelude::*;

use crate::core::GameState;
use crate::movement::bootstrap::bootstrap_player;
use crate::movement::systems::{
    dispatch_input, late_locomotion, log_animation_cues, read_input, tick_locomotion,
};

/// Ordering anchors other domains schedule against.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocomotionSet {
    /// Input sampling, edge dispatch and the tick (Update)
    Tick,
    /// Late sampling and snapshot publishing (PostUpdate)
    Late,
}

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .add_message::<AnimationCueEvent>()
            .add_systems(OnEnter(GameState::Playing), bootstrap_player)
            .add_systems(
                Update,
                (read_input, dispatch_input, tick_locomotion)
                    .chain()
                    .in_set(LocomotionSet::Tick)
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                PostUpdate,
                late_locomotion
                    .in_set(LocomotionSet::Late)
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(PostUpdate, log_animation_cues);

        #[cfg(feature = "dev-tools")]
        app.add_systems(Startup, dev::spawn_test_course);
    }
}
