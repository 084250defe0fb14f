//! Look domain: first-person camera rig with freelook, tilt and head-bob.

mod rig;
mod systems;

pub use rig::{LookRig, LookTuning};

use bevy::prelude::*;
use bevy::transform::TransformSystems;

use crate::core::GameState;
use crate::look::systems::{apply_look, attach_look_rig, grab_cursor, release_cursor};
use crate::movement::LocomotionSet;

pub struct LookPlugin;

impl Plugin for LookPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LookTuning>()
            .add_systems(OnEnter(GameState::Playing), grab_cursor)
            .add_systems(OnEnter(GameState::Paused), release_cursor)
            .add_systems(Update, attach_look_rig)
            .add_systems(
                PostUpdate,
                apply_look
                    .after(LocomotionSet::Late)
                    .before(TransformSystems::Propagate)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
