//! Respawn domain: checkpoints, death and heat respawns.

mod checkpoints;
mod components;
mod heat;
mod sequence;
mod systems;
#[cfg(test)]
mod tests;

pub use checkpoints::CheckpointRegistry;
pub use components::{CheckpointVolume, DeathZone, ExposureZone, HeatSource};
pub use heat::HeatMeter;
pub use sequence::{
    RespawnAction, RespawnDiagnostic, RespawnPhase, RespawnReason, RespawnSequence, RespawnTuning,
};
pub use systems::respawn_at;
pub(crate) use systems::volume_contact;
#[cfg(feature = "dev-tools")]
pub(crate) use systems::apply_respawn_actions;

use bevy::prelude::*;

use crate::core::GameState;
use crate::movement::LocomotionSet;
use crate::respawn::systems::{
    advance_respawn, attach_respawn_state, detect_death_zones, track_checkpoints,
    track_heat_zones, update_heat,
};

pub struct RespawnPlugin;

impl Plugin for RespawnPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RespawnTuning>()
            .add_systems(Update, attach_respawn_state)
            .add_systems(
                Update,
                (
                    track_checkpoints,
                    track_heat_zones,
                    detect_death_zones,
                    update_heat,
                    advance_respawn,
                )
                    .chain()
                    .after(LocomotionSet::Tick)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
