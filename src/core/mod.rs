//! Core domain: game state, pause flow and the active control scheme.

mod resources;
mod state;
mod systems;

pub use resources::ControlScheme;
pub use state::GameState;

use bevy::prelude::*;

use crate::core::systems::{finish_boot, toggle_pause, track_control_scheme};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<ControlScheme>()
            .add_systems(PostStartup, finish_boot)
            .add_systems(PreUpdate, track_control_scheme)
            .add_systems(Update, toggle_pause);
    }
}
