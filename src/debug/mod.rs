//! Debug domain: checkpoint warps, forced respawns and a locomotion overlay.

mod state;
mod systems;
mod ui;

use bevy::prelude::*;

use crate::core::GameState;
use crate::debug::state::DebugState;
use crate::debug::systems::{
    handle_debug_actions, toggle_debug_ui, update_debug_info_overlay, update_status_message,
};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>().add_systems(
            Update,
            (
                toggle_debug_ui,
                handle_debug_actions,
                update_status_message,
                update_debug_info_overlay,
            )
                .chain()
                .run_if(in_state(GameState::Playing).or(in_state(GameState::Paused))),
        );
    }
}
