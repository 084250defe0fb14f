//! UI domain: in-game HUD and tutorial tooltips.

mod hud_heat;
mod tooltips;

pub use tooltips::TooltipTable;
#[cfg(feature = "dev-tools")]
pub use tooltips::TooltipVolume;

use bevy::prelude::*;

use crate::core::GameState;
use crate::ui::hud_heat::{spawn_heat_bar_ui, update_heat_bar};
use crate::ui::tooltips::{
    TooltipPanel, spawn_tooltip_panel, track_tooltip_volumes, update_tooltip_panel,
};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TooltipTable>()
            .init_resource::<TooltipPanel>()
            .add_systems(Startup, (spawn_heat_bar_ui, spawn_tooltip_panel))
            .add_systems(
                Update,
                (
                    update_heat_bar,
                    track_tooltip_volumes.run_if(in_state(GameState::Playing)),
                    update_tooltip_panel,
                )
                    .chain(),
            );
    }
}
