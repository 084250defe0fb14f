//! Debug domain: hotkeys, panel buttons and the info overlay.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::debug::state::{DebugAction, DebugState};
use crate::debug::ui::{
    DebugButton, DebugInfoOverlay, DebugStatusMessage, DebugUI, format_info,
    spawn_debug_info_overlay, spawn_debug_ui,
};
use crate::movement::{
    AnimationCueEvent, CharacterBody, LocomotionController, LocomotionSnapshot, MessageCueSink,
    Player,
};
use crate::respawn::{
    CheckpointRegistry, HeatMeter, RespawnReason, RespawnSequence, RespawnTuning,
    apply_respawn_actions, respawn_at,
};

/// Toggle debug UI with F1 or backtick key
pub(crate) fn toggle_debug_ui(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    existing_ui: Query<Entity, With<DebugUI>>,
) {
    let toggle = keyboard.just_pressed(KeyCode::F1) || keyboard.just_pressed(KeyCode::Backquote);
    if toggle {
        let visible = !debug_state.ui_visible;
        set_panel_visible(&mut commands, &mut debug_state, &existing_ui, visible);
    }
}

fn set_panel_visible(
    commands: &mut Commands,
    debug_state: &mut DebugState,
    existing_ui: &Query<Entity, With<DebugUI>>,
    visible: bool,
) {
    debug_state.ui_visible = visible;
    for entity in existing_ui.iter() {
        commands.entity(entity).despawn();
    }
    if visible {
        spawn_debug_ui(commands);
    }
}

/// Hotkeys and panel buttons both funnel into the same actions.
pub(crate) fn handle_debug_actions(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    tuning: Res<RespawnTuning>,
    registry: Option<Res<CheckpointRegistry>>,
    buttons: Query<(&DebugButton, &Interaction), Changed<Interaction>>,
    existing_ui: Query<Entity, With<DebugUI>>,
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
    let mut requested: Vec<DebugAction> = buttons
        .iter()
        .filter(|(_, interaction)| **interaction == Interaction::Pressed)
        .map(|(button, _)| button.action)
        .collect();
    if debug_state.ui_visible {
        requested.extend(keyboard.get_just_pressed().filter_map(|key| DebugAction::from_key(*key)));
    }

    for action in requested {
        match action {
            DebugAction::ToggleInfo => {
                debug_state.show_info = !debug_state.show_info;
            }
            DebugAction::Close => {
                set_panel_visible(&mut commands, &mut debug_state, &existing_ui, false);
            }
            DebugAction::WarpToPoint(index) => {
                let Ok((_, mut transform, mut body, mut controller, mut heat, sequence)) =
                    players.single_mut()
                else {
                    debug_state.set_message("No player", 2.0);
                    continue;
                };
                if !sequence.is_idle() {
                    debug_state.set_message("Respawn in progress", 2.0);
                    continue;
                }
                let Some(registry) = registry.as_deref() else {
                    warn!("[DEBUG] Warp requested but no checkpoint registry exists");
                    debug_state.set_message("No checkpoint registry", 2.0);
                    continue;
                };
                match respawn_at(
                    index,
                    registry,
                    &mut transform,
                    &mut body,
                    &mut controller,
                    &mut heat,
                ) {
                    Ok(_) => debug_state.set_message(format!("Warped to point {}", index), 2.0),
                    Err(diagnostic) => {
                        warn!("[DEBUG] Warp failed: {}", diagnostic);
                        debug_state.set_message(diagnostic.to_string(), 2.0);
                    }
                }
            }
            DebugAction::ForceDeath => {
                let Ok((entity, mut transform, mut body, mut controller, mut heat, mut sequence)) =
                    players.single_mut()
                else {
                    continue;
                };
                let mut actions = Vec::new();
                if sequence.begin(RespawnReason::Death, &tuning, &mut actions) {
                    apply_respawn_actions(
                        &actions,
                        &mut transform,
                        &mut body,
                        &mut controller,
                        &mut heat,
                        &mut MessageCueSink::new(entity, &mut cue_writer),
                    );
                    info!("[DEBUG] Forced death respawn");
                }
            }
            DebugAction::RefillHeat => {
                for (_, _, _, _, mut heat, _) in &mut players {
                    heat.refill();
                }
                debug_state.set_message("Heat refilled", 2.0);
                info!("[DEBUG] Heat refilled");
            }
        }
    }
}

pub(crate) fn update_status_message(
    time: Res<Time>,
    mut debug_state: ResMut<DebugState>,
    mut status_text: Query<&mut Text, With<DebugStatusMessage>>,
) {
    debug_state.tick_message(time.delta_secs());
    let message = debug_state
        .status_message
        .as_ref()
        .map(|(message, _)| message.as_str())
        .unwrap_or("");
    for mut text in &mut status_text {
        if **text != message {
            **text = message.to_string();
        }
    }
}

/// Update the debug info overlay with current player state
pub(crate) fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    registry: Option<Res<CheckpointRegistry>>,
    players: Query<
        (&Transform, &LocomotionSnapshot, &HeatMeter, &RespawnSequence),
        With<Player>,
    >,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    if existing_overlay.is_empty() {
        spawn_debug_info_overlay(&mut commands);
        return;
    }

    if let (Ok((transform, snapshot, heat, sequence)), Ok(mut text)) =
        (players.single(), overlay_query.single_mut())
    {
        **text = format_info(
            transform.translation,
            snapshot,
            heat,
            sequence,
            registry.as_deref(),
        );
    }
}
