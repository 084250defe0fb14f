//! Debug domain: UI components and layout helpers.

use bevy::prelude::*;

use crate::debug::state::{DebugAction, WARP_SLOTS};
use crate::movement::LocomotionSnapshot;
use crate::respawn::{CheckpointRegistry, HeatMeter, RespawnSequence};

/// Marker for the debug UI root
#[derive(Component, Debug)]
pub struct DebugUI;

/// Marker for the locomotion info overlay
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;

/// Marker for status message text
#[derive(Component, Debug)]
pub struct DebugStatusMessage;

/// Debug panel button
#[derive(Component, Debug)]
pub struct DebugButton {
    pub action: DebugAction,
}

pub(crate) fn spawn_debug_ui(commands: &mut Commands) {
    let bg_color = Color::srgba(0.1, 0.1, 0.15, 0.95);
    let button_color = Color::srgb(0.2, 0.2, 0.28);
    let text_color = Color::srgb(0.9, 0.9, 0.9);
    let title_color = Color::srgb(0.95, 0.55, 0.25);
    let muted_text = Color::srgb(0.6, 0.6, 0.7);

    commands
        .spawn((
            DebugUI,
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(20.0),
                top: Val::Px(20.0),
                width: Val::Px(240.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(12.0)),
                row_gap: Val::Px(6.0),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(bg_color),
            BorderColor::all(Color::srgb(0.45, 0.3, 0.2)),
            ZIndex(500),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("DEBUG"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(title_color),
            ));

            parent.spawn((
                Text::new("F1 or ` to toggle"),
                TextFont {
                    font_size: 11.0,
                    ..default()
                },
                TextColor(muted_text),
            ));

            parent.spawn((
                DebugStatusMessage,
                Text::new(""),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(Color::srgb(0.5, 0.9, 0.5)),
            ));

            spawn_section_header(parent, "Warp", title_color);
            for index in 0..WARP_SLOTS {
                spawn_debug_button(
                    parent,
                    DebugAction::WarpToPoint(index),
                    button_color,
                    text_color,
                );
            }

            spawn_section_header(parent, "Player", title_color);
            for action in [
                DebugAction::ForceDeath,
                DebugAction::RefillHeat,
                DebugAction::ToggleInfo,
                DebugAction::Close,
            ] {
                spawn_debug_button(parent, action, button_color, text_color);
            }
        });
}

fn spawn_section_header(parent: &mut ChildSpawnerCommands, title: &str, color: Color) {
    parent.spawn((
        Text::new(title),
        TextFont {
            font_size: 13.0,
            ..default()
        },
        TextColor(color),
        Node {
            margin: UiRect::top(Val::Px(6.0)),
            ..default()
        },
    ));
}

fn spawn_debug_button(
    parent: &mut ChildSpawnerCommands,
    action: DebugAction,
    bg: Color,
    text_color: Color,
) {
    parent
        .spawn((
            DebugButton { action },
            Button,
            Node {
                padding: UiRect::axes(Val::Px(8.0), Val::Px(4.0)),
                ..default()
            },
            BackgroundColor(bg),
        ))
        .with_child((
            Text::new(action.label()),
            TextFont {
                font_size: 12.0,
                ..default()
            },
            TextColor(text_color),
        ));
}

pub(crate) fn spawn_debug_info_overlay(commands: &mut Commands) {
    commands.spawn((
        DebugInfoOverlay,
        Text::new("Loading..."),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            bottom: Val::Px(20.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ZIndex(500),
    ));
}

pub(crate) fn format_info(
    position: Vec3,
    snapshot: &LocomotionSnapshot,
    heat: &HeatMeter,
    sequence: &RespawnSequence,
    registry: Option<&CheckpointRegistry>,
) -> String {
    let checkpoint = match registry {
        Some(registry) => format!("{}/{}", registry.current_index, registry.len().saturating_sub(1)),
        None => "none".to_string(),
    };
    format!(
        "Pos: ({:.1}, {:.1}, {:.1})\nMode: {:?}\nSpeed: {:.2}\nGrounded: {}\nHeat: {:.0}%{}\nCheckpoint: {}\nRespawn: {:?}",
        position.x,
        position.y,
        position.z,
        snapshot.mode,
        snapshot.speed,
        snapshot.grounded,
        heat.fraction() * 100.0,
        if heat.exposed { " (cold)" } else { "" },
        checkpoint,
        sequence.phase(),
    )
}
