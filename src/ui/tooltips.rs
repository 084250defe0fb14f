//! UI domain: tutorial tooltips shown while the player stands in a tooltip volume.

use avian3d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::Player;
use crate::respawn::volume_contact;

/// Sensor volume that shows tooltip `index` while the player is inside.
#[derive(Component, Debug, Clone, Copy)]
pub struct TooltipVolume {
    pub index: usize,
}

/// Tooltip texts by volume index, loaded from tooltips.ron.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipTable {
    pub texts: Vec<String>,
    /// Shown for an index with no text
    pub fallback: String,
}

impl Default for TooltipTable {
    fn default() -> Self {
        let texts = [
            "Press Space or the A button to jump.",
            "Press Ctrl, C or the B button to crouch under low ceilings.",
            "Jump toward a ledge to grab it and pull yourself up.",
            "Hold Shift or click the left stick to sprint. Crouch while sprinting to slide under obstacles.",
            "Jump at a wall, then press jump again in the air to hop off it.",
            "Sprint and jump alongside a wall, then press jump again in the air to run along it.",
            "It's cold out there. Find a fire to warm up before you freeze.",
        ];
        Self {
            texts: texts.into_iter().map(String::from).collect(),
            fallback: "No tooltip text for this spot.".to_string(),
        }
    }
}

impl TooltipTable {
    pub fn text(&self, index: usize) -> &str {
        self.texts
            .get(index)
            .map(String::as_str)
            .unwrap_or(self.fallback.as_str())
    }
}

/// Which tooltip is on screen, if any.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct TooltipPanel {
    shown: Option<usize>,
}

impl TooltipPanel {
    pub fn shown(&self) -> Option<usize> {
        self.shown
    }

    pub fn enter(&mut self, index: usize) {
        self.shown = Some(index);
    }

    /// Leaving a volume hides its tooltip. A different tooltip entered since
    /// stays up.
    pub fn exit(&mut self, index: usize) {
        if self.shown == Some(index) {
            self.shown = None;
        }
    }
}

/// Marker for the tooltip panel container
#[derive(Component)]
pub struct TooltipPanelUI;

/// Marker for the tooltip text
#[derive(Component)]
pub struct TooltipText;

pub(crate) fn spawn_tooltip_panel(mut commands: Commands) {
    // Bottom-centre strip, hidden until a volume is entered
    commands
        .spawn((
            TooltipPanelUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Percent(25.0),
                right: Val::Percent(25.0),
                bottom: Val::Px(48.0),
                padding: UiRect::all(Val::Px(12.0)),
                border: UiRect::all(Val::Px(2.0)),
                justify_content: JustifyContent::Center,
                display: Display::None,
                ..default()
            },
            BackgroundColor(Color::srgba(0.05, 0.05, 0.08, 0.85)),
            BorderColor::all(Color::srgb(0.6, 0.45, 0.25)),
        ))
        .with_children(|parent| {
            parent.spawn((
                TooltipText,
                Text::new(""),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.92, 0.85)),
            ));
        });
}

pub(crate) fn track_tooltip_volumes(
    mut collision_start: MessageReader<CollisionStart>,
    mut collision_end: MessageReader<CollisionEnd>,
    volumes: Query<&TooltipVolume>,
    players: Query<Entity, With<Player>>,
    mut panel: ResMut<TooltipPanel>,
) {
    let Ok(player) = players.single() else {
        for _ in collision_start.read() {}
        for _ in collision_end.read() {}
        return;
    };

    let mut next = panel.clone();
    // Exits first so a volume entered this frame is not hidden by the one left
    for event in collision_end.read() {
        let contact = volume_contact(
            event.collider1,
            event.collider2,
            |e| volumes.contains(e),
            player,
        );
        if let Some(volume) = contact.and_then(|e| volumes.get(e).ok()) {
            next.exit(volume.index);
        }
    }
    for event in collision_start.read() {
        let contact = volume_contact(
            event.collider1,
            event.collider2,
            |e| volumes.contains(e),
            player,
        );
        if let Some(volume) = contact.and_then(|e| volumes.get(e).ok()) {
            debug!("Tooltip reached: {}", volume.index);
            next.enter(volume.index);
        }
    }
    panel.set_if_neq(next);
}

pub(crate) fn update_tooltip_panel(
    panel: Res<TooltipPanel>,
    table: Res<TooltipTable>,
    mut panel_query: Query<&mut Node, With<TooltipPanelUI>>,
    mut text_query: Query<&mut Text, With<TooltipText>>,
) {
    if !panel.is_changed() && !table.is_changed() {
        return;
    }

    let display = if panel.shown().is_some() {
        Display::Flex
    } else {
        Display::None
    };
    for mut node in &mut panel_query {
        node.display = display;
    }

    if let Some(index) = panel.shown() {
        for mut text in &mut text_query {
            **text = table.text(index).to_string();
        }
    }
}
