//! UI domain: player HUD heat bar.

use bevy::prelude::*;

use crate::movement::Player;
use crate::respawn::HeatMeter;

pub(crate) const HEAT_BAR_WIDTH: f32 = 200.0;
pub(crate) const HEAT_BAR_HEIGHT: f32 = 20.0;
pub(crate) const HEAT_BAR_PADDING: f32 = 16.0;

const WARM: Vec3 = Vec3::new(1.0, 0.55, 0.15);
const COLD: Vec3 = Vec3::new(0.55, 0.8, 1.0);

/// Marker for the HUD heat bar container
#[derive(Component)]
pub struct HeatBarUI;

/// Marker for the heat bar fill element
#[derive(Component)]
pub struct HeatBarFill;

pub(crate) fn spawn_heat_bar_ui(mut commands: Commands) {
    // Root container positioned at top-left
    commands
        .spawn((
            HeatBarUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(HEAT_BAR_PADDING),
                top: Val::Px(HEAT_BAR_PADDING),
                width: Val::Px(HEAT_BAR_WIDTH),
                height: Val::Px(HEAT_BAR_HEIGHT),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.8)),
            BorderColor::all(Color::srgb(0.3, 0.3, 0.3)),
        ))
        .with_children(|parent| {
            parent.spawn((
                HeatBarFill,
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(heat_bar_color(1.0)),
            ));
        });
}

/// Fill colour for a heat fraction: ember orange when full, frost blue when empty.
pub(crate) fn heat_bar_color(fraction: f32) -> Color {
    let t = fraction.clamp(0.0, 1.0);
    let c = COLD * (1.0 - t) + WARM * t;
    Color::srgb(c.x, c.y, c.z)
}

pub(crate) fn update_heat_bar(
    player_query: Query<&HeatMeter, (With<Player>, Changed<HeatMeter>)>,
    mut fill_query: Query<(&mut Node, &mut BackgroundColor), With<HeatBarFill>>,
) {
    let Ok(heat) = player_query.single() else {
        return;
    };

    let fraction = heat.fraction().clamp(0.0, 1.0);
    for (mut node, mut bg_color) in &mut fill_query {
        node.width = Val::Percent(fraction * 100.0);
        bg_color.0 = heat_bar_color(fraction);
    }
}
