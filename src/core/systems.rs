//! Core domain: boot, pause and control-scheme tracking systems.

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

use crate::core::resources::ControlScheme;
use crate::core::state::GameState;

/// Stick deflection that counts as the gamepad being in use.
const STICK_ACTIVITY: f32 = 0.2;

pub(crate) fn finish_boot(mut game_state: ResMut<NextState<GameState>>) {
    game_state.set(GameState::Playing);
}

pub(crate) fn toggle_pause(
    keyboard: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let pressed = keyboard.just_pressed(KeyCode::Escape)
        || gamepads
            .iter()
            .any(|gamepad| gamepad.just_pressed(GamepadButton::Start));
    if !pressed {
        return;
    }

    match state.get() {
        GameState::Playing => {
            info!("Game paused");
            next_state.set(GameState::Paused);
        }
        GameState::Paused => {
            info!("Game resumed");
            next_state.set(GameState::Playing);
        }
        GameState::Boot => {}
    }
}

/// Switch the active scheme to whichever device produced input most recently.
pub(crate) fn track_control_scheme(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    gamepads: Query<&Gamepad>,
    mut scheme: ResMut<ControlScheme>,
) {
    let gamepad_active = gamepads.iter().any(|gamepad| {
        gamepad.get_just_pressed().next().is_some()
            || gamepad.left_stick().length() > STICK_ACTIVITY
            || gamepad.right_stick().length() > STICK_ACTIVITY
    });
    let keyboard_active = keyboard.get_just_pressed().next().is_some()
        || mouse_buttons.get_just_pressed().next().is_some()
        || mouse_motion.delta != Vec2::ZERO;

    let next = if gamepad_active {
        ControlScheme::Gamepad
    } else if keyboard_active {
        ControlScheme::KeyboardMouse
    } else {
        return;
    };

    if *scheme != next {
        info!("Control scheme changed: {}", next.name());
        *scheme = next;
    }
}
