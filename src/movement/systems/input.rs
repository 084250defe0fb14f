//! Movement domain: input sampling and edge dispatch for locomotion.

use bevy::ecs::message::MessageWriter;
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

use crate::core::ControlScheme;
use crate::movement::adapters::MessageCueSink;
use crate::movement::events::AnimationCueEvent;
use crate::movement::{ButtonEdge, LocomotionController, MovementInput, MovementTuning, Player};

fn key_edge(keyboard: &ButtonInput<KeyCode>, keys: &[KeyCode]) -> Option<ButtonEdge> {
    if keyboard.any_just_pressed(keys.iter().copied()) {
        Some(ButtonEdge::Pressed)
    } else if keyboard.any_just_released(keys.iter().copied()) {
        Some(ButtonEdge::Released)
    } else {
        None
    }
}

fn pad_edge<'a>(
    gamepads: impl Iterator<Item = &'a Gamepad>,
    button: GamepadButton,
) -> Option<ButtonEdge> {
    let mut edge = None;
    for gamepad in gamepads {
        if gamepad.just_pressed(button) {
            return Some(ButtonEdge::Pressed);
        }
        if gamepad.just_released(button) {
            edge = Some(ButtonEdge::Released);
        }
    }
    edge
}

pub(crate) fn read_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    gamepads: Query<&Gamepad>,
    scheme: Res<ControlScheme>,
    mut input: ResMut<MovementInput>,
) {
    input.clear_edges();

    // Move axis (y forward)
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }
    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    let axis = match *scheme {
        ControlScheme::KeyboardMouse => Vec2::new(x, y).normalize_or_zero(),
        ControlScheme::Gamepad => gamepads
            .iter()
            .map(|gamepad| gamepad.left_stick())
            .find(|stick| *stick != Vec2::ZERO)
            .unwrap_or(Vec2::ZERO)
            .clamp_length_max(1.0),
    };
    input.axis_changed = axis != input.axis;
    input.axis = axis;

    input.jump = key_edge(&keyboard, &[KeyCode::Space])
        .or_else(|| pad_edge(gamepads.iter(), GamepadButton::South));
    input.sprint = key_edge(&keyboard, &[KeyCode::ShiftLeft])
        .or_else(|| pad_edge(gamepads.iter(), GamepadButton::LeftThumb));
    input.crouch = key_edge(&keyboard, &[KeyCode::ControlLeft, KeyCode::KeyC])
        .or_else(|| pad_edge(gamepads.iter(), GamepadButton::East));
    input.freelook = key_edge(&keyboard, &[KeyCode::AltLeft])
        .or_else(|| pad_edge(gamepads.iter(), GamepadButton::RightThumb));

    input.look = match *scheme {
        ControlScheme::KeyboardMouse => mouse_motion.delta,
        ControlScheme::Gamepad => gamepads
            .iter()
            .map(|gamepad| gamepad.right_stick())
            .find(|stick| *stick != Vec2::ZERO)
            .unwrap_or(Vec2::ZERO),
    };
}

/// Push this frame's edges into the controller before the tick runs.
pub(crate) fn dispatch_input(
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    scheme: Res<ControlScheme>,
    mut players: Query<(Entity, &Transform, &mut LocomotionController), With<Player>>,
    mut cue_writer: MessageWriter<AnimationCueEvent>,
) {
    for (entity, transform, mut controller) in &mut players {
        if controller.control_scheme != *scheme {
            controller.set_control_scheme(*scheme);
        }

        if input.axis_changed {
            controller.on_move(input.axis);
        }
        if let Some(edge) = input.sprint {
            controller.on_sprint(edge);
        }
        if let Some(edge) = input.crouch {
            controller.on_crouch(edge);
        }
        if let Some(edge) = input.freelook {
            controller.on_freelook(edge);
        }
        if let Some(edge) = input.jump {
            let mut cues = MessageCueSink::new(entity, &mut cue_writer);
            controller.on_jump(edge, transform.rotation, &tuning, &mut cues);
        }
    }
}
