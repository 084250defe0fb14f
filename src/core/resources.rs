//! Core domain: shared input-device resources.

use bevy::prelude::*;

/// Device family the player is currently using. Drives sprint semantics,
/// look sensitivity and menu focus behaviour.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlScheme {
    #[default]
    KeyboardMouse,
    Gamepad,
}

impl ControlScheme {
    pub fn name(self) -> &'static str {
        match self {
            ControlScheme::KeyboardMouse => "Keyboard and Mouse",
            ControlScheme::Gamepad => "Gamepad",
        }
    }
}
