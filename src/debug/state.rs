//! Debug domain: state and action definitions for debug tooling.

use bevy::prelude::*;

/// Number of respawn points reachable from the warp hotkeys
pub const WARP_SLOTS: usize = 5;

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether debug UI is visible
    pub ui_visible: bool,
    /// Whether to show the locomotion info overlay
    pub show_info: bool,
    /// Message to display temporarily in debug UI
    pub status_message: Option<(String, f32)>,
}

impl DebugState {
    /// Set a status message that will fade after a duration
    pub fn set_message(&mut self, message: impl Into<String>, duration: f32) {
        self.status_message = Some((message.into(), duration));
    }

    pub fn tick_message(&mut self, dt: f32) {
        if let Some((_, ref mut duration)) = self.status_message {
            *duration -= dt;
            if *duration <= 0.0 {
                self.status_message = None;
            }
        }
    }
}

/// Actions that can be triggered from debug UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugAction {
    /// Teleport to a registered respawn point without reaching it
    WarpToPoint(usize),
    ForceDeath,
    RefillHeat,
    ToggleInfo,
    Close,
}

impl DebugAction {
    /// Hotkey bindings, active while the panel is open.
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::Digit1 => Some(DebugAction::WarpToPoint(0)),
            KeyCode::Digit2 => Some(DebugAction::WarpToPoint(1)),
            KeyCode::Digit3 => Some(DebugAction::WarpToPoint(2)),
            KeyCode::Digit4 => Some(DebugAction::WarpToPoint(3)),
            KeyCode::Digit5 => Some(DebugAction::WarpToPoint(4)),
            KeyCode::KeyK => Some(DebugAction::ForceDeath),
            KeyCode::KeyH => Some(DebugAction::RefillHeat),
            KeyCode::KeyI => Some(DebugAction::ToggleInfo),
            _ => None,
        }
    }

    pub fn label(self) -> String {
        match self {
            DebugAction::WarpToPoint(0) => "[1] Level start".to_string(),
            DebugAction::WarpToPoint(index) => format!("[{}] Checkpoint {}", index + 1, index),
            DebugAction::ForceDeath => "[K] Kill player".to_string(),
            DebugAction::RefillHeat => "[H] Refill heat".to_string(),
            DebugAction::ToggleInfo => "[I] Toggle info".to_string(),
            DebugAction::Close => "Close".to_string(),
        }
    }
}
