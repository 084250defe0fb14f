//! Respawn domain: trigger volume markers.

use bevy::prelude::*;

/// Touching this volume starts a death respawn
#[derive(Component, Debug)]
pub struct DeathZone;

/// Crossing this volume makes its respawn point current
#[derive(Component, Debug, Clone, Copy)]
pub struct CheckpointVolume {
    pub ordinal: usize,
}

/// Refills heat while the player is inside
#[derive(Component, Debug)]
pub struct HeatSource;

/// Doorway volume that toggles cold exposure on entry
#[derive(Component, Debug)]
pub struct ExposureZone;
