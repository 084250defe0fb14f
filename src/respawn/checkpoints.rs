//! Respawn domain: ordered checkpoint registry.

use bevy::prelude::*;

use crate::respawn::sequence::RespawnDiagnostic;

/// Respawn points in course order. Index 0 is the level start; checkpoint
/// volumes are registered after it and carry their point's index as ordinal.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CheckpointRegistry {
    pub respawn_points: Vec<Vec3>,
    /// Index of the last checkpoint reached
    pub current_index: usize,
}

impl CheckpointRegistry {
    pub fn new(level_start: Vec3) -> Self {
        Self {
            respawn_points: vec![level_start],
            current_index: 0,
        }
    }

    /// Append a respawn point and return its ordinal.
    pub fn register(&mut self, point: Vec3) -> usize {
        self.respawn_points.push(point);
        self.respawn_points.len() - 1
    }

    pub fn len(&self) -> usize {
        self.respawn_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.respawn_points.is_empty()
    }

    /// Record a checkpoint crossing. Returns true if the current index changed.
    pub fn reach(&mut self, ordinal: usize) -> bool {
        if self.current_index == ordinal {
            return false;
        }
        self.current_index = ordinal;
        info!("Checkpoint reached: {}", ordinal);
        true
    }

    /// Bounds-checked lookup of a respawn point.
    pub fn point_at(&self, index: usize) -> Result<Vec3, RespawnDiagnostic> {
        self.respawn_points
            .get(index)
            .copied()
            .ok_or(RespawnDiagnostic::CheckpointOutOfRange {
                index,
                len: self.respawn_points.len(),
            })
    }

    /// Point the player returns to on the next respawn.
    pub fn respawn_point(&self) -> Result<Vec3, RespawnDiagnostic> {
        self.point_at(self.current_index)
    }
}
