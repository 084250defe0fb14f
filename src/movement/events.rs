//! Movement domain: message definitions for animation cues.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::movement::collaborators::AnimationCue;

/// Fired whenever a locomotion or respawn step triggers an animation
#[derive(Debug, Clone, Copy)]
pub struct AnimationCueEvent {
    pub entity: Entity,
    pub cue: AnimationCue,
}

impl Message for AnimationCueEvent {}
