//! Movement domain: late-phase sampling, snapshot publishing and cue logging.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::movement::events::AnimationCueEvent;
use crate::movement::{LocomotionController, LocomotionSnapshot, MovementTuning, Player};

/// Samples the velocities the next tick's landing check reads, then publishes
/// the snapshot dependents read this frame.
pub(crate) fn late_locomotion(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut players: Query<
        (&Transform, &mut LocomotionController, &mut LocomotionSnapshot),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();
    for (transform, mut controller, mut snapshot) in &mut players {
        controller.late_update(dt, &tuning, transform.translation, transform.forward().as_vec3());

        let next = controller.snapshot();
        if next.mode != snapshot.mode {
            debug!("Locomotion mode: {:?} -> {:?}", snapshot.mode, next.mode);
        }
        *snapshot = next;
    }
}

pub(crate) fn log_animation_cues(mut cues: MessageReader<AnimationCueEvent>) {
    for event in cues.read() {
        debug!("Animation cue {:?}: {}", event.entity, event.cue.trigger_name());
    }
}
