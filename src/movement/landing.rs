//! Movement domain: landing impact classification.

use crate::movement::collaborators::AnimationCue;
use crate::movement::resources::MovementTuning;

/// Pick the landing cue for the velocities sampled at the end of the previous tick.
pub fn classify_landing(
    last_vertical_velocity: f32,
    last_forward_velocity: f32,
    tuning: &MovementTuning,
) -> Option<AnimationCue> {
    if last_vertical_velocity < tuning.hard_landing_velocity {
        if last_forward_velocity > tuning.roll_forward_velocity {
            Some(AnimationCue::Roll)
        } else {
            Some(AnimationCue::LandHard)
        }
    } else if last_vertical_velocity < tuning.soft_landing_velocity {
        Some(AnimationCue::LandSoft)
    } else {
        None
    }
}
