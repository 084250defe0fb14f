//! Movement domain: system modules for locomotion updates.

pub(crate) mod input;
pub(crate) mod late;
pub(crate) mod locomotion;

pub(crate) use input::{dispatch_input, read_input};
pub(crate) use late::{late_locomotion, log_animation_cues};
pub(crate) use locomotion::tick_locomotion;
