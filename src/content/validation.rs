//! Validation for loaded tuning values that only make sense in relation to each other.

use super::loader::TuningSet;

/// A validation error with context about what failed.
#[derive(Debug)]
pub struct ValidationError {
    pub file: &'static str,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} field '{}': {}", self.file, self.field, self.message)
    }
}

/// Helper macro for checking a relation between tuning values
macro_rules! check {
    ($errors:expr, $cond:expr, $file:expr, $field:expr, $($msg:tt)+) => {
        if !$cond {
            $errors.push(ValidationError {
                file: $file,
                field: $field,
                message: format!($($msg)+),
            });
        }
    };
}

/// Validate the loaded tuning. Returns an empty list if everything is consistent.
pub fn validate_tuning(tuning: &TuningSet) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let m = &tuning.movement;

    check!(
        errors,
        m.crouch_height < m.stand_height,
        "movement",
        "crouch_height",
        "crouch height {} must be below stand height {}",
        m.crouch_height,
        m.stand_height
    );
    check!(
        errors,
        m.crouch_height >= 2.0 * m.capsule_radius,
        "movement",
        "crouch_height",
        "crouch height {} cannot fit a capsule of radius {}",
        m.crouch_height,
        m.capsule_radius
    );
    check!(
        errors,
        m.gravity < 0.0,
        "movement",
        "gravity",
        "gravity {} must point down",
        m.gravity
    );
    check!(
        errors,
        m.hard_landing_velocity < m.soft_landing_velocity,
        "movement",
        "hard_landing_velocity",
        "hard landing threshold {} must be below soft threshold {}",
        m.hard_landing_velocity,
        m.soft_landing_velocity
    );
    check!(
        errors,
        m.slide_duration > 0.0 && m.wall_run_duration > 0.0,
        "movement",
        "slide_duration",
        "maneuver durations must be positive"
    );
    check!(
        errors,
        m.ledge_probe_bottom < m.ledge_probe_top,
        "movement",
        "ledge_probe_bottom",
        "ledge probe must run downward ({} -> {})",
        m.ledge_probe_top,
        m.ledge_probe_bottom
    );

    let l = &tuning.look;
    check!(
        errors,
        l.pitch_clamp > 0.0 && l.pitch_clamp <= 90.0,
        "look",
        "pitch_clamp",
        "pitch clamp {} must be in (0, 90]",
        l.pitch_clamp
    );
    check!(
        errors,
        l.freelook_max_angle > 0.0,
        "look",
        "freelook_max_angle",
        "freelook angle {} must be positive",
        l.freelook_max_angle
    );

    let r = &tuning.respawn;
    check!(
        errors,
        r.heat_max > 0.0,
        "respawn",
        "heat_max",
        "heat capacity {} must be positive",
        r.heat_max
    );
    check!(
        errors,
        r.fade_out_secs >= 0.0
            && r.heat_fade_out_secs >= 0.0
            && r.settle_secs >= 0.0
            && r.fade_in_secs >= 0.0,
        "respawn",
        "fade_out_secs",
        "sequence durations must not be negative"
    );

    check!(
        errors,
        tuning.tooltips.texts.iter().all(|text| !text.trim().is_empty()),
        "tooltips",
        "texts",
        "tooltip texts must not be blank"
    );

    errors
}
