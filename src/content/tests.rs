//! Content domain: unit tests for tuning parsing and validation.

use std::path::Path;

use super::loader::{TuningSet, load_all_tuning, parse_tuning};
use super::validation::validate_tuning;
use crate::look::LookTuning;
use crate::movement::MovementTuning;
use crate::respawn::RespawnTuning;
use crate::ui::TooltipTable;

// ----------------------------------------------------------------------------
// Parsing
// ----------------------------------------------------------------------------

#[test]
fn test_partial_movement_file_keeps_defaults() {
    let text = "(walk_speed: 7.5, jump_force: 6.0)";
    let tuning: MovementTuning = parse_tuning("movement.ron", text).unwrap();
    let defaults = MovementTuning::default();

    assert_eq!(tuning.walk_speed, 7.5);
    assert_eq!(tuning.jump_force, 6.0);
    assert_eq!(tuning.sprint_speed, defaults.sprint_speed);
    assert_eq!(tuning.slide_duration, defaults.slide_duration);
    assert_eq!(tuning.head_bob_enabled, defaults.head_bob_enabled);
}

#[test]
fn test_empty_struct_is_all_defaults() {
    let look: LookTuning = parse_tuning("look.ron", "()").unwrap();
    assert_eq!(look, LookTuning::default());

    let respawn: RespawnTuning = parse_tuning("respawn.ron", "()").unwrap();
    assert_eq!(respawn, RespawnTuning::default());
}

#[test]
fn test_full_round_trip_of_defaults() {
    let text = ron::to_string(&MovementTuning::default()).unwrap();
    let parsed: MovementTuning = parse_tuning("movement.ron", &text).unwrap();
    assert_eq!(parsed.slide_speed_cap, MovementTuning::default().slide_speed_cap);
    assert_eq!(parsed.ledge_mount_offset, MovementTuning::default().ledge_mount_offset);
}

#[test]
fn test_parse_error_names_file() {
    let result: Result<MovementTuning, _> = parse_tuning("movement.ron", "(walk_speed: fast)");
    let error = result.unwrap_err();
    assert_eq!(error.file, "movement.ron");
    assert!(error.to_string().starts_with("Failed to load movement.ron"));
}

#[test]
fn test_missing_directory_keeps_defaults_without_errors() {
    let (tuning, errors) = load_all_tuning(Path::new("does/not/exist"));
    assert!(errors.is_empty());
    assert_eq!(tuning.movement.walk_speed, MovementTuning::default().walk_speed);
}

#[test]
fn test_shipped_data_files_parse() {
    let (tuning, errors) =
        load_all_tuning(&Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/data"));
    assert!(errors.is_empty(), "errors: {:?}", errors);
    assert_eq!(tuning.tooltips.texts.len(), 7);
}

#[test]
fn test_tooltip_file_without_fallback_keeps_default() {
    let text = r#"(texts: ["Jump!", "Duck!"])"#;
    let tooltips: TooltipTable = parse_tuning("tooltips.ron", text).unwrap();

    assert_eq!(tooltips.text(1), "Duck!");
    assert_eq!(tooltips.text(2), TooltipTable::default().fallback);
}

// ----------------------------------------------------------------------------
// Validation
// ----------------------------------------------------------------------------

#[test]
fn test_default_tuning_is_valid() {
    let errors = validate_tuning(&TuningSet::default());
    assert!(errors.is_empty(), "errors: {:?}", errors);
}

#[test]
fn test_inverted_heights_are_reported() {
    let mut tuning = TuningSet::default();
    tuning.movement.crouch_height = 2.5;

    let errors = validate_tuning(&tuning);
    assert!(errors.iter().any(|e| e.field == "crouch_height"));
}

#[test]
fn test_inverted_landing_thresholds_are_reported() {
    let mut tuning = TuningSet::default();
    tuning.movement.hard_landing_velocity = -2.0;

    let errors = validate_tuning(&tuning);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "hard_landing_velocity");
}

#[test]
fn test_blank_tooltip_is_reported() {
    let mut tuning = TuningSet::default();
    tuning.tooltips.texts[4] = "   ".to_string();

    let errors = validate_tuning(&tuning);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].file, "tooltips");
}
