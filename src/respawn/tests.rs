//! Respawn domain: unit tests for the sequence, registry and heat meter.

use bevy::prelude::*;

use super::systems::{apply_respawn_actions, volume_contact};
use super::{
    CheckpointRegistry, HeatMeter, RespawnAction, RespawnDiagnostic, RespawnPhase, RespawnReason,
    RespawnSequence, RespawnTuning, respawn_at,
};
use crate::core::ControlScheme;
use crate::movement::{AnimationCue, CharacterBody, LocomotionController};

/// Power-of-two step so phase durations divide evenly.
const DT: f32 = 0.25;

fn registry_with_checkpoint() -> CheckpointRegistry {
    let mut registry = CheckpointRegistry::new(Vec3::new(0.0, 1.0, 0.0));
    let ordinal = registry.register(Vec3::new(0.0, 1.0, -60.0));
    registry.reach(ordinal);
    registry
}

fn step(
    sequence: &mut RespawnSequence,
    tuning: &RespawnTuning,
    registry: Option<&CheckpointRegistry>,
) -> Vec<RespawnAction> {
    let mut actions = Vec::new();
    sequence.advance(DT, tuning, registry, &mut actions);
    actions
}

/// Steps until idle, collecting every action along the way.
fn run_to_idle(
    sequence: &mut RespawnSequence,
    tuning: &RespawnTuning,
    registry: Option<&CheckpointRegistry>,
) -> Vec<RespawnAction> {
    let mut all = Vec::new();
    for _ in 0..100 {
        if sequence.is_idle() {
            break;
        }
        all.extend(step(sequence, tuning, registry));
    }
    all
}

// ----------------------------------------------------------------------------
// Sequence
// ----------------------------------------------------------------------------

#[test]
fn test_death_sequence_phases_and_timing() {
    let tuning = RespawnTuning::default();
    let registry = registry_with_checkpoint();
    let mut sequence = RespawnSequence::default();
    let mut actions = Vec::new();

    assert!(sequence.begin(RespawnReason::Death, &tuning, &mut actions));
    assert_eq!(actions, vec![RespawnAction::PlayCue(AnimationCue::FadeOut)]);
    assert_eq!(sequence.phase(), RespawnPhase::FadingOut);

    // Mover stays enabled until the fade-out finishes
    for _ in 0..3 {
        assert!(step(&mut sequence, &tuning, Some(&registry)).is_empty());
    }
    let actions = step(&mut sequence, &tuning, Some(&registry));
    assert_eq!(
        actions,
        vec![
            RespawnAction::SetMoverEnabled(false),
            RespawnAction::LockMovement(true)
        ]
    );
    assert_eq!(sequence.phase(), RespawnPhase::Waiting);

    assert!(step(&mut sequence, &tuning, Some(&registry)).is_empty());
    assert_eq!(sequence.phase(), RespawnPhase::Teleporting);

    let actions = step(&mut sequence, &tuning, Some(&registry));
    assert_eq!(
        actions,
        vec![
            RespawnAction::Teleport(Vec3::new(0.0, 1.0, -60.0)),
            RespawnAction::SetMoverEnabled(true),
            RespawnAction::LockMovement(false),
            RespawnAction::PlayCue(AnimationCue::FadeIn),
        ]
    );
    assert_eq!(sequence.phase(), RespawnPhase::FadingIn);
    assert_eq!(sequence.last_diagnostic, None);

    for _ in 0..4 {
        step(&mut sequence, &tuning, Some(&registry));
    }
    assert!(sequence.is_idle());
    assert_eq!(sequence.reason(), None);
}

#[test]
fn test_begin_ignored_while_in_flight() {
    let tuning = RespawnTuning::default();
    let mut sequence = RespawnSequence::default();
    let mut actions = Vec::new();

    assert!(sequence.begin(RespawnReason::Death, &tuning, &mut actions));
    assert!(!sequence.begin(RespawnReason::Heat, &tuning, &mut actions));
    assert!(!sequence.begin(RespawnReason::Death, &tuning, &mut actions));

    assert_eq!(actions.len(), 1);
    assert_eq!(sequence.reason(), Some(RespawnReason::Death));
}

#[test]
fn test_sequence_can_restart_after_completion() {
    let tuning = RespawnTuning::default();
    let registry = registry_with_checkpoint();
    let mut sequence = RespawnSequence::default();
    let mut actions = Vec::new();

    sequence.begin(RespawnReason::Death, &tuning, &mut actions);
    run_to_idle(&mut sequence, &tuning, Some(&registry));

    actions.clear();
    assert!(sequence.begin(RespawnReason::Death, &tuning, &mut actions));
    assert_eq!(actions, vec![RespawnAction::PlayCue(AnimationCue::FadeOut)]);
}

#[test]
fn test_idle_advance_is_noop() {
    let tuning = RespawnTuning::default();
    let mut sequence = RespawnSequence::default();
    assert!(step(&mut sequence, &tuning, None).is_empty());
    assert!(sequence.is_idle());
}

#[test]
fn test_out_of_range_index_skips_teleport() {
    let tuning = RespawnTuning::default();
    let mut registry = registry_with_checkpoint();
    registry.current_index = 7;
    let mut sequence = RespawnSequence::default();
    let mut actions = Vec::new();

    sequence.begin(RespawnReason::Death, &tuning, &mut actions);
    let all = run_to_idle(&mut sequence, &tuning, Some(&registry));

    assert!(
        !all.iter()
            .any(|a| matches!(a, RespawnAction::Teleport(_)))
    );
    assert_eq!(
        sequence.last_diagnostic,
        Some(RespawnDiagnostic::CheckpointOutOfRange { index: 7, len: 2 })
    );
    // Never left frozen
    assert_eq!(all.last(), Some(&RespawnAction::PlayCue(AnimationCue::FadeIn)));
    assert!(all.contains(&RespawnAction::SetMoverEnabled(true)));
    assert!(all.contains(&RespawnAction::LockMovement(false)));
}

#[test]
fn test_missing_registry_records_diagnostic() {
    let tuning = RespawnTuning::default();
    let mut sequence = RespawnSequence::default();
    let mut actions = Vec::new();

    sequence.begin(RespawnReason::Death, &tuning, &mut actions);
    let all = run_to_idle(&mut sequence, &tuning, None);

    assert!(
        !all.iter()
            .any(|a| matches!(a, RespawnAction::Teleport(_)))
    );
    assert!(all.contains(&RespawnAction::SetMoverEnabled(true)));
    assert_eq!(sequence.last_diagnostic, Some(RespawnDiagnostic::RegistryMissing));
    assert!(sequence.is_idle());
}

#[test]
fn test_diagnostic_cleared_on_next_begin() {
    let tuning = RespawnTuning::default();
    let mut sequence = RespawnSequence::default();
    let mut actions = Vec::new();

    sequence.begin(RespawnReason::Death, &tuning, &mut actions);
    run_to_idle(&mut sequence, &tuning, None);
    assert!(sequence.last_diagnostic.is_some());

    sequence.begin(RespawnReason::Death, &tuning, &mut actions);
    assert_eq!(sequence.last_diagnostic, None);
}

#[test]
fn test_heat_variant_uses_long_fade_and_refills() {
    let tuning = RespawnTuning::default();
    let registry = registry_with_checkpoint();
    let mut sequence = RespawnSequence::default();
    let mut actions = Vec::new();

    sequence.begin(RespawnReason::Heat, &tuning, &mut actions);
    assert_eq!(actions, vec![RespawnAction::PlayCue(AnimationCue::HeatFadeOut)]);

    // 2.5s fade at 0.25s steps: still fading after the death fade would have ended
    for _ in 0..9 {
        assert!(step(&mut sequence, &tuning, Some(&registry)).is_empty());
    }
    assert_eq!(sequence.phase(), RespawnPhase::FadingOut);
    let actions = step(&mut sequence, &tuning, Some(&registry));
    assert!(actions.contains(&RespawnAction::SetMoverEnabled(false)));

    let all = run_to_idle(&mut sequence, &tuning, Some(&registry));
    assert!(all.contains(&RespawnAction::RefillHeat));
    assert!(all.contains(&RespawnAction::PlayCue(AnimationCue::HeatFadeIn)));
    assert!(!all.contains(&RespawnAction::PlayCue(AnimationCue::FadeIn)));
}

#[test]
fn test_death_variant_does_not_refill_heat() {
    let tuning = RespawnTuning::default();
    let registry = registry_with_checkpoint();
    let mut sequence = RespawnSequence::default();
    let mut actions = Vec::new();

    sequence.begin(RespawnReason::Death, &tuning, &mut actions);
    let all = run_to_idle(&mut sequence, &tuning, Some(&registry));
    assert!(!all.contains(&RespawnAction::RefillHeat));
}

// ----------------------------------------------------------------------------
// Checkpoint registry
// ----------------------------------------------------------------------------

#[test]
fn test_registry_ordinals_start_after_level_start() {
    let mut registry = CheckpointRegistry::new(Vec3::ZERO);
    assert_eq!(registry.register(Vec3::X), 1);
    assert_eq!(registry.register(Vec3::Y), 2);
    assert_eq!(registry.len(), 3);
    assert_eq!(registry.current_index, 0);
    assert_eq!(registry.respawn_point(), Ok(Vec3::ZERO));
}

#[test]
fn test_registry_reach_reports_change() {
    let mut registry = CheckpointRegistry::new(Vec3::ZERO);
    let first = registry.register(Vec3::X);

    assert!(registry.reach(first));
    assert!(!registry.reach(first));
    assert_eq!(registry.respawn_point(), Ok(Vec3::X));
}

#[test]
fn test_registry_point_at_bounds() {
    let registry = CheckpointRegistry::new(Vec3::ZERO);
    assert_eq!(registry.point_at(0), Ok(Vec3::ZERO));
    assert_eq!(
        registry.point_at(3),
        Err(RespawnDiagnostic::CheckpointOutOfRange { index: 3, len: 1 })
    );
}

#[test]
fn test_respawn_at_warps_and_clears_motion() {
    let registry = registry_with_checkpoint();
    let mut transform = Transform::from_xyz(5.0, 20.0, 5.0);
    let mut body = CharacterBody::new(0.4, 1.8);
    body.velocity = Vec3::new(3.0, -10.0, 0.0);
    let mut controller = LocomotionController::new(ControlScheme::default());
    controller.state.vertical_velocity = -10.0;
    controller.state.current_speed = 8.0;

    let mut heat = HeatMeter::new(100.0);
    heat.toggle_exposure();
    let point = respawn_at(1, &registry, &mut transform, &mut body, &mut controller, &mut heat);

    assert_eq!(point, Ok(Vec3::new(0.0, 1.0, -60.0)));
    assert_eq!(transform.translation, Vec3::new(0.0, 1.0, -60.0));
    assert_eq!(body.velocity, Vec3::ZERO);
    assert_eq!(controller.state.vertical_velocity, 0.0);
    assert_eq!(controller.state.current_speed, 0.0);
    assert!(!heat.exposed);
    // A warp is not a checkpoint crossing
    assert_eq!(registry.current_index, 1);
}

#[test]
fn test_respawn_at_out_of_range_leaves_player() {
    let registry = CheckpointRegistry::new(Vec3::ZERO);
    let mut transform = Transform::from_xyz(5.0, 20.0, 5.0);
    let mut body = CharacterBody::new(0.4, 1.8);
    let mut controller = LocomotionController::new(ControlScheme::default());

    let mut heat = HeatMeter::new(100.0);
    heat.toggle_exposure();

    let result = respawn_at(4, &registry, &mut transform, &mut body, &mut controller, &mut heat);

    assert!(result.is_err());
    assert_eq!(transform.translation, Vec3::new(5.0, 20.0, 5.0));
    assert!(heat.exposed);
}

// ----------------------------------------------------------------------------
// Applying actions
// ----------------------------------------------------------------------------

#[test]
fn test_heat_respawn_leaves_player_warm_at_checkpoint() {
    let tuning = RespawnTuning::default();
    let registry = registry_with_checkpoint();
    let mut transform = Transform::from_xyz(0.0, 3.5, -140.0);
    let mut body = CharacterBody::new(0.5, 1.95);
    let mut controller = LocomotionController::new(ControlScheme::default());
    let mut heat = HeatMeter::new(tuning.heat_max);
    let mut sequence = RespawnSequence::default();
    let mut cues: Vec<AnimationCue> = Vec::new();

    // Walked through the doorway, then stood in the cold until frozen
    heat.toggle_exposure();
    let mut frames = 0;
    while !heat.tick(DT, &tuning) {
        frames += 1;
        assert!(frames < 1000, "heat never ran out");
    }

    let mut actions = Vec::new();
    sequence.begin(RespawnReason::Heat, &tuning, &mut actions);
    for _ in 0..100 {
        apply_respawn_actions(
            &actions,
            &mut transform,
            &mut body,
            &mut controller,
            &mut heat,
            &mut cues,
        );
        if sequence.is_idle() {
            break;
        }
        actions = step(&mut sequence, &tuning, Some(&registry));
    }

    assert!(sequence.is_idle());
    assert_eq!(transform.translation, Vec3::new(0.0, 1.0, -60.0));
    assert!(body.enabled);
    assert!(!controller.state.movement_locked);
    assert_eq!(cues, vec![AnimationCue::HeatFadeOut, AnimationCue::HeatFadeIn]);
    assert_eq!(heat.current, heat.max);
    assert!(!heat.exposed);

    // Standing at the checkpoint no longer drains
    for _ in 0..400 {
        assert!(!heat.tick(DT, &tuning));
    }
    assert_eq!(heat.current, heat.max);

    // The next doorway crossing turns the cold back on
    heat.toggle_exposure();
    assert!(heat.exposed);
}

#[test]
fn test_teleport_clears_warming_sources() {
    let mut transform = Transform::default();
    let mut body = CharacterBody::new(0.5, 1.95);
    let mut controller = LocomotionController::new(ControlScheme::default());
    let mut heat = HeatMeter::new(100.0);
    heat.warming = 2;
    let mut cues: Vec<AnimationCue> = Vec::new();

    apply_respawn_actions(
        &[RespawnAction::Teleport(Vec3::new(0.0, 1.0, 0.0))],
        &mut transform,
        &mut body,
        &mut controller,
        &mut heat,
        &mut cues,
    );

    assert_eq!(heat.warming, 0);
    assert_eq!(transform.translation, Vec3::new(0.0, 1.0, 0.0));
    assert!(cues.is_empty());
}

#[test]
fn test_death_respawn_keeps_heat_level() {
    let tuning = RespawnTuning::default();
    let mut transform = Transform::default();
    let mut body = CharacterBody::new(0.5, 1.95);
    let mut controller = LocomotionController::new(ControlScheme::default());
    let mut heat = HeatMeter::new(100.0);
    heat.current = 40.0;
    let mut cues: Vec<AnimationCue> = Vec::new();

    let mut sequence = RespawnSequence::default();
    let mut actions = Vec::new();
    sequence.begin(RespawnReason::Death, &tuning, &mut actions);
    actions.extend(run_to_idle(&mut sequence, &tuning, Some(&registry_with_checkpoint())));
    apply_respawn_actions(
        &actions,
        &mut transform,
        &mut body,
        &mut controller,
        &mut heat,
        &mut cues,
    );

    assert_eq!(heat.current, 40.0);
    assert_eq!(cues, vec![AnimationCue::FadeOut, AnimationCue::FadeIn]);
}

// ----------------------------------------------------------------------------
// Heat meter
// ----------------------------------------------------------------------------

#[test]
fn test_heat_only_drains_when_exposed() {
    let tuning = RespawnTuning::default();
    let mut heat = HeatMeter::new(100.0);

    assert!(!heat.tick(1.0, &tuning));
    assert_eq!(heat.current, 100.0);

    heat.toggle_exposure();
    heat.tick(1.0, &tuning);
    assert_eq!(heat.current, 96.0);
    assert_eq!(heat.fraction(), 0.96);
}

#[test]
fn test_heat_depletion_fires_once_until_refill() {
    let tuning = RespawnTuning::default();
    let mut heat = HeatMeter::new(8.0);
    heat.toggle_exposure();

    assert!(!heat.tick(1.0, &tuning));
    assert!(heat.tick(1.0, &tuning));
    assert_eq!(heat.current, 0.0);
    assert!(!heat.tick(1.0, &tuning));

    heat.refill();
    assert_eq!(heat.current, 8.0);
    assert!(!heat.tick(1.0, &tuning));
    assert!(heat.tick(1.0, &tuning));
}

#[test]
fn test_heat_source_warms_and_clamps() {
    let tuning = RespawnTuning::default();
    let mut heat = HeatMeter::new(100.0);
    heat.toggle_exposure();
    heat.current = 50.0;
    heat.warming = 1;

    heat.tick(1.0, &tuning);
    assert_eq!(heat.current, 70.0);
    heat.tick(5.0, &tuning);
    assert_eq!(heat.current, 100.0);
}

#[test]
fn test_reset_exposure_keeps_heat_level() {
    let mut heat = HeatMeter::new(100.0);
    heat.toggle_exposure();
    heat.warming = 1;
    heat.current = 30.0;

    heat.reset_exposure();
    assert!(!heat.exposed);
    assert_eq!(heat.warming, 0);
    assert_eq!(heat.current, 30.0);
}

#[test]
fn test_exposure_toggles_per_entry() {
    let mut heat = HeatMeter::new(100.0);
    heat.toggle_exposure();
    assert!(heat.exposed);
    heat.toggle_exposure();
    assert!(!heat.exposed);
}

#[test]
fn test_fraction_with_zero_max() {
    let heat = HeatMeter::new(0.0);
    assert_eq!(heat.fraction(), 0.0);
}

// ----------------------------------------------------------------------------
// Trigger matching
// ----------------------------------------------------------------------------

#[test]
fn test_volume_contact_either_order() {
    let mut world = World::new();
    let volume = world.spawn_empty().id();
    let player = world.spawn_empty().id();
    let other = world.spawn_empty().id();
    let is_volume = |e: Entity| e == volume;

    assert_eq!(volume_contact(volume, player, is_volume, player), Some(volume));
    assert_eq!(volume_contact(player, volume, is_volume, player), Some(volume));
    assert_eq!(volume_contact(volume, other, is_volume, player), None);
    assert_eq!(volume_contact(player, other, is_volume, player), None);
}
