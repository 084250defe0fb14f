//! Respawn domain: the fade, settle, teleport and fade-in sequence.
//!
//! One sequence runs at a time per player. `advance` is called once per frame
//! and returns the side effects for the caller to apply, so the state machine
//! itself never touches the world.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::movement::AnimationCue;
use crate::respawn::checkpoints::CheckpointRegistry;

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RespawnTuning {
    pub fade_out_secs: f32,
    /// Longer fade used when the player freezes
    pub heat_fade_out_secs: f32,
    /// Pause with the body disabled before the teleport
    pub settle_secs: f32,
    pub fade_in_secs: f32,

    pub heat_max: f32,
    pub heat_drain_per_sec: f32,
    pub heat_warm_per_sec: f32,
}

impl Default for RespawnTuning {
    fn default() -> Self {
        Self {
            fade_out_secs: 1.0,
            heat_fade_out_secs: 2.5,
            settle_secs: 0.2,
            fade_in_secs: 1.0,
            heat_max: 100.0,
            heat_drain_per_sec: 4.0,
            heat_warm_per_sec: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RespawnReason {
    /// Touched a death volume
    Death,
    /// Heat meter ran out
    Heat,
}

impl RespawnReason {
    fn fade_out_cue(self) -> AnimationCue {
        match self {
            RespawnReason::Death => AnimationCue::FadeOut,
            RespawnReason::Heat => AnimationCue::HeatFadeOut,
        }
    }

    fn fade_in_cue(self) -> AnimationCue {
        match self {
            RespawnReason::Death => AnimationCue::FadeIn,
            RespawnReason::Heat => AnimationCue::HeatFadeIn,
        }
    }

    fn fade_out_secs(self, tuning: &RespawnTuning) -> f32 {
        match self {
            RespawnReason::Death => tuning.fade_out_secs,
            RespawnReason::Heat => tuning.heat_fade_out_secs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RespawnPhase {
    #[default]
    Idle,
    FadingOut,
    Waiting,
    Teleporting,
    FadingIn,
}

/// Why a respawn left the player where they were.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RespawnDiagnostic {
    RegistryMissing,
    CheckpointOutOfRange { index: usize, len: usize },
}

impl std::fmt::Display for RespawnDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RespawnDiagnostic::RegistryMissing => write!(f, "no checkpoint registry"),
            RespawnDiagnostic::CheckpointOutOfRange { index, len } => {
                write!(f, "checkpoint index {} out of range ({} points)", index, len)
            }
        }
    }
}

/// Side effects requested by the sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RespawnAction {
    PlayCue(AnimationCue),
    SetMoverEnabled(bool),
    LockMovement(bool),
    /// Move the body and clear all motion state
    Teleport(Vec3),
    RefillHeat,
}

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct RespawnSequence {
    phase: RespawnPhase,
    reason: Option<RespawnReason>,
    /// Seconds left in the current timed phase
    remaining: f32,
    pub last_diagnostic: Option<RespawnDiagnostic>,
}

impl RespawnSequence {
    pub fn phase(&self) -> RespawnPhase {
        self.phase
    }

    pub fn reason(&self) -> Option<RespawnReason> {
        self.reason
    }

    pub fn is_idle(&self) -> bool {
        self.phase == RespawnPhase::Idle
    }

    /// Start a sequence. Ignored while another one is in flight.
    pub fn begin(
        &mut self,
        reason: RespawnReason,
        tuning: &RespawnTuning,
        actions: &mut Vec<RespawnAction>,
    ) -> bool {
        if !self.is_idle() {
            debug!("Respawn ({:?}) ignored, sequence already running", reason);
            return false;
        }

        info!("Respawning ({:?})", reason);
        self.phase = RespawnPhase::FadingOut;
        self.reason = Some(reason);
        self.remaining = reason.fade_out_secs(tuning);
        self.last_diagnostic = None;
        actions.push(RespawnAction::PlayCue(reason.fade_out_cue()));
        true
    }

    pub fn advance(
        &mut self,
        dt: f32,
        tuning: &RespawnTuning,
        registry: Option<&CheckpointRegistry>,
        actions: &mut Vec<RespawnAction>,
    ) {
        let Some(reason) = self.reason else {
            return;
        };

        match self.phase {
            RespawnPhase::Idle => {}
            RespawnPhase::FadingOut => {
                self.remaining -= dt;
                if self.remaining <= 0.0 {
                    actions.push(RespawnAction::SetMoverEnabled(false));
                    actions.push(RespawnAction::LockMovement(true));
                    self.enter(RespawnPhase::Waiting, tuning.settle_secs);
                }
            }
            RespawnPhase::Waiting => {
                self.remaining -= dt;
                if self.remaining <= 0.0 {
                    self.enter(RespawnPhase::Teleporting, 0.0);
                }
            }
            RespawnPhase::Teleporting => {
                let target = match registry {
                    Some(registry) => registry.respawn_point(),
                    None => Err(RespawnDiagnostic::RegistryMissing),
                };
                match target {
                    Ok(point) => {
                        actions.push(RespawnAction::Teleport(point));
                        info!("Respawned at {:?}", point);
                    }
                    Err(diagnostic) => {
                        warn!("Respawn skipped: {}", diagnostic);
                        self.last_diagnostic = Some(diagnostic);
                    }
                }

                if reason == RespawnReason::Heat {
                    actions.push(RespawnAction::RefillHeat);
                }
                actions.push(RespawnAction::SetMoverEnabled(true));
                actions.push(RespawnAction::LockMovement(false));
                actions.push(RespawnAction::PlayCue(reason.fade_in_cue()));
                self.enter(RespawnPhase::FadingIn, tuning.fade_in_secs);
            }
            RespawnPhase::FadingIn => {
                self.remaining -= dt;
                if self.remaining <= 0.0 {
                    self.enter(RespawnPhase::Idle, 0.0);
                    self.reason = None;
                }
            }
        }
    }

    fn enter(&mut self, phase: RespawnPhase, duration: f32) {
        debug!("Respawn phase: {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.remaining = duration;
    }
}
