//! Confidence dynamics
//!
//! A single bounded scalar updated once per processed frame. Exactly one of
//! two rules applies: a penalty when any negative cue triggered, or a
//! recovery otherwise. Decay outpaces recovery so the score reacts promptly
//! to bad habits but climbs back gradually, and sustained calm frames ramp
//! the recovery up to twice the base rate.

use crate::config::EngineConfig;
use serde::{Deserialize, Serialize};

/// The negative cue charging this frame's penalty, strongest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenaltyKind {
    /// Excessive head movement
    Movement,
    /// Blink rate over the window exceeded the ceiling
    RapidBlink,
    /// Gaze left the center band
    GazeAway,
}

impl PenaltyKind {
    fn decay_scale(&self, config: &EngineConfig) -> f64 {
        match self {
            PenaltyKind::Movement => config.movement_penalty_scale,
            PenaltyKind::RapidBlink => config.blink_penalty_scale,
            PenaltyKind::GazeAway => 1.0,
        }
    }
}

/// Per-session confidence state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceTracker {
    score: f64,
    calm_frames: u32,
}

impl ConfidenceTracker {
    /// Start at the ceiling, as every session does
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            score: config.max_confidence,
            calm_frames: 0,
        }
    }

    /// Current score, always within `[min_confidence, max_confidence]`
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Apply one frame: penalty when a cue triggered, recovery otherwise
    pub fn apply(&mut self, penalty: Option<PenaltyKind>, config: &EngineConfig) -> f64 {
        match penalty {
            Some(kind) => {
                self.calm_frames = 0;
                let decay = config.score_decay * kind.decay_scale(config);
                self.score = (self.score - decay).max(config.min_confidence);
            }
            None => {
                self.calm_frames = (self.calm_frames + 1).min(config.calm_ramp_frames);
                let ramp = 1.0 + self.calm_frames as f64 / config.calm_ramp_frames as f64;
                self.score = (self.score + config.score_recovery * ramp).min(config.max_confidence);
            }
        }
        self.score
    }
}
