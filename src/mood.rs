//! Mood and expression scoring
//!
//! A weighted combination of smile, brow, pose, and gaze terms produces a
//! 0-100 mood score and a three-way label. The same module owns
//! micro-expression detection: a sudden smile-ratio change against the
//! session's last stable baseline, gated by a frame-count cooldown. Mouth
//! activity is reported independently of the mood computation.

use crate::config::EngineConfig;
use crate::types::{MicroExpression, MoodLabel};
use serde::{Deserialize, Serialize};

/// Per-frame expression inputs; `None` marks sub-metrics voided upstream
#[derive(Debug, Clone, Copy)]
pub struct ExpressionInputs {
    pub smile_ratio: Option<f64>,
    pub brow_gap: Option<f64>,
    pub mouth_activity_ratio: Option<f64>,
    pub pitch_deg: f64,
    pub yaw_deg: f64,
    pub gaze_deviation: Option<f64>,
}

/// Per-frame mood assessment
#[derive(Debug, Clone)]
pub struct MoodAssessment {
    pub mood_score: f64,
    pub mood_label: MoodLabel,
    pub microexpression: Option<MicroExpression>,
    /// 0-100 speaking-motion proxy; `None` when the mouth was degenerate
    pub mouth_activity: Option<f64>,
}

/// Per-session expression state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpressionTracker {
    /// Baseline for the micro-expression delta
    last_stable_smile: Option<f64>,
    /// Frames since the last micro-expression event
    frames_since_event: u32,
}

impl ExpressionTracker {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            last_stable_smile: None,
            // a fresh session may fire as soon as it has a baseline
            frames_since_event: config.microexpression_cooldown + 1,
        }
    }

    /// Score one frame's expression and detect micro-expressions
    pub fn assess(&mut self, inputs: &ExpressionInputs, config: &EngineConfig) -> MoodAssessment {
        let mut score = config.mood_baseline;

        if let Some(smile) = inputs.smile_ratio {
            // saturate so exaggerated smiles stop earning extra reward
            let delta = (smile - config.smile_neutral).min(config.smile_gain_cap);
            score += config.smile_weight * delta;
        }
        if let Some(brow) = inputs.brow_gap {
            score += config.brow_weight * (brow - config.brow_relaxed);
        }
        score -= config.pose_weight * (inputs.pitch_deg.abs() + inputs.yaw_deg.abs());
        if let Some(gaze) = inputs.gaze_deviation {
            score -= config.gaze_weight * gaze;
        }
        let mood_score = score.clamp(0.0, 100.0);

        let microexpression = self.detect_microexpression(inputs.smile_ratio, config);

        let mouth_activity = inputs.mouth_activity_ratio.map(|ratio| {
            ((ratio - config.mouth_activity_floor) * config.mouth_activity_scale).clamp(0.0, 100.0)
        });

        MoodAssessment {
            mood_score,
            mood_label: MoodLabel::from_score(mood_score),
            microexpression,
            mouth_activity,
        }
    }

    /// Compare the current smile ratio against the last stable baseline.
    ///
    /// The baseline follows the ratio while it is stable (sub-threshold
    /// delta), re-anchors when an event commits, and holds while an
    /// above-threshold delta sits inside the cooldown so a sustained change
    /// produces one event, not one per cooldown expiry.
    fn detect_microexpression(
        &mut self,
        smile_ratio: Option<f64>,
        config: &EngineConfig,
    ) -> Option<MicroExpression> {
        self.frames_since_event = self.frames_since_event.saturating_add(1);

        let smile = smile_ratio?;
        let Some(baseline) = self.last_stable_smile else {
            self.last_stable_smile = Some(smile);
            return None;
        };

        let delta = (smile - baseline).abs();
        if delta > config.microexpression_sensitivity {
            if self.frames_since_event > config.microexpression_cooldown {
                self.frames_since_event = 0;
                self.last_stable_smile = Some(smile);
                return Some(MicroExpression { smile_delta: delta });
            }
            // inside the cooldown: hold the baseline
            return None;
        }

        self.last_stable_smile = Some(smile);
        None
    }
}
