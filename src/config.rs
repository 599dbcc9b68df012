//! Engine configuration
//!
//! Every threshold and weight the engine uses lives in one immutable
//! [`EngineConfig`] constructed at session start. This keeps per-session
//! calibration a data change, not a code change.

use serde::{Deserialize, Serialize};

/// Denominator floor below which a geometric ratio is considered degenerate
pub const GEOMETRY_EPSILON: f64 = 1e-6;

/// Thresholds and weights for all per-frame scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// EAR below this counts as an eyes-closed frame
    pub blink_ear_threshold: f64,
    /// Minimum consecutive closed frames for a reopen to commit a blink
    pub blink_commit_frames: u32,
    /// Rolling EAR window length (frames) used for rapid-blink detection
    pub ear_window: usize,
    /// More low-EAR samples than this in a full window flags rapid blinking
    pub rapid_blink_low_samples: usize,

    /// |pitch| above this is excessive head movement (degrees)
    pub pitch_limit_deg: f64,
    /// |yaw| above this is excessive head movement (degrees)
    pub yaw_limit_deg: f64,
    /// Iris ratio reference for a centered gaze
    pub gaze_center: f64,
    /// Gaze deviation above this counts as looking away
    pub gaze_limit: f64,

    /// Confidence floor
    pub min_confidence: f64,
    /// Confidence ceiling (and session-start value)
    pub max_confidence: f64,
    /// Base per-frame confidence decay when a trigger is active
    pub score_decay: f64,
    /// Base per-frame confidence recovery on calm frames
    pub score_recovery: f64,
    /// Decay multiplier when the trigger is excessive head movement
    pub movement_penalty_scale: f64,
    /// Decay multiplier when the trigger is rapid blinking
    pub blink_penalty_scale: f64,
    /// Calm-frame streak length at which recovery reaches double the base
    pub calm_ramp_frames: u32,

    /// Mood score at a fully neutral face
    pub mood_baseline: f64,
    /// Smile ratio of a relaxed, neutral mouth
    pub smile_neutral: f64,
    /// Weight of the smile term (w1)
    pub smile_weight: f64,
    /// Smile delta is saturated at this value before weighting
    pub smile_gain_cap: f64,
    /// Normalized brow gap of relaxed brows
    pub brow_relaxed: f64,
    /// Weight of the brow term (w2)
    pub brow_weight: f64,
    /// Weight of the head-pose penalty per degree (w3)
    pub pose_weight: f64,
    /// Weight of the gaze-deviation penalty (w4)
    pub gaze_weight: f64,
    /// Mouth-activity ratio at which the activity score starts rising
    pub mouth_activity_floor: f64,
    /// Scale from mouth-activity ratio to the 0-100 activity score
    pub mouth_activity_scale: f64,

    /// Minimum smile-ratio delta that qualifies as a micro-expression
    pub microexpression_sensitivity: f64,
    /// Frames that must elapse between micro-expression events
    pub microexpression_cooldown: u32,

    /// Frames between movement warnings
    pub movement_warning_cooldown: u32,
    /// Frames between gaze warnings
    pub gaze_warning_cooldown: u32,
    /// Frames between rapid-blink warnings
    pub blink_warning_cooldown: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            blink_ear_threshold: 0.25,
            blink_commit_frames: 3,
            ear_window: 12,
            rapid_blink_low_samples: 4,

            pitch_limit_deg: 18.0,
            yaw_limit_deg: 22.0,
            gaze_center: 0.5,
            gaze_limit: 0.2,

            min_confidence: 20.0,
            max_confidence: 100.0,
            score_decay: 1.4,
            score_recovery: 1.0,
            movement_penalty_scale: 1.5,
            blink_penalty_scale: 1.2,
            calm_ramp_frames: 20,

            mood_baseline: 60.0,
            smile_neutral: 2.5,
            smile_weight: 12.0,
            smile_gain_cap: 2.5,
            brow_relaxed: 0.05,
            brow_weight: 50.0,
            pose_weight: 0.5,
            gaze_weight: 70.0,
            mouth_activity_floor: 0.06,
            mouth_activity_scale: 1600.0,

            microexpression_sensitivity: 1.0,
            microexpression_cooldown: 25,

            movement_warning_cooldown: 15,
            gaze_warning_cooldown: 15,
            blink_warning_cooldown: 25,
        }
    }
}

impl EngineConfig {
    /// Stricter posture limits for coaching senior-level interview prep
    pub fn strict() -> Self {
        Self {
            pitch_limit_deg: 12.0,
            yaw_limit_deg: 15.0,
            gaze_limit: 0.15,
            ..Default::default()
        }
    }

    /// More forgiving limits for first-time users
    pub fn lenient() -> Self {
        Self {
            pitch_limit_deg: 25.0,
            yaw_limit_deg: 30.0,
            gaze_limit: 0.28,
            score_decay: 1.0,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_matches_normative_thresholds() {
        let config = EngineConfig::default();
        assert_eq!(config.blink_ear_threshold, 0.25);
        assert_eq!(config.blink_commit_frames, 3);
        assert_eq!(config.ear_window, 12);
        assert_eq!(config.pitch_limit_deg, 18.0);
        assert_eq!(config.yaw_limit_deg, 22.0);
        assert_eq!(config.min_confidence, 20.0);
        assert_eq!(config.max_confidence, 100.0);
        assert_eq!(config.microexpression_cooldown, 25);
        assert_eq!(config.movement_warning_cooldown, 15);
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = EngineConfig::strict();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.pitch_limit_deg, config.pitch_limit_deg);
        assert_eq!(parsed.gaze_limit, config.gaze_limit);
    }

    #[test]
    fn test_presets_keep_asymmetric_scoring() {
        for config in [
            EngineConfig::default(),
            EngineConfig::strict(),
            EngineConfig::lenient(),
        ] {
            assert!(config.score_decay >= config.score_recovery);
        }
    }
}
