//! Output types for the behavioral signal engine
//!
//! This module defines the per-frame input envelope and the immutable
//! [`MetricsSnapshot`] the engine hands back to the transport layer.

use crate::landmarks::{LandmarkFrame, LandmarkRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-frame input from the landmark-detection collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameInput {
    /// Landmarks for the single tracked face
    Landmarks(LandmarkFrame),
    /// Detection ran but found no face
    NoFace,
}

/// Why a frame produced no snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Detector reported no face; session state is frozen
    NoFace,
    /// A required landmark role was absent; session state is frozen
    MissingLandmarks(LandmarkRole),
}

/// Result of applying one frame to a session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameOutput {
    /// The frame was scored
    Snapshot(MetricsSnapshot),
    /// The frame was skipped and state preserved
    Skipped(SkipReason),
}

impl FrameOutput {
    /// The snapshot, if the frame was scored
    pub fn snapshot(&self) -> Option<&MetricsSnapshot> {
        match self {
            FrameOutput::Snapshot(s) => Some(s),
            FrameOutput::Skipped(_) => None,
        }
    }
}

/// Three-way mood classification, a pure function of the mood score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoodLabel {
    Engaged,
    Neutral,
    Tense,
}

impl MoodLabel {
    /// Band mapping: score > 70 → Engaged, score < 40 → Tense, else Neutral.
    /// 70 and 40 themselves belong to the Neutral band.
    pub fn from_score(score: f64) -> Self {
        if score > 70.0 {
            MoodLabel::Engaged
        } else if score < 40.0 {
            MoodLabel::Tense
        } else {
            MoodLabel::Neutral
        }
    }
}

/// Warning categories, in descending surface priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCategory {
    GazeAway,
    HeadMovement,
    RapidBlink,
}

impl WarningCategory {
    /// User-facing message for this category
    pub fn message(&self) -> &'static str {
        match self {
            WarningCategory::GazeAway => "Maintain eye contact with the camera.",
            WarningCategory::HeadMovement => "Too much head movement detected.",
            WarningCategory::RapidBlink => "Blinking rapidly detected.",
        }
    }
}

/// A rate-limited, user-facing warning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub category: WarningCategory,
    pub message: String,
}

impl Warning {
    pub fn new(category: WarningCategory) -> Self {
        Self {
            category,
            message: category.message().to_string(),
        }
    }
}

/// A discrete micro-expression event (sudden smile-ratio change)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MicroExpression {
    /// Absolute smile-ratio delta against the last stable baseline
    pub smile_delta: f64,
}

/// The engine's per-frame output, immutable once produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Behavioral confidence proxy, 20-100
    pub confidence_score: f64,
    /// Cumulative blinks this session, non-decreasing
    pub blink_count: u32,
    /// Whether the eyes are closed on this frame
    pub eyes_closed: bool,
    /// Head pitch in signed degrees, 0 at frontal
    pub head_pitch: f64,
    /// Head yaw in signed degrees, 0 at frontal
    pub head_yaw: f64,
    /// Normalized gaze deviation, 0 = centered
    pub gaze_deviation: f64,
    /// Mood score, 0-100
    pub mood_score: f64,
    /// Label derived from the mood score
    pub mood_label: MoodLabel,
    /// Speaking-motion proxy, 0-100
    pub mouth_activity: f64,
    /// Present only when a micro-expression was detected this frame
    #[serde(skip_serializing_if = "Option::is_none")]
    pub microexpression: Option<MicroExpression>,
    /// Present only when a warning category's cooldown elapsed with an
    /// active trigger
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<Warning>,
    /// Capture timestamp echoed from the input frame
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mood_label_bands() {
        assert_eq!(MoodLabel::from_score(100.0), MoodLabel::Engaged);
        assert_eq!(MoodLabel::from_score(70.1), MoodLabel::Engaged);
        assert_eq!(MoodLabel::from_score(70.0), MoodLabel::Neutral);
        assert_eq!(MoodLabel::from_score(40.0), MoodLabel::Neutral);
        assert_eq!(MoodLabel::from_score(39.9), MoodLabel::Tense);
        assert_eq!(MoodLabel::from_score(0.0), MoodLabel::Tense);
    }

    #[test]
    fn test_warning_carries_category_message() {
        let warning = Warning::new(WarningCategory::GazeAway);
        assert_eq!(warning.message, "Maintain eye contact with the camera.");
    }

    #[test]
    fn test_snapshot_omits_absent_events() {
        let snapshot = MetricsSnapshot {
            confidence_score: 100.0,
            blink_count: 0,
            eyes_closed: false,
            head_pitch: 0.0,
            head_yaw: 0.0,
            gaze_deviation: 0.0,
            mood_score: 60.0,
            mood_label: MoodLabel::Neutral,
            mouth_activity: 0.0,
            microexpression: None,
            warning: None,
            captured_at: None,
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(!json.contains("microexpression"));
        assert!(!json.contains("warning"));
        assert!(json.contains("\"mood_label\":\"Neutral\""));
    }

    #[test]
    fn test_frame_input_no_face_wire_form() {
        let json = serde_json::to_string(&FrameInput::NoFace).unwrap();
        assert_eq!(json, "\"no_face\"");
    }
}
