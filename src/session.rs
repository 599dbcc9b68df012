//! Per-session frame orchestration
//!
//! One [`Session`] owns all temporal state for one connection and applies
//! frames strictly in arrival order through `&mut` receivers — the
//! single-writer discipline that keeps concurrent sessions safe without
//! locks. Every update is synchronous, bounded work; nothing here blocks.
//!
//! Frames with no face or a missing landmark role freeze the session: no
//! counter advances, no score moves, and the caller receives a typed skip.

use crate::blink::BlinkTracker;
use crate::config::EngineConfig;
use crate::confidence::{ConfidenceTracker, PenaltyKind};
use crate::error::SignalError;
use crate::gate::{Triggers, WarningGate};
use crate::geometry;
use crate::landmarks::LandmarkFrame;
use crate::mood::{ExpressionInputs, ExpressionTracker};
use crate::pose;
use crate::types::{FrameInput, FrameOutput, MetricsSnapshot, SkipReason};
use serde::{Deserialize, Serialize};

/// Last published values for sub-metrics that can degrade frame-to-frame.
///
/// When a denominator collapses on one frame the affected metric re-publishes
/// its previous value instead of failing the snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LastPublished {
    gaze_deviation: f64,
    mouth_activity: f64,
}

/// All temporal state for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    blink: BlinkTracker,
    confidence: ConfidenceTracker,
    expression: ExpressionTracker,
    gate: WarningGate,
    last: LastPublished,
    frames_processed: u64,
}

impl SessionState {
    fn new(config: &EngineConfig) -> Self {
        Self {
            blink: BlinkTracker::new(),
            confidence: ConfidenceTracker::new(config),
            expression: ExpressionTracker::new(config),
            gate: WarningGate::new(config),
            last: LastPublished::default(),
            frames_processed: 0,
        }
    }
}

/// One active session: the configuration it was calibrated with plus its
/// mutable state. The exclusive owner of the state.
#[derive(Debug, Clone)]
pub struct Session {
    config: EngineConfig,
    state: SessionState,
}

impl Session {
    pub fn new(config: EngineConfig) -> Self {
        let state = SessionState::new(&config);
        Self { config, state }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Frames that produced a snapshot so far
    pub fn frames_processed(&self) -> u64 {
        self.state.frames_processed
    }

    /// Cumulative blink count
    pub fn blink_count(&self) -> u32 {
        self.state.blink.blink_count()
    }

    /// Current confidence score
    pub fn confidence_score(&self) -> f64 {
        self.state.confidence.score()
    }

    /// Apply one frame in arrival order and produce a snapshot, or skip.
    ///
    /// Skipped frames (no face, missing landmark) leave every piece of
    /// session state exactly as it was.
    pub fn process_frame(&mut self, input: FrameInput) -> FrameOutput {
        let frame = match input {
            FrameInput::Landmarks(frame) => frame,
            FrameInput::NoFace => return FrameOutput::Skipped(SkipReason::NoFace),
        };

        let geom = match geometry::extract(&frame) {
            Ok(geom) => geom,
            Err(SignalError::MissingLandmark(role)) => {
                return FrameOutput::Skipped(SkipReason::MissingLandmarks(role));
            }
            // extraction only fails on missing landmarks
            Err(_) => unreachable!("geometry extraction has a single failure mode"),
        };

        // blink tracking only advances on frames with a measurable EAR
        let blink = geom
            .mean_ear()
            .map(|ear| self.state.blink.update(ear, &self.config));
        let rapid_blink = blink.map(|b| b.rapid).unwrap_or(false);

        let pose = pose::evaluate(&geom, &self.config);
        let movement = pose.excessive_movement(&self.config);
        let gaze_away = pose.looking_away(&self.config);

        let assessment = self.state.expression.assess(
            &ExpressionInputs {
                smile_ratio: geom.smile_ratio,
                brow_gap: geom.brow_gap,
                mouth_activity_ratio: geom.mouth_activity_ratio,
                pitch_deg: pose.pitch_deg,
                yaw_deg: pose.yaw_deg,
                gaze_deviation: pose.gaze_deviation,
            },
            &self.config,
        );

        // exactly one confidence rule per frame, charged to the strongest cue
        let penalty = if movement {
            Some(PenaltyKind::Movement)
        } else if rapid_blink {
            Some(PenaltyKind::RapidBlink)
        } else if gaze_away {
            Some(PenaltyKind::GazeAway)
        } else {
            None
        };
        let confidence = self.state.confidence.apply(penalty, &self.config);

        let warning = self.state.gate.evaluate(
            Triggers {
                gaze_away,
                movement,
                rapid_blink,
            },
            &self.config,
        );

        // degradable metrics fall back to their last published value
        let gaze_deviation = pose.gaze_deviation.unwrap_or(self.state.last.gaze_deviation);
        let mouth_activity = assessment
            .mouth_activity
            .unwrap_or(self.state.last.mouth_activity);
        self.state.last.gaze_deviation = gaze_deviation;
        self.state.last.mouth_activity = mouth_activity;
        self.state.frames_processed += 1;

        FrameOutput::Snapshot(MetricsSnapshot {
            confidence_score: round_dp(confidence, 1),
            blink_count: self.state.blink.blink_count(),
            eyes_closed: self.state.blink.eyes_closed(),
            head_pitch: round_dp(pose.pitch_deg, 2),
            head_yaw: round_dp(pose.yaw_deg, 2),
            gaze_deviation: round_dp(gaze_deviation, 3),
            mood_score: round_dp(assessment.mood_score, 1),
            mood_label: assessment.mood_label,
            mouth_activity: round_dp(mouth_activity, 1),
            microexpression: assessment.microexpression,
            warning,
            captured_at: frame.captured_at,
        })
    }
}

fn round_dp(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
