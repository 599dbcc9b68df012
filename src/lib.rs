//! Interview Signals - Per-frame behavioral signal engine for mock interviews
//!
//! The engine ingests one set of named 3D facial landmarks per video frame and
//! maintains, per active session, the temporal state needed to turn noisy
//! instantaneous geometry into smooth, explainable metrics:
//! landmarks → geometry extraction → {blink tracking, pose & gaze, mood &
//! expression} → confidence dynamics → warning gate → metrics snapshot.
//!
//! ## Modules
//!
//! - **Geometry**: stateless per-frame ratio extraction from landmarks
//! - **Blink**: eye-closure run tracking with a monotonic blink counter
//! - **Pose & Gaze**: head angles and normalized gaze deviation
//! - **Confidence**: bounded score with asymmetric decay/recovery
//! - **Mood**: weighted mood score, label, and micro-expression detection
//! - **Gate**: rate-limited, prioritized user-facing warnings
//! - **Engine**: session registry with single-writer per-session updates

pub mod blink;
pub mod config;
pub mod confidence;
pub mod engine;
pub mod error;
pub mod gate;
pub mod geometry;
pub mod landmarks;
pub mod mood;
pub mod pose;
pub mod session;
pub mod types;

pub use config::EngineConfig;
pub use engine::{SessionId, SignalEngine};
pub use error::SignalError;
pub use landmarks::{LandmarkFrame, LandmarkRole, Point3};
pub use session::Session;
pub use types::{
    FrameInput, FrameOutput, MetricsSnapshot, MicroExpression, MoodLabel, SkipReason, Warning,
    WarningCategory,
};

/// Engine version embedded in exported payloads
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for exported payloads
pub const PRODUCER_NAME: &str = "interview-signals";
