//! Landmark input types
//!
//! One [`LandmarkFrame`] is produced per processed video frame by the external
//! landmark-detection collaborator. Points are addressed by semantic role, not
//! by mesh index, so any detector that can name these roles can drive the
//! engine. Coordinates are image-normalized.

use crate::error::SignalError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A 3D point in image-normalized units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Component-wise difference `self - other`
    pub fn delta(&self, other: &Point3) -> Point3 {
        Point3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Midpoint between two points
    pub fn midpoint(&self, other: &Point3) -> Point3 {
        Point3::new(
            (self.x + other.x) / 2.0,
            (self.y + other.y) / 2.0,
            (self.z + other.z) / 2.0,
        )
    }
}

/// Semantic roles of the landmarks the extractors require.
///
/// Each eye contributes the six points of the standard EAR formulation:
/// outer corner, two upper-lid points, inner corner, two lower-lid points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkRole {
    LeftEyeOuter,
    LeftEyeUpperA,
    LeftEyeUpperB,
    LeftEyeInner,
    LeftEyeLowerA,
    LeftEyeLowerB,
    RightEyeOuter,
    RightEyeUpperA,
    RightEyeUpperB,
    RightEyeInner,
    RightEyeLowerA,
    RightEyeLowerB,
    LeftIris,
    RightIris,
    NoseTip,
    LeftTemple,
    RightTemple,
    MouthLeft,
    MouthRight,
    MouthTop,
    MouthBottom,
    LeftBrow,
    RightBrow,
}

impl LandmarkRole {
    /// All roles a frame must carry to be scorable
    pub const ALL: [LandmarkRole; 23] = [
        LandmarkRole::LeftEyeOuter,
        LandmarkRole::LeftEyeUpperA,
        LandmarkRole::LeftEyeUpperB,
        LandmarkRole::LeftEyeInner,
        LandmarkRole::LeftEyeLowerA,
        LandmarkRole::LeftEyeLowerB,
        LandmarkRole::RightEyeOuter,
        LandmarkRole::RightEyeUpperA,
        LandmarkRole::RightEyeUpperB,
        LandmarkRole::RightEyeInner,
        LandmarkRole::RightEyeLowerA,
        LandmarkRole::RightEyeLowerB,
        LandmarkRole::LeftIris,
        LandmarkRole::RightIris,
        LandmarkRole::NoseTip,
        LandmarkRole::LeftTemple,
        LandmarkRole::RightTemple,
        LandmarkRole::MouthLeft,
        LandmarkRole::MouthRight,
        LandmarkRole::MouthTop,
        LandmarkRole::MouthBottom,
        LandmarkRole::LeftBrow,
        LandmarkRole::RightBrow,
    ];
}

impl fmt::Display for LandmarkRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // snake_case, matching the serde wire form
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(json.trim_matches('"'))
    }
}

/// One frame's worth of named landmarks.
///
/// Owned transiently by the engine for the duration of a single update call
/// and never retained.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LandmarkFrame {
    /// Named points, keyed by semantic role
    pub points: HashMap<LandmarkRole, Point3>,
    /// Capture timestamp forwarded by the transport, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
}

impl LandmarkFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a named point, replacing any previous point for the role
    pub fn insert(&mut self, role: LandmarkRole, point: Point3) -> &mut Self {
        self.points.insert(role, point);
        self
    }

    /// Look up a point by role
    pub fn get(&self, role: LandmarkRole) -> Option<Point3> {
        self.points.get(&role).copied()
    }

    /// Look up a point the extractors cannot do without
    pub fn require(&self, role: LandmarkRole) -> Result<Point3, SignalError> {
        self.get(role).ok_or(SignalError::MissingLandmark(role))
    }

    /// Whether every role the extractors need is present
    pub fn is_complete(&self) -> bool {
        LandmarkRole::ALL.iter().all(|r| self.points.contains_key(r))
    }
}
