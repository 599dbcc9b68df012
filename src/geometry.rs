//! Geometry extractors
//!
//! Pure per-frame conversion of a [`LandmarkFrame`] into the raw ratios the
//! stateful components consume. Extraction fails only when a required
//! landmark role is absent; a degenerate denominator (eye width, mouth
//! width/height, inter-ocular distance at or below [`GEOMETRY_EPSILON`])
//! voids just the affected sub-metric, leaving the rest of the frame usable.

use crate::config::GEOMETRY_EPSILON;
use crate::error::SignalError;
use crate::landmarks::{LandmarkFrame, LandmarkRole, Point3};

/// Raw per-frame measurements.
///
/// `None` fields mark sub-metrics voided by degenerate geometry on this
/// frame; consumers skip them rather than failing the frame.
#[derive(Debug, Clone)]
pub struct RawGeometry {
    /// Left eye-aspect ratio
    pub left_ear: Option<f64>,
    /// Right eye-aspect ratio
    pub right_ear: Option<f64>,
    /// Left iris-to-inner-corner ratio (0.5 = centered)
    pub left_iris_ratio: Option<f64>,
    /// Right iris-to-inner-corner ratio (0.5 = centered)
    pub right_iris_ratio: Option<f64>,
    /// Mouth width / mouth height
    pub smile_ratio: Option<f64>,
    /// Mouth height / mouth width
    pub mouth_activity_ratio: Option<f64>,
    /// Brow-to-eye distance normalized by inter-ocular distance
    pub brow_gap: Option<f64>,
    /// Temple-to-temple vector (right minus left)
    pub temple_vector: Point3,
    /// Nose tip minus the temple midpoint
    pub nose_offset: Point3,
}

impl RawGeometry {
    /// Mean EAR over whichever eyes measured this frame
    pub fn mean_ear(&self) -> Option<f64> {
        match (self.left_ear, self.right_ear) {
            (Some(l), Some(r)) => Some((l + r) / 2.0),
            (Some(l), None) => Some(l),
            (None, Some(r)) => Some(r),
            (None, None) => None,
        }
    }

    /// Mean iris ratio over whichever eyes measured this frame
    pub fn mean_iris_ratio(&self) -> Option<f64> {
        match (self.left_iris_ratio, self.right_iris_ratio) {
            (Some(l), Some(r)) => Some((l + r) / 2.0),
            (Some(l), None) => Some(l),
            (None, Some(r)) => Some(r),
            (None, None) => None,
        }
    }
}

/// Six-point eye-aspect ratio: mean of the two vertical lid distances over
/// twice the horizontal corner distance. `None` when the eye has no width.
fn eye_aspect_ratio(
    outer: Point3,
    upper_a: Point3,
    upper_b: Point3,
    inner: Point3,
    lower_a: Point3,
    lower_b: Point3,
) -> Option<f64> {
    let vertical = upper_a.distance(&lower_b) + upper_b.distance(&lower_a);
    let horizontal = outer.distance(&inner);
    if horizontal <= GEOMETRY_EPSILON {
        return None;
    }
    Some(vertical / (2.0 * horizontal))
}

/// Iris-center-to-inner-corner distance over eye width
fn iris_ratio(iris: Point3, inner: Point3, outer: Point3) -> Option<f64> {
    let width = outer.distance(&inner);
    if width <= GEOMETRY_EPSILON {
        return None;
    }
    Some(iris.distance(&inner) / width)
}

/// Extract raw ratios from one frame.
///
/// Fails with [`SignalError::MissingLandmark`] when any required role is
/// absent; the caller skips the frame and leaves session state untouched.
pub fn extract(frame: &LandmarkFrame) -> Result<RawGeometry, SignalError> {
    let left_eye_outer = frame.require(LandmarkRole::LeftEyeOuter)?;
    let left_eye_upper_a = frame.require(LandmarkRole::LeftEyeUpperA)?;
    let left_eye_upper_b = frame.require(LandmarkRole::LeftEyeUpperB)?;
    let left_eye_inner = frame.require(LandmarkRole::LeftEyeInner)?;
    let left_eye_lower_a = frame.require(LandmarkRole::LeftEyeLowerA)?;
    let left_eye_lower_b = frame.require(LandmarkRole::LeftEyeLowerB)?;
    let right_eye_outer = frame.require(LandmarkRole::RightEyeOuter)?;
    let right_eye_upper_a = frame.require(LandmarkRole::RightEyeUpperA)?;
    let right_eye_upper_b = frame.require(LandmarkRole::RightEyeUpperB)?;
    let right_eye_inner = frame.require(LandmarkRole::RightEyeInner)?;
    let right_eye_lower_a = frame.require(LandmarkRole::RightEyeLowerA)?;
    let right_eye_lower_b = frame.require(LandmarkRole::RightEyeLowerB)?;
    let left_iris = frame.require(LandmarkRole::LeftIris)?;
    let right_iris = frame.require(LandmarkRole::RightIris)?;
    let nose_tip = frame.require(LandmarkRole::NoseTip)?;
    let left_temple = frame.require(LandmarkRole::LeftTemple)?;
    let right_temple = frame.require(LandmarkRole::RightTemple)?;
    let mouth_left = frame.require(LandmarkRole::MouthLeft)?;
    let mouth_right = frame.require(LandmarkRole::MouthRight)?;
    let mouth_top = frame.require(LandmarkRole::MouthTop)?;
    let mouth_bottom = frame.require(LandmarkRole::MouthBottom)?;
    let left_brow = frame.require(LandmarkRole::LeftBrow)?;
    let right_brow = frame.require(LandmarkRole::RightBrow)?;

    let left_ear = eye_aspect_ratio(
        left_eye_outer,
        left_eye_upper_a,
        left_eye_upper_b,
        left_eye_inner,
        left_eye_lower_a,
        left_eye_lower_b,
    );
    let right_ear = eye_aspect_ratio(
        right_eye_outer,
        right_eye_upper_a,
        right_eye_upper_b,
        right_eye_inner,
        right_eye_lower_a,
        right_eye_lower_b,
    );

    let left_iris_ratio = iris_ratio(left_iris, left_eye_inner, left_eye_outer);
    let right_iris_ratio = iris_ratio(right_iris, right_eye_inner, right_eye_outer);

    let mouth_width = mouth_left.distance(&mouth_right);
    let mouth_height = mouth_top.distance(&mouth_bottom);
    let smile_ratio = if mouth_height > GEOMETRY_EPSILON {
        Some(mouth_width / mouth_height)
    } else {
        None
    };
    let mouth_activity_ratio = if mouth_width > GEOMETRY_EPSILON {
        Some(mouth_height / mouth_width)
    } else {
        None
    };

    let inter_ocular = left_eye_outer.distance(&right_eye_outer);
    let brow_gap = if inter_ocular > GEOMETRY_EPSILON {
        Some(
            (left_brow.distance(&left_eye_outer) + right_brow.distance(&right_eye_outer))
                / (2.0 * inter_ocular),
        )
    } else {
        None
    };

    Ok(RawGeometry {
        left_ear,
        right_ear,
        left_iris_ratio,
        right_iris_ratio,
        smile_ratio,
        mouth_activity_ratio,
        brow_gap,
        temple_vector: right_temple.delta(&left_temple),
        nose_offset: nose_tip.delta(&left_temple.midpoint(&right_temple)),
    })
}
