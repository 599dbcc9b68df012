//! Pose and gaze evaluation
//!
//! Converts the raw pose vectors into signed pitch/yaw degrees and the mean
//! iris offset into a normalized gaze-deviation scalar. Gaze is a relative
//! measure (0 = centered) and intentionally decoupled from head pose. The
//! classifications here feed the confidence dynamics and the warning gate,
//! never the UI directly.

use crate::config::EngineConfig;
use crate::geometry::RawGeometry;

/// Per-frame pose and gaze evaluation
#[derive(Debug, Clone, Copy)]
pub struct PoseGaze {
    /// Signed pitch in degrees, 0 at a frontal pose
    pub pitch_deg: f64,
    /// Signed yaw in degrees, 0 at a frontal pose
    pub yaw_deg: f64,
    /// Mean iris offset from center; `None` when both eyes were degenerate
    pub gaze_deviation: Option<f64>,
}

impl PoseGaze {
    /// Whether the head has turned or tilted past the configured limits
    pub fn excessive_movement(&self, config: &EngineConfig) -> bool {
        self.pitch_deg.abs() > config.pitch_limit_deg || self.yaw_deg.abs() > config.yaw_limit_deg
    }

    /// Whether the gaze left the configured center band. A frame with no
    /// gaze measurement never triggers.
    pub fn looking_away(&self, config: &EngineConfig) -> bool {
        self.gaze_deviation
            .map(|g| g > config.gaze_limit)
            .unwrap_or(false)
    }
}

/// Evaluate head pose and gaze deviation for one frame.
///
/// Yaw is the angle of the temple-to-temple vector's vertical rise over its
/// horizontal run; pitch is derived analogously from the nose-to-temple-
/// midpoint vector's depth over its vertical drop.
pub fn evaluate(geometry: &RawGeometry, config: &EngineConfig) -> PoseGaze {
    let temple = geometry.temple_vector;
    let yaw_deg = temple.y.atan2(temple.x).to_degrees();

    let nose = geometry.nose_offset;
    let pitch_deg = nose.z.atan2(nose.y).to_degrees();

    let gaze_deviation = geometry
        .mean_iris_ratio()
        .map(|ratio| (ratio - config.gaze_center).abs());

    PoseGaze {
        pitch_deg,
        yaw_deg,
        gaze_deviation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::Point3;

    fn geometry(temple: Point3, nose: Point3, iris_ratio: Option<f64>) -> RawGeometry {
        RawGeometry {
            left_ear: Some(0.3),
            right_ear: Some(0.3),
            left_iris_ratio: iris_ratio,
            right_iris_ratio: iris_ratio,
            smile_ratio: Some(2.5),
            mouth_activity_ratio: Some(0.4),
            brow_gap: Some(0.05),
            temple_vector: temple,
            nose_offset: nose,
        }
    }

    #[test]
    fn test_frontal_pose_is_zero() {
        let config = EngineConfig::default();
        let geom = geometry(
            Point3::new(0.56, 0.0, 0.0),
            Point3::new(0.0, 0.10, 0.0),
            Some(0.5),
        );
        let pose = evaluate(&geom, &config);
        assert!(pose.yaw_deg.abs() < 1e-9);
        assert!(pose.pitch_deg.abs() < 1e-9);
        assert!(pose.gaze_deviation.unwrap().abs() < 1e-9);
        assert!(!pose.excessive_movement(&config));
        assert!(!pose.looking_away(&config));
    }

    #[test]
    fn test_yaw_is_signed() {
        let config = EngineConfig::default();
        // 30 degree rise: dy = dx * tan(30°)
        let dy = 0.56 * 30f64.to_radians().tan();
        let geom = geometry(
            Point3::new(0.56, dy, 0.0),
            Point3::new(0.0, 0.10, 0.0),
            Some(0.5),
        );
        let pose = evaluate(&geom, &config);
        assert!((pose.yaw_deg - 30.0).abs() < 1e-9);
        assert!(pose.excessive_movement(&config));

        let geom = geometry(
            Point3::new(0.56, -dy, 0.0),
            Point3::new(0.0, 0.10, 0.0),
            Some(0.5),
        );
        let pose = evaluate(&geom, &config);
        assert!((pose.yaw_deg + 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_pitch_from_nose_depth() {
        let config = EngineConfig::default();
        let dz = 0.10 * 20f64.to_radians().tan();
        let geom = geometry(
            Point3::new(0.56, 0.0, 0.0),
            Point3::new(0.0, 0.10, dz),
            Some(0.5),
        );
        let pose = evaluate(&geom, &config);
        assert!((pose.pitch_deg - 20.0).abs() < 1e-9);
        // 20 > 18 degree pitch limit
        assert!(pose.excessive_movement(&config));
    }

    #[test]
    fn test_movement_thresholds_are_exclusive() {
        let config = EngineConfig::default();
        let pose = PoseGaze {
            pitch_deg: 18.0,
            yaw_deg: 22.0,
            gaze_deviation: Some(0.0),
        };
        assert!(!pose.excessive_movement(&config));

        let pose = PoseGaze {
            pitch_deg: 18.01,
            yaw_deg: 0.0,
            gaze_deviation: Some(0.0),
        };
        assert!(pose.excessive_movement(&config));
    }

    #[test]
    fn test_gaze_deviation_from_iris_offset() {
        let config = EngineConfig::default();
        let geom = geometry(
            Point3::new(0.56, 0.0, 0.0),
            Point3::new(0.0, 0.10, 0.0),
            Some(0.75),
        );
        let pose = evaluate(&geom, &config);
        assert!((pose.gaze_deviation.unwrap() - 0.25).abs() < 1e-9);
        assert!(pose.looking_away(&config));
    }

    #[test]
    fn test_missing_gaze_never_triggers() {
        let config = EngineConfig::default();
        let geom = geometry(Point3::new(0.56, 0.0, 0.0), Point3::new(0.0, 0.10, 0.0), None);
        let pose = evaluate(&geom, &config);
        assert!(pose.gaze_deviation.is_none());
        assert!(!pose.looking_away(&config));
    }
}
