// src/analysis/posture.rs
//
// Bilateral posture symmetry. Runs alongside every exercise classifier
// and is independent of the exercise verdict.

use crate::geometry::vertical_symmetry;
use crate::types::{FormVerdict, FrameSkip, LandmarkFrame, Point2D, PoseJoint, ReasonCode};

// Maximum tolerated vertical offset between paired joints. This is
// compared in the source frame's pixel space, not normalized
// coordinates, so the tolerance is resolution-dependent: 30 px of tilt
// on a 480p frame is a much larger lean than on 4K footage.
const SYMMETRY_MAX_PX: f64 = 30.0;

/// Check shoulder and hip levelness. Good iff both pairs are within
/// the pixel tolerance.
pub fn check_posture(frame: &LandmarkFrame) -> Result<FormVerdict, FrameSkip> {
    let left_shoulder = require(frame, PoseJoint::LeftShoulder)?;
    let right_shoulder = require(frame, PoseJoint::RightShoulder)?;
    let left_hip = require(frame, PoseJoint::LeftHip)?;
    let right_hip = require(frame, PoseJoint::RightHip)?;

    let shoulder_offset = vertical_symmetry(left_shoulder, right_shoulder);
    let hip_offset = vertical_symmetry(left_hip, right_hip);

    if shoulder_offset <= SYMMETRY_MAX_PX && hip_offset <= SYMMETRY_MAX_PX {
        Ok(FormVerdict::Good)
    } else {
        Ok(FormVerdict::NeedsCorrection {
            reasons: vec![ReasonCode::PostureAsymmetric],
        })
    }
}

fn require(frame: &LandmarkFrame, joint: PoseJoint) -> Result<Point2D, FrameSkip> {
    frame.point(joint).ok_or(FrameSkip::MissingJoint(joint))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point2D;

    fn torso_frame(shoulder_offset: f64, hip_offset: f64) -> LandmarkFrame {
        LandmarkFrame::from_points([
            (PoseJoint::LeftShoulder, Point2D::new(100.0, 100.0)),
            (PoseJoint::RightShoulder, Point2D::new(300.0, 100.0 + shoulder_offset)),
            (PoseJoint::LeftHip, Point2D::new(120.0, 250.0)),
            (PoseJoint::RightHip, Point2D::new(280.0, 250.0 + hip_offset)),
        ])
    }

    #[test]
    fn level_torso_is_good() {
        assert!(check_posture(&torso_frame(5.0, 10.0)).unwrap().is_good());
    }

    #[test]
    fn hip_tilt_alone_fails_the_check() {
        // Shoulders level at 5 px, hips tilted 45 px: posture fails.
        let verdict = check_posture(&torso_frame(5.0, 45.0)).unwrap();
        assert_eq!(verdict.reasons(), &[ReasonCode::PostureAsymmetric]);
    }

    #[test]
    fn threshold_is_inclusive() {
        assert!(check_posture(&torso_frame(30.0, 30.0)).unwrap().is_good());
    }

    #[test]
    fn missing_bilateral_joint_skips() {
        let frame = LandmarkFrame::from_points([
            (PoseJoint::LeftShoulder, Point2D::new(100.0, 100.0)),
            (PoseJoint::RightShoulder, Point2D::new(300.0, 100.0)),
            (PoseJoint::LeftHip, Point2D::new(120.0, 250.0)),
        ]);
        let err = check_posture(&frame).unwrap_err();
        assert_eq!(err, FrameSkip::MissingJoint(PoseJoint::RightHip));
    }
}
