// src/analysis/classifier.rs
//
// Per-exercise form classifiers. Each is a pure function of one
// landmark frame: measure the mode's joint angles, compare against the
// fixed acceptance bands, emit a verdict. No state crosses frames here;
// rep counting lives in rep_counter.rs.

use crate::geometry::joint_angle;
use crate::types::{
    AngleKind, ExerciseMode, FormVerdict, FrameSkip, HipRule, LandmarkFrame, Point2D, PoseJoint,
    ReasonCode,
};

// ============================================================================
// BICEP CURL
// ============================================================================
const CURL_ELBOW_MIN: f64 = 30.0;
const CURL_ELBOW_MAX: f64 = 170.0;

// ============================================================================
// PUSHUP
// ============================================================================
const PUSHUP_ELBOW_MIN: f64 = 70.0;
const PUSHUP_ELBOW_MAX: f64 = 180.0;
const PUSHUP_BODY_MIN: f64 = 160.0;
const PUSHUP_BODY_MAX: f64 = 180.0;

// ============================================================================
// SQUAT
// ============================================================================
const SQUAT_KNEE_MIN: f64 = 70.0;
const SQUAT_KNEE_MAX: f64 = 180.0;
// The hip band has historically differed between the live-feedback
// path and the batch summary path. Likely a copy-paste slip, but which
// band was intended is unknown, so both are kept and selected by
// HipRule instead of being unified.
const SQUAT_HIP_MIN_LIVE: f64 = 70.0;
const SQUAT_HIP_MIN_BATCH: f64 = 160.0;
const SQUAT_HIP_MAX: f64 = 180.0;

/// Angles plus verdict for one frame, before posture and rep counting
/// are layered on.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub angles: Vec<(AngleKind, f64)>,
    pub verdict: FormVerdict,
}

/// Classify one frame under the given exercise mode.
///
/// Joints are taken from the body's left side, matching the provider
/// orientation the thresholds were tuned against.
pub fn classify(
    frame: &LandmarkFrame,
    mode: ExerciseMode,
    hip_rule: HipRule,
) -> Result<Classification, FrameSkip> {
    match mode {
        ExerciseMode::BicepCurl => classify_bicep_curl(frame),
        ExerciseMode::Pushup => classify_pushup(frame),
        ExerciseMode::Squat => classify_squat(frame, hip_rule),
        ExerciseMode::GeneralPose => classify_general_pose(frame),
    }
}

fn classify_bicep_curl(frame: &LandmarkFrame) -> Result<Classification, FrameSkip> {
    let shoulder = require(frame, PoseJoint::LeftShoulder)?;
    let elbow = require(frame, PoseJoint::LeftElbow)?;
    let wrist = require(frame, PoseJoint::LeftWrist)?;

    let elbow_angle = checked_angle(shoulder, elbow, wrist)?;

    let mut reasons = Vec::new();
    if elbow_angle < CURL_ELBOW_MIN {
        reasons.push(ReasonCode::TooFlexed);
    } else if elbow_angle > CURL_ELBOW_MAX {
        reasons.push(ReasonCode::TooExtended);
    }

    Ok(Classification {
        angles: vec![(AngleKind::Elbow, elbow_angle)],
        verdict: verdict_from(reasons),
    })
}

fn classify_pushup(frame: &LandmarkFrame) -> Result<Classification, FrameSkip> {
    let shoulder = require(frame, PoseJoint::LeftShoulder)?;
    let elbow = require(frame, PoseJoint::LeftElbow)?;
    let wrist = require(frame, PoseJoint::LeftWrist)?;
    let hip = require(frame, PoseJoint::LeftHip)?;
    let knee = require(frame, PoseJoint::LeftKnee)?;

    let elbow_angle = checked_angle(shoulder, elbow, wrist)?;
    let body_angle = checked_angle(shoulder, hip, knee)?;

    // Good overall only when both the elbow and the body line pass.
    let mut reasons = Vec::new();
    if elbow_angle < PUSHUP_ELBOW_MIN {
        reasons.push(ReasonCode::TooFlexed);
    } else if elbow_angle > PUSHUP_ELBOW_MAX {
        reasons.push(ReasonCode::TooExtended);
    }
    if !(PUSHUP_BODY_MIN..=PUSHUP_BODY_MAX).contains(&body_angle) {
        reasons.push(ReasonCode::BodyNotStraight);
    }

    Ok(Classification {
        angles: vec![(AngleKind::Elbow, elbow_angle), (AngleKind::Body, body_angle)],
        verdict: verdict_from(reasons),
    })
}

fn classify_squat(frame: &LandmarkFrame, hip_rule: HipRule) -> Result<Classification, FrameSkip> {
    let hip = require(frame, PoseJoint::LeftHip)?;
    let knee = require(frame, PoseJoint::LeftKnee)?;
    let ankle = require(frame, PoseJoint::LeftAnkle)?;
    let shoulder = require(frame, PoseJoint::LeftShoulder)?;

    let knee_angle = checked_angle(hip, knee, ankle)?;
    let hip_angle = checked_angle(shoulder, hip, knee)?;

    let hip_min = match hip_rule {
        HipRule::Live => SQUAT_HIP_MIN_LIVE,
        HipRule::Batch => SQUAT_HIP_MIN_BATCH,
    };

    let mut reasons = Vec::new();
    if !(SQUAT_KNEE_MIN..=SQUAT_KNEE_MAX).contains(&knee_angle) {
        reasons.push(ReasonCode::InsufficientDepth);
    }
    if !(hip_min..=SQUAT_HIP_MAX).contains(&hip_angle) {
        reasons.push(ReasonCode::BodyNotStraight);
    }

    Ok(Classification {
        angles: vec![(AngleKind::Knee, knee_angle), (AngleKind::Hip, hip_angle)],
        verdict: verdict_from(reasons),
    })
}

fn classify_general_pose(frame: &LandmarkFrame) -> Result<Classification, FrameSkip> {
    let shoulder = require(frame, PoseJoint::LeftShoulder)?;
    let elbow = require(frame, PoseJoint::LeftElbow)?;
    let wrist = require(frame, PoseJoint::LeftWrist)?;

    let elbow_angle = checked_angle(shoulder, elbow, wrist)?;

    // Informational mode: the angle is reported but nothing is graded.
    Ok(Classification {
        angles: vec![(AngleKind::Elbow, elbow_angle)],
        verdict: FormVerdict::Good,
    })
}

fn require(frame: &LandmarkFrame, joint: PoseJoint) -> Result<Point2D, FrameSkip> {
    frame.point(joint).ok_or(FrameSkip::MissingJoint(joint))
}

fn checked_angle(a: Point2D, b: Point2D, c: Point2D) -> Result<f64, FrameSkip> {
    let angle = joint_angle(a, b, c);
    if angle.is_nan() {
        Err(FrameSkip::DegenerateGeometry)
    } else {
        Ok(angle)
    }
}

fn verdict_from(reasons: Vec<ReasonCode>) -> FormVerdict {
    if reasons.is_empty() {
        FormVerdict::Good
    } else {
        FormVerdict::NeedsCorrection { reasons }
    }
}
