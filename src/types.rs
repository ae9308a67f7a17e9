// src/types.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub capture: CaptureConfig,
    pub analysis: AnalysisConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub input_dir: String,
    pub output_dir: String,
    pub fallback_fps: f64,
    pub save_reports: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub exercise_mode: ExerciseMode,
    pub hip_rule: HipRule,
    pub min_visibility: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Body joints the analyzer reads, with the landmark indices the pose
/// provider assigns them (MediaPipe Pose 33-point topology).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoseJoint {
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl PoseJoint {
    pub fn landmark_index(self) -> usize {
        match self {
            PoseJoint::LeftShoulder => 11,
            PoseJoint::RightShoulder => 12,
            PoseJoint::LeftElbow => 13,
            PoseJoint::RightElbow => 14,
            PoseJoint::LeftWrist => 15,
            PoseJoint::RightWrist => 16,
            PoseJoint::LeftHip => 23,
            PoseJoint::RightHip => 24,
            PoseJoint::LeftKnee => 25,
            PoseJoint::RightKnee => 26,
            PoseJoint::LeftAnkle => 27,
            PoseJoint::RightAnkle => 28,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PoseJoint::LeftShoulder => "left_shoulder",
            PoseJoint::RightShoulder => "right_shoulder",
            PoseJoint::LeftElbow => "left_elbow",
            PoseJoint::RightElbow => "right_elbow",
            PoseJoint::LeftWrist => "left_wrist",
            PoseJoint::RightWrist => "right_wrist",
            PoseJoint::LeftHip => "left_hip",
            PoseJoint::RightHip => "right_hip",
            PoseJoint::LeftKnee => "left_knee",
            PoseJoint::RightKnee => "right_knee",
            PoseJoint::LeftAnkle => "left_ankle",
            PoseJoint::RightAnkle => "right_ankle",
        }
    }
}

/// One frame's worth of detected joints, in pixel coordinates.
/// Read-only to the analyzer; built by the capture layer (or directly
/// by an embedding shell) from the provider's normalized landmarks.
#[derive(Debug, Clone, Default)]
pub struct LandmarkFrame {
    points: HashMap<PoseJoint, Point2D>,
}

impl LandmarkFrame {
    pub fn from_points(points: impl IntoIterator<Item = (PoseJoint, Point2D)>) -> Self {
        Self {
            points: points.into_iter().collect(),
        }
    }

    pub fn point(&self, joint: PoseJoint) -> Option<Point2D> {
        self.points.get(&joint).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseMode {
    BicepCurl,
    Pushup,
    Squat,
    GeneralPose,
}

impl ExerciseMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ExerciseMode::BicepCurl => "bicep_curl",
            ExerciseMode::Pushup => "pushup",
            ExerciseMode::Squat => "squat",
            ExerciseMode::GeneralPose => "general_pose",
        }
    }
}

/// Which acceptable hip-angle band the squat classifier applies.
/// The live-feedback and batch-summary paths historically used
/// different bands; both are kept verbatim (see analysis::classifier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HipRule {
    Live,
    Batch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Up,
    Down,
}

impl Phase {
    /// Starting phase for a fresh session. Curls and general analysis
    /// start Down, pushups and squats start Up. The asymmetry is
    /// inherited behavior and is preserved as-is.
    pub fn initial(mode: ExerciseMode) -> Self {
        match mode {
            ExerciseMode::BicepCurl | ExerciseMode::GeneralPose => Phase::Down,
            ExerciseMode::Pushup | ExerciseMode::Squat => Phase::Up,
        }
    }
}

/// Mutable per-session state. Owned by the caller, mutated only by
/// `FormAnalyzer::evaluate`, never shared across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub mode: ExerciseMode,
    pub phase: Phase,
    pub rep_count: u32,
}

impl SessionState {
    pub fn new(mode: ExerciseMode) -> Self {
        Self {
            mode,
            phase: Phase::initial(mode),
            rep_count: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonCode {
    TooExtended,
    TooFlexed,
    BodyNotStraight,
    InsufficientDepth,
    PostureAsymmetric,
}

impl ReasonCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ReasonCode::TooExtended => "too_extended",
            ReasonCode::TooFlexed => "too_flexed",
            ReasonCode::BodyNotStraight => "body_not_straight",
            ReasonCode::InsufficientDepth => "insufficient_depth",
            ReasonCode::PostureAsymmetric => "posture_asymmetric",
        }
    }

    /// Coaching cue shown alongside a NeedsCorrection verdict.
    pub fn coaching_hint(self) -> &'static str {
        match self {
            ReasonCode::TooExtended => "Lower the weight and bring the movement closer to the body",
            ReasonCode::TooFlexed => "Very small angle, extend more",
            ReasonCode::BodyNotStraight => "Keep your body straight",
            ReasonCode::InsufficientDepth => "Adjust your depth for a full range of motion",
            ReasonCode::PostureAsymmetric => "Level your shoulders and hips",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormVerdict {
    Good,
    NeedsCorrection { reasons: Vec<ReasonCode> },
}

impl FormVerdict {
    pub fn is_good(&self) -> bool {
        matches!(self, FormVerdict::Good)
    }

    pub fn reasons(&self) -> &[ReasonCode] {
        match self {
            FormVerdict::Good => &[],
            FormVerdict::NeedsCorrection { reasons } => reasons,
        }
    }
}

/// Angle channels an exercise classifier can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleKind {
    Elbow,
    Body,
    Knee,
    Hip,
}

impl AngleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AngleKind::Elbow => "elbow_angle",
            AngleKind::Body => "body_angle",
            AngleKind::Knee => "knee_angle",
            AngleKind::Hip => "hip_angle",
        }
    }
}

/// Per-frame analysis output. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameResult {
    pub angles: Vec<(AngleKind, f64)>,
    pub verdict: FormVerdict,
    pub posture_verdict: FormVerdict,
    pub rep_count: u32,
}

impl FrameResult {
    pub fn angle(&self, kind: AngleKind) -> Option<f64> {
        self.angles
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, v)| *v)
    }
}

/// Why a frame produced no result. All variants are recoverable: the
/// caller skips the frame and keeps the session going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSkip {
    /// Provider reported no pose at all.
    NoDetection,
    /// Pose found, but a joint the active mode needs is absent or
    /// below the visibility floor.
    MissingJoint(PoseJoint),
    /// Coincident landmarks made an angle undefined.
    DegenerateGeometry,
}

impl std::fmt::Display for FrameSkip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameSkip::NoDetection => write!(f, "no pose detected"),
            FrameSkip::MissingJoint(joint) => write!(f, "missing joint: {}", joint.as_str()),
            FrameSkip::DegenerateGeometry => write!(f, "degenerate joint geometry"),
        }
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            input_dir: "captures".to_string(),
            output_dir: "reports".to_string(),
            fallback_fps: 30.0,
            save_reports: true,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            exercise_mode: ExerciseMode::BicepCurl,
            hip_rule: HipRule::Batch,
            min_visibility: 0.5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_phase_matches_mode_defaults() {
        assert_eq!(Phase::initial(ExerciseMode::BicepCurl), Phase::Down);
        assert_eq!(Phase::initial(ExerciseMode::GeneralPose), Phase::Down);
        assert_eq!(Phase::initial(ExerciseMode::Pushup), Phase::Up);
        assert_eq!(Phase::initial(ExerciseMode::Squat), Phase::Up);
    }

    #[test]
    fn exercise_mode_roundtrips_through_serde() {
        let mode: ExerciseMode = serde_json::from_str("\"bicep_curl\"").unwrap();
        assert_eq!(mode, ExerciseMode::BicepCurl);
        assert_eq!(
            serde_json::to_string(&ExerciseMode::Squat).unwrap(),
            "\"squat\""
        );
    }

    #[test]
    fn frame_result_angle_lookup() {
        let result = FrameResult {
            angles: vec![(AngleKind::Elbow, 42.0), (AngleKind::Body, 171.5)],
            verdict: FormVerdict::Good,
            posture_verdict: FormVerdict::Good,
            rep_count: 0,
        };
        assert_eq!(result.angle(AngleKind::Body), Some(171.5));
        assert_eq!(result.angle(AngleKind::Knee), None);
    }
}
