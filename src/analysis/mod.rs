// src/analysis/mod.rs
//
// Frame evaluation modules.
//
// Signal flow:
//   LandmarkFrame → classifier (angles + form verdict) ─┐
//   LandmarkFrame → posture (symmetry verdict) ─────────┼→ FrameResult
//   angles → rep_counter (SessionState phase + reps) ───┘
//
// Orchestrated by FormAnalyzer::evaluate, one call per frame.

pub mod classifier;
pub mod posture;
pub mod rep_counter;

pub use classifier::{classify, Classification};
pub use posture::check_posture;

use crate::types::{ExerciseMode, FrameResult, FrameSkip, HipRule, LandmarkFrame, SessionState};
use tracing::debug;

/// Stateless frame evaluator. All cross-frame state lives in the
/// caller-owned `SessionState`; one evaluator can serve any number of
/// sessions as long as each session's state is driven from one thread.
#[derive(Debug, Clone, Copy)]
pub struct FormAnalyzer {
    hip_rule: HipRule,
}

impl FormAnalyzer {
    pub fn new(hip_rule: HipRule) -> Self {
        Self { hip_rule }
    }

    /// Evaluate one frame under `mode`, advancing the rep machine.
    ///
    /// A state created for a different mode is reset in place, so
    /// switching exercise mid-stream starts a fresh count and phase.
    /// Skipped frames (missing joints, degenerate geometry) leave the
    /// state untouched.
    pub fn evaluate(
        &self,
        frame: &LandmarkFrame,
        mode: ExerciseMode,
        state: &mut SessionState,
    ) -> Result<FrameResult, FrameSkip> {
        if state.mode != mode {
            debug!(
                "exercise mode changed {} -> {}, resetting session state",
                state.mode.as_str(),
                mode.as_str()
            );
            *state = SessionState::new(mode);
        }

        if frame.is_empty() {
            return Err(FrameSkip::NoDetection);
        }

        let classification = classifier::classify(frame, mode, self.hip_rule)?;
        let posture_verdict = posture::check_posture(frame)?;

        if rep_counter::advance(state, &classification.angles) {
            debug!("rep completed: {} total", state.rep_count);
        }

        Ok(FrameResult {
            angles: classification.angles,
            verdict: classification.verdict,
            posture_verdict,
            rep_count: state.rep_count,
        })
    }
}

impl Default for FormAnalyzer {
    fn default() -> Self {
        Self::new(HipRule::Live)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AngleKind, Point2D, PoseJoint};

    /// Full-body frame: left arm at the requested elbow angle plus a
    /// level torso so posture and every classifier's joints resolve.
    fn body_frame(elbow_deg: f64) -> LandmarkFrame {
        let elbow = Point2D::new(200.0, 200.0);
        let shoulder = Point2D::new(200.0, 100.0);
        let theta = (90.0 + elbow_deg).to_radians();
        let wrist = Point2D::new(elbow.x + 100.0 * theta.cos(), elbow.y - 100.0 * theta.sin());

        LandmarkFrame::from_points([
            (PoseJoint::LeftShoulder, shoulder),
            (PoseJoint::RightShoulder, Point2D::new(300.0, 100.0)),
            (PoseJoint::LeftElbow, elbow),
            (PoseJoint::LeftWrist, wrist),
            (PoseJoint::LeftHip, Point2D::new(200.0, 300.0)),
            (PoseJoint::RightHip, Point2D::new(290.0, 305.0)),
            (PoseJoint::LeftKnee, Point2D::new(200.0, 400.0)),
            (PoseJoint::LeftAnkle, Point2D::new(200.0, 500.0)),
        ])
    }

    #[test]
    fn evaluate_combines_form_posture_and_reps() {
        let analyzer = FormAnalyzer::default();
        let mut state = SessionState::new(ExerciseMode::BicepCurl);

        let result = analyzer
            .evaluate(&body_frame(100.0), ExerciseMode::BicepCurl, &mut state)
            .unwrap();

        assert!(result.verdict.is_good());
        assert!(result.posture_verdict.is_good());
        assert_eq!(result.rep_count, 0);
        assert!((result.angle(AngleKind::Elbow).unwrap() - 100.0).abs() < 1e-6);
    }

    #[test]
    fn rep_count_flows_into_frame_results() {
        let analyzer = FormAnalyzer::default();
        let mut state = SessionState::new(ExerciseMode::BicepCurl);

        for angle in [170.0, 40.0] {
            analyzer
                .evaluate(&body_frame(angle), ExerciseMode::BicepCurl, &mut state)
                .unwrap();
        }
        let result = analyzer
            .evaluate(&body_frame(170.0), ExerciseMode::BicepCurl, &mut state)
            .unwrap();
        assert_eq!(result.rep_count, 1);
    }

    #[test]
    fn mode_change_resets_session_state() {
        let analyzer = FormAnalyzer::default();
        let mut state = SessionState::new(ExerciseMode::BicepCurl);

        for angle in [170.0, 40.0] {
            analyzer
                .evaluate(&body_frame(angle), ExerciseMode::BicepCurl, &mut state)
                .unwrap();
        }
        assert_eq!(state.rep_count, 1);

        analyzer
            .evaluate(&body_frame(100.0), ExerciseMode::GeneralPose, &mut state)
            .unwrap();
        assert_eq!(state.mode, ExerciseMode::GeneralPose);
        assert_eq!(state.rep_count, 0);
    }

    #[test]
    fn empty_frame_is_no_detection() {
        let analyzer = FormAnalyzer::default();
        let mut state = SessionState::new(ExerciseMode::Squat);
        let err = analyzer
            .evaluate(&LandmarkFrame::default(), ExerciseMode::Squat, &mut state)
            .unwrap_err();
        assert_eq!(err, FrameSkip::NoDetection);
    }

    #[test]
    fn skipped_frame_leaves_state_untouched() {
        let analyzer = FormAnalyzer::default();
        let mut state = SessionState::new(ExerciseMode::Squat);

        // Squat joints absent from an arm-only frame.
        let frame = LandmarkFrame::from_points([
            (PoseJoint::LeftShoulder, Point2D::new(200.0, 100.0)),
            (PoseJoint::LeftElbow, Point2D::new(200.0, 200.0)),
            (PoseJoint::LeftWrist, Point2D::new(200.0, 300.0)),
        ]);
        let before = state.clone();
        assert!(analyzer.evaluate(&frame, ExerciseMode::Squat, &mut state).is_err());
        assert_eq!(state, before);
    }
}
