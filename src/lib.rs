// src/lib.rs
//
// Exercise form analysis over pose-landmark streams.
//
// The core is pure and synchronous: a pose provider hands over one
// `LandmarkFrame` per analyzed frame, `FormAnalyzer::evaluate` turns it
// into joint angles, a form verdict, a posture verdict and a running
// rep count, and `SessionAggregator` folds a session's results into a
// summary report. Video decoding, camera capture, inference and UI all
// live outside this crate.

pub mod analysis;
pub mod capture;
pub mod config;
pub mod geometry;
pub mod summary;
pub mod types;

// Re-exports for ergonomic access from the binary and embedding shells.
pub use analysis::{classify, check_posture, Classification, FormAnalyzer};
pub use capture::{find_capture_files, CaptureReader, CaptureRecord};
pub use geometry::joint_angle;
pub use summary::{SessionAggregator, SessionSummary, FALLBACK_FPS};
pub use types::{
    AngleKind, Config, ExerciseMode, FormVerdict, FrameResult, FrameSkip, HipRule, LandmarkFrame,
    Phase, Point2D, PoseJoint, ReasonCode, SessionState,
};
