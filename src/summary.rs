// src/summary.rs
//
// Session aggregation: fold a sequence of per-frame results into one
// summary. Single pass, push-based, safe to abandon mid-sequence (the
// summary then covers the frames seen so far).

use crate::types::{AngleKind, ExerciseMode, FrameResult, FrameSkip};
use serde::Serialize;
use std::collections::BTreeMap;

/// Used when the capture source reports a zero or negative frame rate.
pub const FALLBACK_FPS: f64 = 30.0;

// Recommendation bands over the aggregate good-percentage.
const EXCELLENT_PCT: f64 = 90.0;
const SOLID_PCT: f64 = 80.0;

#[derive(Debug, Clone, Serialize)]
pub struct AngleChannelStats {
    pub metric: String,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SkippedFrames {
    pub no_detection: u64,
    pub missing_joint: u64,
    pub degenerate_geometry: u64,
}

impl SkippedFrames {
    pub fn total(&self) -> u64 {
        self.no_detection + self.missing_joint + self.degenerate_geometry
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub exercise_mode: ExerciseMode,
    pub frame_count: u64,
    pub skipped_frames: SkippedFrames,
    pub duration_seconds: f64,
    pub good_form_percentage: f64,
    pub good_posture_percentage: f64,
    pub rep_count: u32,
    pub angle_stats: Vec<AngleChannelStats>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
struct AngleAccum {
    count: u64,
    sum: f64,
    min: f64,
    max: f64,
}

impl AngleAccum {
    fn new(value: f64) -> Self {
        Self {
            count: 1,
            sum: value,
            min: value,
            max: value,
        }
    }

    fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }
}

/// Push-based aggregator over one session's frame results.
#[derive(Debug, Clone)]
pub struct SessionAggregator {
    mode: ExerciseMode,
    frame_count: u64,
    good_form_frames: u64,
    good_posture_frames: u64,
    rep_count: u32,
    skipped: SkippedFrames,
    angle_accums: BTreeMap<AngleKind, AngleAccum>,
}

impl SessionAggregator {
    pub fn new(mode: ExerciseMode) -> Self {
        Self {
            mode,
            frame_count: 0,
            good_form_frames: 0,
            good_posture_frames: 0,
            rep_count: 0,
            skipped: SkippedFrames::default(),
            angle_accums: BTreeMap::new(),
        }
    }

    pub fn push(&mut self, result: &FrameResult) {
        self.frame_count += 1;
        if result.verdict.is_good() {
            self.good_form_frames += 1;
        }
        if result.posture_verdict.is_good() {
            self.good_posture_frames += 1;
        }
        // Rep count is monotonic within a session; the latest frame
        // carries the running total.
        self.rep_count = self.rep_count.max(result.rep_count);

        for (kind, value) in &result.angles {
            if value.is_nan() {
                continue;
            }
            self.angle_accums
                .entry(*kind)
                .and_modify(|accum| accum.push(*value))
                .or_insert_with(|| AngleAccum::new(*value));
        }
    }

    /// Record a frame that produced no result, for the report's skip
    /// breakdown. Skipped frames never count toward the percentages.
    pub fn record_skip(&mut self, skip: FrameSkip) {
        match skip {
            FrameSkip::NoDetection => self.skipped.no_detection += 1,
            FrameSkip::MissingJoint(_) => self.skipped.missing_joint += 1,
            FrameSkip::DegenerateGeometry => self.skipped.degenerate_geometry += 1,
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Finish the session. `fps` at or below zero falls back to
    /// [`FALLBACK_FPS`]. Empty sessions produce a zeroed summary.
    pub fn finish(self, fps: f64) -> SessionSummary {
        let fps = if fps > 0.0 { fps } else { FALLBACK_FPS };

        let good_form_percentage = percentage(self.good_form_frames, self.frame_count);
        let good_posture_percentage = percentage(self.good_posture_frames, self.frame_count);

        let angle_stats = self
            .angle_accums
            .iter()
            .map(|(kind, accum)| AngleChannelStats {
                metric: kind.as_str().to_string(),
                mean: accum.sum / accum.count as f64,
                min: accum.min,
                max: accum.max,
            })
            .collect();

        let recommendations = if self.frame_count == 0 {
            vec!["No analyzable frames in this session".to_string()]
        } else {
            vec![
                form_recommendation(good_form_percentage),
                posture_recommendation(good_posture_percentage),
            ]
        };

        SessionSummary {
            exercise_mode: self.mode,
            frame_count: self.frame_count,
            skipped_frames: self.skipped,
            duration_seconds: self.frame_count as f64 / fps,
            good_form_percentage,
            good_posture_percentage,
            rep_count: self.rep_count,
            angle_stats,
            recommendations,
        }
    }
}

fn percentage(good: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * good as f64 / total as f64
    }
}

fn form_recommendation(pct: f64) -> String {
    if pct >= EXCELLENT_PCT {
        format!("Excellent consistency: {pct:.1}% of frames in good form")
    } else if pct >= SOLID_PCT {
        format!("Solid session at {pct:.1}% good form; tighten up the weakest reps")
    } else {
        format!("Focus on form: only {pct:.1}% of frames were in the acceptable range")
    }
}

fn posture_recommendation(pct: f64) -> String {
    if pct >= EXCELLENT_PCT {
        format!("Posture held level in {pct:.1}% of frames")
    } else if pct >= SOLID_PCT {
        format!("Posture mostly level ({pct:.1}%); watch shoulder and hip tilt")
    } else {
        format!("Check posture: level in only {pct:.1}% of frames")
    }
}
