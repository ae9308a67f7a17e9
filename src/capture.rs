// src/capture.rs
//
// Landmark capture files: JSON Lines, one record per analyzed frame,
// written upstream by the pose-estimation shell. The analyzer never
// sees raw video; coordinates arrive normalized and are scaled to
// pixel space here.

use crate::types::{LandmarkFrame, Point2D, PoseJoint};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

#[derive(Debug, Clone, Deserialize)]
pub struct CaptureRecord {
    pub frame_width: f64,
    pub frame_height: f64,
    #[serde(default)]
    pub fps: Option<f64>,
    /// `null` means the provider found no pose in this frame.
    pub landmarks: Option<Vec<CaptureLandmark>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CaptureLandmark {
    pub joint: PoseJoint,
    /// Normalized image coordinates from the provider, [0, 1].
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_visibility")]
    pub visibility: f64,
}

fn default_visibility() -> f64 {
    1.0
}

impl CaptureRecord {
    /// Scale this record into a pixel-space landmark frame, dropping
    /// joints below the visibility floor. `None` when the provider
    /// reported no pose.
    pub fn to_frame(&self, min_visibility: f64) -> Option<LandmarkFrame> {
        let landmarks = self.landmarks.as_ref()?;
        Some(LandmarkFrame::from_points(
            landmarks
                .iter()
                .filter(|lm| lm.visibility >= min_visibility)
                .map(|lm| {
                    (
                        lm.joint,
                        Point2D::new(lm.x * self.frame_width, lm.y * self.frame_height),
                    )
                }),
        ))
    }
}

/// Recursively find `*.jsonl` capture files under `input_dir`.
pub fn find_capture_files(input_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut captures = Vec::new();

    for entry in WalkDir::new(input_dir.as_ref())
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("jsonl") {
            captures.push(path.to_path_buf());
        }
    }

    captures.sort();
    info!("Found {} capture file(s)", captures.len());
    Ok(captures)
}

/// Line-by-line reader over one capture file. Lazy: records are parsed
/// as they are pulled, and the reader can be dropped mid-file.
pub struct CaptureReader {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    line_no: usize,
}

impl CaptureReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)
            .with_context(|| format!("failed to open capture file {}", path.display()))?;
        Ok(Self {
            path,
            lines: BufReader::new(file).lines(),
            line_no: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Next record, skipping blank lines. `None` at end of file.
    pub fn next_record(&mut self) -> Option<Result<CaptureRecord>> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            return Some(serde_json::from_str(&line).with_context(|| {
                format!("bad capture record at {}:{}", self.path.display(), self.line_no)
            }));
        }
    }
}
