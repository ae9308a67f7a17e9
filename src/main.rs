// src/main.rs

use anyhow::Result;
use form_analysis::capture::{self, CaptureReader};
use form_analysis::summary::{SessionAggregator, SessionSummary};
use form_analysis::types::{Config, FrameSkip, SessionState};
use form_analysis::FormAnalyzer;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = match Config::load("config.yaml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("config.yaml not loaded ({e}), using defaults");
            Config::default()
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("form_analysis={}", config.logging.level)));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🏋️ Exercise Form Analysis Starting");
    info!(
        "Mode: {}, hip rule: {:?}, visibility floor: {:.2}",
        config.analysis.exercise_mode.as_str(),
        config.analysis.hip_rule,
        config.analysis.min_visibility
    );

    let capture_files = capture::find_capture_files(&config.capture.input_dir)?;
    if capture_files.is_empty() {
        error!("No capture files found in {}", config.capture.input_dir);
        return Ok(());
    }

    let analyzer = FormAnalyzer::new(config.analysis.hip_rule);

    for (idx, path) in capture_files.iter().enumerate() {
        info!("========================================");
        info!(
            "Analyzing session {}/{}: {}",
            idx + 1,
            capture_files.len(),
            path.display()
        );

        match analyze_capture(path, &analyzer, &config) {
            Ok(summary) => {
                log_summary(&summary);
                if config.capture.save_reports {
                    match write_report(path, &summary, &config.capture.output_dir) {
                        Ok(report_path) => info!("Report written to {}", report_path.display()),
                        Err(e) => warn!("Failed to write report: {e:#}"),
                    }
                }
            }
            Err(e) => error!("Failed to analyze {}: {e:#}", path.display()),
        }
    }

    Ok(())
}

fn analyze_capture(path: &Path, analyzer: &FormAnalyzer, config: &Config) -> Result<SessionSummary> {
    let mode = config.analysis.exercise_mode;
    let mut reader = CaptureReader::open(path)?;
    let mut state = SessionState::new(mode);
    let mut aggregator = SessionAggregator::new(mode);
    let mut fps: Option<f64> = None;

    while let Some(record) = reader.next_record() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping unreadable record: {e:#}");
                continue;
            }
        };

        if fps.is_none() {
            fps = record.fps;
        }

        let Some(frame) = record.to_frame(config.analysis.min_visibility) else {
            aggregator.record_skip(FrameSkip::NoDetection);
            continue;
        };

        match analyzer.evaluate(&frame, mode, &mut state) {
            Ok(result) => aggregator.push(&result),
            Err(skip) => {
                debug!("Frame skipped: {skip}");
                aggregator.record_skip(skip);
            }
        }
    }

    Ok(aggregator.finish(fps.unwrap_or(config.capture.fallback_fps)))
}

fn log_summary(summary: &SessionSummary) {
    info!("✓ Session analyzed");
    info!(
        "  Frames: {} evaluated, {} skipped ({} no-pose, {} missing-joint, {} degenerate)",
        summary.frame_count,
        summary.skipped_frames.total(),
        summary.skipped_frames.no_detection,
        summary.skipped_frames.missing_joint,
        summary.skipped_frames.degenerate_geometry,
    );
    info!("  Duration: {:.1}s", summary.duration_seconds);
    info!("  Reps: {}", summary.rep_count);
    info!("  Good form: {:.1}%", summary.good_form_percentage);
    info!("  Good posture: {:.1}%", summary.good_posture_percentage);
    for stats in &summary.angle_stats {
        info!(
            "  {}: mean {:.1}°, range {:.1}°–{:.1}°",
            stats.metric, stats.mean, stats.min, stats.max
        );
    }
    for recommendation in &summary.recommendations {
        info!("  💬 {recommendation}");
    }
}

fn write_report(
    capture_path: &Path,
    summary: &SessionSummary,
    output_dir: &str,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;

    let stem = capture_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("session");
    let report_path = PathBuf::from(output_dir).join(format!(
        "{}_{}_summary.json",
        stem,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ));

    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(&report_path, json)?;
    Ok(report_path)
}
