// src/config.rs

use crate::types::Config;
use anyhow::Result;
use std::fs;
use std::path::Path;

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExerciseMode, HipRule};

    #[test]
    fn parses_partial_yaml_with_defaults() {
        let yaml = "analysis:\n  exercise_mode: squat\n  hip_rule: live\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.analysis.exercise_mode, ExerciseMode::Squat);
        assert_eq!(config.analysis.hip_rule, HipRule::Live);
        // Untouched sections fall back to defaults.
        assert_eq!(config.capture.fallback_fps, 30.0);
        assert_eq!(config.logging.level, "info");
    }
}
