//! TOML configuration for building a `MinimumJerk` generator.
//!
//! ```toml
//! sample_period = 0.01
//!
//! [start]
//! time = 0.0
//! position = [0.0, 0.0]
//!
//! [goal]
//! time = 1.5
//! position = [0.3, -0.2]
//!
//! [trajectory]
//! interp = "linear"
//! max_diff = [0.05, 0.05]
//! ```

use crate::minimum_jerk::MinimumJerk;
use crate::time::Time;
use crate::trajectory::Interp;
use crate::waypoint::WayPoint;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GeneratorConfig {
    /// Seconds between samples
    pub sample_period: Time,
    pub start: WayPoint,
    pub goal: WayPoint,
    #[serde(default)]
    pub trajectory: TrajectoryParams,
}

/// Post-processing settings forwarded to the generated trajectory.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TrajectoryParams {
    #[serde(default)]
    pub interp: Interp,
    #[serde(default)]
    pub max_diff: Vec<f64>,
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.sample_period.is_positive() {
            return Err(format!("sample_period must be > 0 (got {})", self.sample_period));
        }
        if self.start.dim() != self.goal.dim() {
            return Err(format!(
                "start has {} axes but goal has {}",
                self.start.dim(),
                self.goal.dim()
            ));
        }
        if self.goal.when() <= self.start.when() {
            return Err(format!(
                "goal time {} must be after start time {}",
                self.goal.when(),
                self.start.when()
            ));
        }
        if self.goal.when() - self.start.when() < self.sample_period {
            return Err("duration between start and goal is shorter than sample_period".to_string());
        }
        let max_diff = &self.trajectory.max_diff;
        if !max_diff.is_empty() && max_diff.len() != self.start.dim() {
            return Err(format!(
                "max_diff has {} entries but waypoints have {} axes",
                max_diff.len(),
                self.start.dim()
            ));
        }
        if let Some(bad) = max_diff.iter().find(|d| !(**d > 0.0)) {
            return Err(format!("max_diff entries must be > 0 (got {})", bad));
        }
        Ok(())
    }

    /// Builds a generator with tracing diagnostics and applies the trajectory params.
    pub fn build(&self) -> MinimumJerk {
        let mut generator = MinimumJerk::new(self.sample_period, self.start.clone(), self.goal.clone());
        self.apply_params(&mut generator);
        generator
    }

    fn apply_params(&self, generator: &mut MinimumJerk) {
        if self.trajectory == TrajectoryParams::default() {
            return;
        }
        generator.set_trajectory_params(self.trajectory.interp, self.trajectory.max_diff.clone());
        generator.update();
    }
}

impl FromStr for GeneratorConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: GeneratorConfig = toml::from_str(s)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

pub fn load_config(path: &str) -> Result<GeneratorConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        tracing::error!("Failed to read config file '{}': {}", path, e);
        ConfigError::Io(e)
    })?;
    contents.parse::<GeneratorConfig>().inspect_err(|e| {
        tracing::error!("Failed to load config '{}': {}", path, e);
    })
}
