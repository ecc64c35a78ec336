// src/trajectory.rs - Time-indexed waypoint container with interpolation and validation
use crate::time::Time;
use crate::waypoint::WayPoint;
use serde::{Deserialize, Serialize};
use std::ops::Index;
use thiserror::Error;

/// How `Trajectory::at_time` fills in values between samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interp {
    #[default]
    Linear,
    /// Zero-order hold of the latest sample at or before the query time
    Hold,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrajectoryError {
    #[error("Trajectory is empty")]
    Empty,
    #[error("Waypoint index {index} out of range for trajectory of size {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Waypoint {index} has dimension {found}, expected {expected}")]
    InconsistentDimension {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("Waypoint {index} at {time} does not come after {previous}")]
    NonMonotonicTime {
        index: usize,
        previous: Time,
        time: Time,
    },
    #[error("Max diff has {found} entries but trajectory dimension is {expected}")]
    MaxDiffDimension { expected: usize, found: usize },
    #[error("Step into waypoint {index} on axis {axis} is {diff:.6}, exceeding max diff {limit:.6}")]
    ExceededMaxDiff {
        index: usize,
        axis: usize,
        diff: f64,
        limit: f64,
    },
}

/// Ordered sequence of waypoints, indexed by insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Trajectory {
    waypoints: Vec<WayPoint>,
    interp: Interp,
    /// Per-axis bound on the position change between consecutive samples.
    /// Empty disables the check.
    max_diff: Vec<f64>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(interp: Interp, max_diff: Vec<f64>) -> Self {
        Self {
            waypoints: Vec::new(),
            interp,
            max_diff,
        }
    }

    /// Resizes to `n` waypoints, padding with cleared waypoints.
    pub fn resize(&mut self, n: usize) {
        self.waypoints.resize(n, WayPoint::default());
    }

    /// Replaces the waypoint at `index`. The slot must already exist (see `resize`).
    pub fn add_waypoint(&mut self, index: usize, waypoint: WayPoint) -> Result<(), TrajectoryError> {
        let len = self.waypoints.len();
        match self.waypoints.get_mut(index) {
            Some(slot) => {
                *slot = waypoint;
                Ok(())
            }
            None => Err(TrajectoryError::IndexOutOfRange { index, len }),
        }
    }

    pub fn push(&mut self, waypoint: WayPoint) {
        self.waypoints.push(waypoint);
    }

    /// Removes every waypoint. Interpolation settings are kept.
    pub fn clear(&mut self) {
        self.waypoints.clear();
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WayPoint> {
        self.waypoints.get(index)
    }

    pub fn first(&self) -> Option<&WayPoint> {
        self.waypoints.first()
    }

    pub fn last(&self) -> Option<&WayPoint> {
        self.waypoints.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WayPoint> {
        self.waypoints.iter()
    }

    pub fn waypoints(&self) -> &[WayPoint] {
        &self.waypoints
    }

    pub fn times(&self) -> Vec<Time> {
        self.waypoints.iter().map(WayPoint::when).collect()
    }

    /// Dimension of the first waypoint, or 0 when empty.
    pub fn dim(&self) -> usize {
        self.waypoints.first().map_or(0, WayPoint::dim)
    }

    pub fn set_interp_method(&mut self, interp: Interp) {
        self.interp = interp;
    }

    pub fn interp_method(&self) -> Interp {
        self.interp
    }

    pub fn set_max_diff(&mut self, max_diff: Vec<f64>) {
        self.max_diff = max_diff;
    }

    pub fn max_diff(&self) -> &[f64] {
        &self.max_diff
    }

    pub fn validate(&self) -> bool {
        self.check().is_ok()
    }

    /// Checks the trajectory for structural problems, returning the first one found.
    pub fn check(&self) -> Result<(), TrajectoryError> {
        let first = self.waypoints.first().ok_or(TrajectoryError::Empty)?;
        let dim = first.dim();

        for (index, wp) in self.waypoints.iter().enumerate() {
            if wp.dim() != dim {
                return Err(TrajectoryError::InconsistentDimension {
                    index,
                    expected: dim,
                    found: wp.dim(),
                });
            }
        }

        for (index, pair) in self.waypoints.windows(2).enumerate() {
            if pair[1].when() <= pair[0].when() {
                return Err(TrajectoryError::NonMonotonicTime {
                    index: index + 1,
                    previous: pair[0].when(),
                    time: pair[1].when(),
                });
            }
        }

        if self.max_diff.is_empty() {
            return Ok(());
        }
        if self.max_diff.len() != dim {
            return Err(TrajectoryError::MaxDiffDimension {
                expected: dim,
                found: self.max_diff.len(),
            });
        }
        for (index, pair) in self.waypoints.windows(2).enumerate() {
            for (axis, limit) in self.max_diff.iter().enumerate() {
                let diff = (pair[1].position[axis] - pair[0].position[axis]).abs();
                if diff > *limit {
                    return Err(TrajectoryError::ExceededMaxDiff {
                        index: index + 1,
                        axis,
                        diff,
                        limit: *limit,
                    });
                }
            }
        }
        Ok(())
    }

    /// Samples the trajectory at `time` using the configured interpolation.
    /// Returns `None` outside the covered time range.
    pub fn at_time(&self, time: Time) -> Option<WayPoint> {
        let first = self.waypoints.first()?;
        let last = self.waypoints.last()?;
        if time < first.when() || time > last.when() {
            return None;
        }
        // index of the first waypoint strictly after `time`
        let upper = self.waypoints.partition_point(|wp| wp.when() <= time);
        let before = &self.waypoints[upper - 1];
        if before.when() == time || upper == self.waypoints.len() {
            return Some(WayPoint::new(time, before.position.clone()));
        }
        match self.interp {
            Interp::Hold => Some(WayPoint::new(time, before.position.clone())),
            Interp::Linear => {
                let after = &self.waypoints[upper];
                let span = (after.when() - before.when()).as_seconds();
                let alpha = (time - before.when()).as_seconds() / span;
                let position = before
                    .position
                    .iter()
                    .zip(&after.position)
                    .map(|(a, b)| a + (b - a) * alpha)
                    .collect();
                Some(WayPoint::new(time, position))
            }
        }
    }
}

impl Index<usize> for Trajectory {
    type Output = WayPoint;

    fn index(&self, index: usize) -> &WayPoint {
        &self.waypoints[index]
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a WayPoint;
    type IntoIter = std::slice::Iter<'a, WayPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.waypoints.iter()
    }
}
