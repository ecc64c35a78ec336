// src/waypoint.rs - Time-stamped points in configuration space

use crate::time::Time;
use serde::{Deserialize, Serialize};

/// A position in N-dimensional configuration space at a given time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WayPoint {
    pub time: Time,
    pub position: Vec<f64>,
}

impl WayPoint {
    pub fn new(time: Time, position: Vec<f64>) -> Self {
        Self { time, position }
    }

    pub fn when(&self) -> Time {
        self.time
    }

    pub fn set_time(&mut self, time: Time) {
        self.time = time;
    }

    pub fn pos(&self) -> &[f64] {
        &self.position
    }

    pub fn dim(&self) -> usize {
        self.position.len()
    }

    /// Empties the position and resets the time to zero.
    pub fn clear(&mut self) {
        self.time = Time::ZERO;
        self.position.clear();
    }

    pub fn is_clear(&self) -> bool {
        self.position.is_empty() && self.time.is_zero()
    }

    pub fn is_compatible(&self, other: &WayPoint) -> bool {
        self.dim() == other.dim()
    }
}
