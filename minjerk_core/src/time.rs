// src/time.rs - Time values for waypoints and sample periods

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// An instant or span of time with microsecond resolution.
///
/// Stored as an integer count of microseconds so that divisibility of a
/// duration by a sample period is exact. Serialized as floating-point seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Time {
    micros: i64,
}

impl Time {
    pub const ZERO: Time = Time { micros: 0 };

    /// Rounds to the nearest microsecond.
    pub fn seconds(seconds: f64) -> Self {
        Self {
            micros: (seconds * MICROS_PER_SECOND).round() as i64,
        }
    }

    pub fn milliseconds(millis: i64) -> Self {
        Self {
            micros: millis * 1_000,
        }
    }

    pub fn microseconds(micros: i64) -> Self {
        Self { micros }
    }

    pub fn as_seconds(&self) -> f64 {
        self.micros as f64 / MICROS_PER_SECOND
    }

    pub fn as_microseconds(&self) -> i64 {
        self.micros
    }

    pub fn is_zero(&self) -> bool {
        self.micros == 0
    }

    pub fn is_positive(&self) -> bool {
        self.micros > 0
    }
}

impl From<f64> for Time {
    fn from(seconds: f64) -> Self {
        Time::seconds(seconds)
    }
}

impl From<Time> for f64 {
    fn from(time: Time) -> Self {
        time.as_seconds()
    }
}

impl Add for Time {
    type Output = Time;

    fn add(self, rhs: Time) -> Time {
        Time::microseconds(self.micros + rhs.micros)
    }
}

impl AddAssign for Time {
    fn add_assign(&mut self, rhs: Time) {
        self.micros += rhs.micros;
    }
}

impl Sub for Time {
    type Output = Time;

    fn sub(self, rhs: Time) -> Time {
        Time::microseconds(self.micros - rhs.micros)
    }
}

impl SubAssign for Time {
    fn sub_assign(&mut self, rhs: Time) {
        self.micros -= rhs.micros;
    }
}

impl Mul<i64> for Time {
    type Output = Time;

    fn mul(self, rhs: i64) -> Time {
        Time::microseconds(self.micros * rhs)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6} s", self.as_seconds())
    }
}
