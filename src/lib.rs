// minjerk: minimum-jerk trajectory generation with CSV/JSON export

pub mod export;

pub use minjerk_core::*;
