// src/export.rs - CSV and JSON output for generated trajectories

use minjerk_core::{Diagnostics, Interp, MinimumJerk, Time, Trajectory, WayPoint};
use serde::Serialize;
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Serialize)]
struct TrajectoryDocument<'a> {
    sample_period: Time,
    tau: f64,
    dim: usize,
    interp: Interp,
    samples: &'a [WayPoint],
}

/// Writes one row per sample: `time,q0,q1,...`
pub fn write_csv<W: Write>(trajectory: &Trajectory, writer: W) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    let header = std::iter::once("time".to_string()).chain((0..trajectory.dim()).map(|i| format!("q{}", i)));
    csv.write_record(header)?;
    for wp in trajectory {
        let row = std::iter::once(wp.when().as_seconds().to_string()).chain(wp.pos().iter().map(f64::to_string));
        csv.write_record(row)?;
    }
    csv.flush()?;
    Ok(())
}

pub fn to_json<D: Diagnostics>(generator: &MinimumJerk<D>) -> Result<String, ExportError> {
    let trajectory = generator.trajectory();
    let document = TrajectoryDocument {
        sample_period: generator.sample_period(),
        tau: generator.tau(),
        dim: generator.dim(),
        interp: trajectory.interp_method(),
        samples: trajectory.waypoints(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}
