// src/diagnostics.rs - Warning/error reporting for trajectory generation
//
// The generator never fails loudly: rejected inputs and invalid results are
// reported through a `Diagnostics` sink while the call returns normally.

use crate::minimum_jerk::EndpointError;
use crate::time::Time;
use crate::trajectory::TrajectoryError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// Events reported by `MinimumJerk`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    #[error("Parameters not set: {0}")]
    Rejected(EndpointError),
    #[error(
        "Trajectory duration {requested} not evenly divisible by sample period. Shortening trajectory duration to {snapped}."
    )]
    DurationSnapped { requested: Time, snapped: Time },
    #[error("Generated minimum jerk trajectory was invalid: {0}")]
    InvalidTrajectory(TrajectoryError),
}

pub trait Diagnostics {
    fn warn(&mut self, diagnostic: Diagnostic);
    fn error(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
    }

    fn error(&mut self, diagnostic: Diagnostic) {
        tracing::error!("{}", diagnostic);
    }
}

/// Keeps every diagnostic in memory, in emission order.
#[derive(Debug, Clone, Default)]
pub struct RecordingDiagnostics {
    events: Vec<(Severity, Diagnostic)>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[(Severity, Diagnostic)] {
        &self.events
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.events
            .iter()
            .filter(move |(s, _)| *s == severity)
            .map(|(_, d)| d)
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn warn(&mut self, diagnostic: Diagnostic) {
        self.events.push((Severity::Warning, diagnostic));
    }

    fn error(&mut self, diagnostic: Diagnostic) {
        self.events.push((Severity::Error, diagnostic));
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn warn(&mut self, diagnostic: Diagnostic) {
        (**self).warn(diagnostic);
    }

    fn error(&mut self, diagnostic: Diagnostic) {
        (**self).error(diagnostic);
    }
}
