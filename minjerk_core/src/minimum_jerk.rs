//! Minimum-jerk trajectory generation between two waypoints.
//
// Each axis follows the rest-to-rest quintic, which minimizes integrated
// squared jerk. The polynomial is sampled at a fixed period and the samples
// are stored in a `Trajectory` owned by the generator. Every successful
// mutation regenerates the whole trajectory.

use crate::diagnostics::{Diagnostic, Diagnostics, TracingDiagnostics};
use crate::quintic::QuinticCoefficients;
use crate::time::Time;
use crate::trajectory::{Interp, Trajectory};
use crate::waypoint::WayPoint;
use thiserror::Error;

/// Reasons a set of endpoints is refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EndpointError {
    #[error("Path dimensions are inconsistent (expected {expected}, found {found})")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("Goal WayPoint must be at a time after start WayPoint ({goal} !> {start})")]
    InvalidOrdering { start: Time, goal: Time },
    #[error("Sample period must be positive (got {0})")]
    InvalidSamplePeriod(Time),
    #[error("Trajectory duration {duration} is shorter than the sample period {sample_period}")]
    DurationTooShort { duration: Time, sample_period: Time },
    #[error("Generator was cleared and has no parameters to update")]
    Inert,
}

/// Generates and owns a sampled minimum-jerk trajectory.
///
/// Construction never fails: invalid input leaves the generator cleared
/// (empty trajectory, `tau() == 0`) and reports through the diagnostics sink.
/// Setters validate before committing and leave the generator untouched when
/// they return `Err`.
#[derive(Debug, Clone)]
pub struct MinimumJerk<D: Diagnostics = TracingDiagnostics> {
    sample_period: Time,
    start: WayPoint,
    goal: WayPoint,
    /// Requested span between the endpoints, before snapping
    duration: Time,
    /// Span actually sampled, a whole multiple of `sample_period`
    tau: Time,
    dim: usize,
    sample_count: usize,
    sample_times: Vec<Time>,
    coefficients: Vec<QuinticCoefficients>,
    trajectory: Trajectory,
    diagnostics: D,
}

impl MinimumJerk<TracingDiagnostics> {
    pub fn new(sample_period: Time, start: WayPoint, goal: WayPoint) -> Self {
        Self::with_diagnostics(sample_period, start, goal, TracingDiagnostics)
    }
}

impl<D: Diagnostics> MinimumJerk<D> {
    pub fn with_diagnostics(sample_period: Time, start: WayPoint, goal: WayPoint, diagnostics: D) -> Self {
        let mut generator = Self {
            sample_period,
            dim: start.dim(),
            duration: goal.when() - start.when(),
            start,
            goal,
            tau: Time::ZERO,
            sample_count: 0,
            sample_times: Vec::new(),
            coefficients: Vec::new(),
            trajectory: Trajectory::new(),
            diagnostics,
        };

        let checked = check_endpoints(
            generator.sample_period,
            &generator.start,
            &generator.goal,
            generator.dim,
        );
        if let Err(e) = checked {
            generator.reject(e);
            generator.clear();
            return generator;
        }

        generator.set_timing_parameters();
        generator.generate_trajectory();
        generator
    }

    /// The most recently generated trajectory.
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Regenerates with the current parameters.
    pub fn update(&mut self) -> &Trajectory {
        if self.is_configured() {
            self.generate_trajectory();
        }
        &self.trajectory
    }

    /// Drops all parameters and samples, leaving the generator inert.
    /// Interpolation settings on the trajectory are kept.
    pub fn clear(&mut self) {
        self.sample_period = Time::ZERO;
        self.start.clear();
        self.goal.clear();
        self.duration = Time::ZERO;
        self.tau = Time::ZERO;
        self.dim = 0;
        self.sample_count = 0;
        self.sample_times.clear();
        self.coefficients.clear();
        self.trajectory.clear();
    }

    pub fn set_start(&mut self, start: WayPoint) -> Result<(), EndpointError> {
        self.ensure_configured()?;
        check_endpoints(self.sample_period, &start, &self.goal, self.dim).map_err(|e| self.reject(e))?;
        self.start = start;
        self.commit()
    }

    pub fn set_goal(&mut self, goal: WayPoint) -> Result<(), EndpointError> {
        self.ensure_configured()?;
        check_endpoints(self.sample_period, &self.start, &goal, self.dim).map_err(|e| self.reject(e))?;
        self.goal = goal;
        self.commit()
    }

    pub fn set_endpoints(&mut self, start: WayPoint, goal: WayPoint) -> Result<(), EndpointError> {
        self.ensure_configured()?;
        check_endpoints(self.sample_period, &start, &goal, self.dim).map_err(|e| self.reject(e))?;
        self.start = start;
        self.goal = goal;
        self.commit()
    }

    /// Configures how the trajectory interpolates and the per-axis step bound
    /// used by its validation. Takes effect on the next generation.
    pub fn set_trajectory_params(&mut self, interp: Interp, max_diff: Vec<f64>) {
        self.trajectory.set_interp_method(interp);
        self.trajectory.set_max_diff(max_diff);
    }

    /// Sampled duration in seconds.
    pub fn tau(&self) -> f64 {
        self.tau.as_seconds()
    }

    pub fn start(&self) -> &WayPoint {
        &self.start
    }

    /// Goal waypoint. Its time reflects any snapping to the sample period.
    pub fn goal(&self) -> &WayPoint {
        &self.goal
    }

    pub fn sample_period(&self) -> Time {
        self.sample_period
    }

    pub fn duration(&self) -> Time {
        self.duration
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn sample_times(&self) -> &[Time] {
        &self.sample_times
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Per-axis polynomials in time relative to the start waypoint.
    pub fn coefficients(&self) -> &[QuinticCoefficients] {
        &self.coefficients
    }

    pub fn is_configured(&self) -> bool {
        self.sample_period.is_positive()
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut D {
        &mut self.diagnostics
    }

    fn ensure_configured(&mut self) -> Result<(), EndpointError> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(self.reject(EndpointError::Inert))
        }
    }

    fn reject(&mut self, error: EndpointError) -> EndpointError {
        self.diagnostics.warn(Diagnostic::Rejected(error.clone()));
        error
    }

    fn commit(&mut self) -> Result<(), EndpointError> {
        self.duration = self.goal.when() - self.start.when();
        self.set_timing_parameters();
        self.generate_trajectory();
        Ok(())
    }

    fn set_timing_parameters(&mut self) {
        let period = self.sample_period;
        let span = self.goal.when() - self.start.when();
        let steps = span.as_microseconds() / period.as_microseconds();
        let snapped = period * steps;
        if snapped != span {
            self.goal.set_time(self.start.when() + snapped);
            self.diagnostics.warn(Diagnostic::DurationSnapped {
                requested: span,
                snapped,
            });
        }
        self.tau = snapped;
        self.sample_count = steps as usize + 1;

        let t0 = self.start.when();
        self.sample_times = (0..=steps).map(|k| t0 + period * k).collect();
    }

    fn generate_trajectory(&mut self) {
        let horizon = self.tau.as_seconds();
        self.coefficients = self
            .start
            .pos()
            .iter()
            .zip(self.goal.pos())
            .map(|(&q0, &g)| QuinticCoefficients::minimum_jerk(q0, g, horizon))
            .collect();

        self.trajectory.resize(self.sample_count);
        let t0 = self.start.when();
        for (index, &time) in self.sample_times.iter().enumerate() {
            let t = (time - t0).as_seconds();
            let position = self.coefficients.iter().map(|c| c.position(t)).collect();
            if let Err(e) = self.trajectory.add_waypoint(index, WayPoint::new(time, position)) {
                self.diagnostics.error(Diagnostic::InvalidTrajectory(e));
                return;
            }
        }

        if let Err(e) = self.trajectory.check() {
            self.diagnostics.error(Diagnostic::InvalidTrajectory(e));
        }
    }
}

fn check_endpoints(sample_period: Time, start: &WayPoint, goal: &WayPoint, dim: usize) -> Result<(), EndpointError> {
    if !sample_period.is_positive() {
        return Err(EndpointError::InvalidSamplePeriod(sample_period));
    }
    if goal.when() <= start.when() {
        return Err(EndpointError::InvalidOrdering {
            start: start.when(),
            goal: goal.when(),
        });
    }
    for wp in [start, goal] {
        if wp.dim() != dim {
            return Err(EndpointError::DimensionMismatch {
                expected: dim,
                found: wp.dim(),
            });
        }
    }
    let duration = goal.when() - start.when();
    if duration < sample_period {
        return Err(EndpointError::DurationTooShort {
            duration,
            sample_period,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::RecordingDiagnostics;
    use crate::trajectory::TrajectoryError;

    fn wp(seconds: f64, position: &[f64]) -> WayPoint {
        WayPoint::new(Time::seconds(seconds), position.to_vec())
    }

    fn recorded(sample_period: f64, start: WayPoint, goal: WayPoint) -> MinimumJerk<RecordingDiagnostics> {
        MinimumJerk::with_diagnostics(Time::seconds(sample_period), start, goal, RecordingDiagnostics::new())
    }

    #[test]
    fn test_unit_move_quarter_second_samples() {
        let mj = recorded(0.25, wp(0.0, &[0.0]), wp(1.0, &[1.0]));
        assert!(mj.is_configured());
        assert!(mj.diagnostics().is_empty());
        assert_eq!(mj.tau(), 1.0);
        assert_eq!(mj.sample_count(), 5);
        assert_eq!(
            mj.sample_times(),
            &[0, 250, 500, 750, 1000].map(Time::milliseconds)
        );
        let expected = [0.0, 0.103515625, 0.5, 0.896484375, 1.0];
        let traj = mj.trajectory();
        assert_eq!(traj.len(), 5);
        for (sample, want) in traj.iter().zip(expected) {
            assert!((sample.position[0] - want).abs() < 1e-12, "{:?} != {}", sample, want);
        }
    }

    #[test]
    fn test_duration_snapped_to_sample_period() {
        let mj = recorded(0.25, wp(0.0, &[0.0]), wp(0.9, &[1.0]));
        assert_eq!(mj.tau(), 0.75);
        assert_eq!(mj.duration(), Time::seconds(0.9));
        assert_eq!(mj.goal().when(), Time::seconds(0.75));
        assert_eq!(mj.sample_count(), 4);
        assert_eq!(mj.sample_times().last(), Some(&Time::seconds(0.75)));
        let warnings: Vec<_> = mj.diagnostics().warnings().collect();
        assert_eq!(
            warnings,
            vec![&Diagnostic::DurationSnapped {
                requested: Time::seconds(0.9),
                snapped: Time::seconds(0.75),
            }]
        );
        let last = mj.trajectory().last().unwrap();
        assert!((last.position[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_exact_multiple_is_not_snapped() {
        let mj = recorded(0.1, wp(0.0, &[0.0]), wp(0.3, &[2.0]));
        assert_eq!(mj.goal().when(), Time::seconds(0.3));
        assert_eq!(mj.sample_count(), 4);
        assert!(mj.diagnostics().is_empty());
    }

    #[test]
    fn test_offset_start_time() {
        let mj = recorded(0.5, wp(10.0, &[1.0, -1.0]), wp(12.0, &[3.0, 5.0]));
        let traj = mj.trajectory();
        assert_eq!(traj.len(), 5);
        assert_eq!(traj[0].when(), Time::seconds(10.0));
        assert!((traj[0].position[0] - 1.0).abs() < 1e-12);
        assert!((traj[0].position[1] + 1.0).abs() < 1e-12);
        assert!((traj[4].position[0] - 3.0).abs() < 1e-9);
        assert!((traj[4].position[1] - 5.0).abs() < 1e-9);
        assert!((traj[2].position[0] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_dimension_mismatch_clears() {
        let mj = recorded(0.1, wp(0.0, &[0.0, 0.0]), wp(1.0, &[1.0]));
        assert!(!mj.is_configured());
        assert_eq!(mj.tau(), 0.0);
        assert_eq!(mj.dim(), 0);
        assert_eq!(mj.sample_count(), 0);
        assert!(mj.trajectory().is_empty());
        assert!(mj.start().is_clear());
        assert!(mj.goal().is_clear());
        assert_eq!(
            mj.diagnostics().warnings().next(),
            Some(&Diagnostic::Rejected(EndpointError::DimensionMismatch { expected: 2, found: 1 }))
        );
    }

    #[test]
    fn test_bad_ordering_clears() {
        let mj = recorded(0.1, wp(1.0, &[0.0]), wp(1.0, &[1.0]));
        assert!(!mj.is_configured());
        assert!(mj.trajectory().is_empty());
        assert!(matches!(
            mj.diagnostics().warnings().next(),
            Some(Diagnostic::Rejected(EndpointError::InvalidOrdering { .. }))
        ));
    }

    #[test]
    fn test_bad_sample_period_clears() {
        let mj = recorded(0.0, wp(0.0, &[0.0]), wp(1.0, &[1.0]));
        assert!(!mj.is_configured());
        let mj = recorded(0.5, wp(0.0, &[0.0]), wp(0.2, &[1.0]));
        assert!(!mj.is_configured());
        assert!(matches!(
            mj.diagnostics().warnings().next(),
            Some(Diagnostic::Rejected(EndpointError::DurationTooShort { .. }))
        ));
    }

    #[test]
    fn test_set_goal_regenerates() {
        let mut mj = recorded(0.25, wp(0.0, &[0.0]), wp(1.0, &[1.0]));
        mj.set_goal(wp(2.0, &[-4.0])).unwrap();
        assert_eq!(mj.sample_count(), 9);
        assert_eq!(mj.tau(), 2.0);
        let last = mj.trajectory().last().unwrap();
        assert_eq!(last.when(), Time::seconds(2.0));
        assert!((last.position[0] + 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_set_start_regenerates() {
        let mut mj = recorded(0.25, wp(0.0, &[0.0]), wp(1.0, &[1.0]));
        mj.set_start(wp(0.5, &[0.5])).unwrap();
        assert_eq!(mj.sample_count(), 3);
        assert_eq!(mj.trajectory()[0].when(), Time::seconds(0.5));
        assert!((mj.trajectory()[1].position[0] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_rejected_setters_leave_state_unchanged() {
        let mut mj = recorded(0.25, wp(0.0, &[0.0, 1.0]), wp(1.0, &[1.0, 0.0]));
        let before = mj.trajectory().clone();
        let goal_before = mj.goal().clone();

        assert_eq!(
            mj.set_start(wp(1.0, &[0.0, 0.0])),
            Err(EndpointError::InvalidOrdering {
                start: Time::seconds(1.0),
                goal: Time::seconds(1.0),
            })
        );
        assert_eq!(
            mj.set_goal(wp(1.0, &[0.0])),
            Err(EndpointError::DimensionMismatch { expected: 2, found: 1 })
        );
        assert!(mj.set_endpoints(wp(2.0, &[0.0, 0.0]), wp(1.0, &[0.0, 0.0])).is_err());
        assert!(mj.set_endpoints(wp(0.0, &[0.0]), wp(1.0, &[0.0])).is_err());

        assert_eq!(mj.trajectory(), &before);
        assert_eq!(mj.goal(), &goal_before);
        assert_eq!(mj.diagnostics().warnings().count(), 4);
    }

    #[test]
    fn test_cleared_rejects_mutation() {
        let mut mj = recorded(0.25, wp(0.0, &[0.0]), wp(1.0, &[1.0]));
        mj.clear();
        assert_eq!(mj.set_endpoints(WayPoint::default(), wp(1.0, &[])), Err(EndpointError::Inert));
        assert_eq!(mj.set_goal(wp(1.0, &[])), Err(EndpointError::Inert));
        assert!(mj.update().is_empty());
    }

    #[test]
    fn test_max_diff_violation_reports_error() {
        let mut mj = recorded(0.25, wp(0.0, &[0.0]), wp(1.0, &[1.0]));
        mj.set_trajectory_params(Interp::Linear, vec![0.1]);
        assert_eq!(mj.diagnostics().errors().count(), 0);
        let traj = mj.update();
        assert_eq!(traj.len(), 5);
        assert!(matches!(
            mj.diagnostics().errors().next(),
            Some(Diagnostic::InvalidTrajectory(TrajectoryError::ExceededMaxDiff { index: 1, axis: 0, .. }))
        ));
    }

    #[test]
    fn test_update_keeps_samples() {
        let mut mj = recorded(0.25, wp(0.0, &[0.0]), wp(1.0, &[1.0]));
        let before = mj.trajectory().clone();
        mj.set_trajectory_params(Interp::Hold, Vec::new());
        let after = mj.update();
        assert_eq!(after.waypoints(), before.waypoints());
        assert_eq!(after.interp_method(), Interp::Hold);
    }
}
