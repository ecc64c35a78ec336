// minjerk_core: minimum-jerk trajectory generation shared by the CLI, tests and benches

pub mod config;
pub mod diagnostics;
pub mod minimum_jerk;
pub mod quintic;
pub mod time;
pub mod trajectory;
pub mod waypoint;

pub use config::{ConfigError, GeneratorConfig, TrajectoryParams, load_config};
pub use diagnostics::{Diagnostic, Diagnostics, RecordingDiagnostics, Severity, TracingDiagnostics};
pub use minimum_jerk::{EndpointError, MinimumJerk};
pub use quintic::{BoundaryState, QuinticCoefficients};
pub use time::Time;
pub use trajectory::{Interp, Trajectory, TrajectoryError};
pub use waypoint::WayPoint;
