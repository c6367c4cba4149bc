//! Detection parsing, calibration and kinematic trajectory filtering for
//! hailstone video logs.
//!
//! A run reads `Frame N: X=.., Y=.., Radius=..` records, tests every ordered
//! triple of detections for plausible falling motion and writes the accepted
//! triples with their real-world velocities.

pub mod calibration;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod records;
pub mod telemetry;

pub use calibration::CalibrationRatio;
pub use prelude::{FilterConfig, TrackError, TrackResult};
pub use processing::KinematicFilter;
pub use records::{AcceptedTrajectoryPoint, Detection};
