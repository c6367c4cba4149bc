pub mod detection;
pub mod trajectory;

pub use detection::Detection;
pub use trajectory::{AcceptedTrajectoryPoint, TrajectoryCandidate};
