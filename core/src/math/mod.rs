pub mod stats;
pub mod velocity;

pub use stats::StatsHelper;
pub use velocity::{segment_velocity, SegmentVelocity};
