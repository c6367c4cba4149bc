pub mod filter;
pub mod log_reader;
pub mod result_writer;

pub use filter::{FilterOutcome, Gate, KinematicFilter, PixelVelocity};
pub use log_reader::{read_detections, read_detections_from_path, LogReadout};
pub use result_writer::{write_points, write_points_to_path};
