pub mod ratio;
pub mod source;

pub use ratio::{calibrate, CalibrationRatio};
pub use source::{FixedPoints, PixelPoint, ReferencePointSource};
