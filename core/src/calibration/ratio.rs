use crate::calibration::source::{PixelPoint, ReferencePointSource};
use crate::prelude::{TrackError, TrackResult};
use crate::telemetry::log::LogManager;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Real-world distance covered by one pixel. Always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct CalibrationRatio(f64);

impl CalibrationRatio {
    pub fn new(value: f64) -> TrackResult<Self> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(TrackError::InvalidRatio(format!(
                "{} is not a positive real number",
                value
            )))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Derives the ratio from two reference points `real_distance` apart.
    pub fn from_points(
        first: PixelPoint,
        second: PixelPoint,
        real_distance: f64,
    ) -> TrackResult<Self> {
        if !real_distance.is_finite() || real_distance <= 0.0 {
            return Err(TrackError::DegenerateCalibration(format!(
                "real-world distance must be positive, got {}",
                real_distance
            )));
        }

        let pixel_distance = first.distance_to(&second);
        if pixel_distance == 0.0 {
            return Err(TrackError::DegenerateCalibration(format!(
                "reference points {} and {} coincide",
                first, second
            )));
        }

        let ratio = Self::new(real_distance / pixel_distance)?;
        let logger = LogManager::new("calibration");
        logger.record(&format!("Pixel distance: {:.2} pixels", pixel_distance));
        logger.record(&format!("Pixel-to-distance ratio: {:.6} per pixel", ratio.0));
        Ok(ratio)
    }

    /// Reads the ratio persisted by [`CalibrationRatio::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> TrackResult<Self> {
        let path_ref = path.as_ref();
        let contents =
            fs::read_to_string(path_ref).map_err(|source| TrackError::CalibrationUnreadable {
                path: path_ref.to_path_buf(),
                source,
            })?;
        contents.parse()
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> TrackResult<()> {
        fs::write(path, self.to_string())?;
        Ok(())
    }
}

/// Asks `source` for two points and turns them into a ratio.
pub fn calibrate<S: ReferencePointSource + ?Sized>(
    source: &mut S,
    real_distance: f64,
) -> TrackResult<CalibrationRatio> {
    let (first, second) = source.obtain_two_reference_points()?;
    CalibrationRatio::from_points(first, second, real_distance)
}

impl FromStr for CalibrationRatio {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TrackError::InvalidRatio("calibration value is empty".into()));
        }
        let value: f64 = trimmed
            .parse()
            .map_err(|err| TrackError::InvalidRatio(format!("{:?}: {}", trimmed, err)))?;
        Self::new(value)
    }
}

impl TryFrom<f64> for CalibrationRatio {
    type Error = TrackError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CalibrationRatio> for f64 {
    fn from(ratio: CalibrationRatio) -> Self {
        ratio.0
    }
}

impl fmt::Display for CalibrationRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
