use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Frame spacing beyond which two observations are not linked.
pub const DEFAULT_MAX_FRAME_GAP: u32 = 5;

/// Thresholds applied by the kinematic filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Largest radius change (pixels) allowed between consecutive detections.
    pub max_radius_diff: u32,
    /// Largest difference between the two segment speeds (pixels per frame).
    pub max_velocity_deviation: f64,
    /// Largest frame spacing between consecutive detections of a triple.
    /// Defaults to [`DEFAULT_MAX_FRAME_GAP`].
    pub max_frame_gap: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_radius_diff: 2,
            max_velocity_deviation: 2.0,
            max_frame_gap: DEFAULT_MAX_FRAME_GAP,
        }
    }
}

impl FilterConfig {
    pub fn validate(&self) -> TrackResult<()> {
        if !self.max_velocity_deviation.is_finite() || self.max_velocity_deviation < 0.0 {
            return Err(TrackError::InvalidInput(format!(
                "max_velocity_deviation must be a non-negative number, got {}",
                self.max_velocity_deviation
            )));
        }
        Ok(())
    }
}

/// Common error type for the tracking pipeline.
#[derive(thiserror::Error, Debug)]
pub enum TrackError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("calibration file {path} unreadable: {source}")]
    CalibrationUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid calibration ratio: {0}")]
    InvalidRatio(String),
    #[error("degenerate calibration: {0}")]
    DegenerateCalibration(String),
    #[error("two reference points required, got {0}")]
    InsufficientPoints(usize),
    #[error("reference frame unavailable: {0}")]
    FrameUnavailable(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type TrackResult<T> = Result<T, TrackError>;

/// Why a single log line was not turned into a detection.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("malformed line")]
    Malformed,
    #[error("invalid {field} value {value:?}")]
    InvalidValue { field: &'static str, value: String },
}
