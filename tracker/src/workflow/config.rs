use anyhow::Context;
use hailcore::prelude::{FilterConfig, DEFAULT_MAX_FRAME_GAP};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub detection_log: PathBuf,
    pub calibration_file: PathBuf,
    pub output: PathBuf,
    /// Optional JSON summary of the run.
    pub report: Option<PathBuf>,
    pub max_radius_diff: u32,
    pub max_velocity_deviation: f64,
    pub max_frame_gap: u32,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        let filter = FilterConfig::default();
        Self {
            detection_log: PathBuf::from("hailstoneData.txt"),
            calibration_file: PathBuf::from("pixelToMeter.txt"),
            output: PathBuf::from("filteredHailstones.txt"),
            report: None,
            max_radius_diff: filter.max_radius_diff,
            max_velocity_deviation: filter.max_velocity_deviation,
            max_frame_gap: DEFAULT_MAX_FRAME_GAP,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn to_filter_config(&self) -> FilterConfig {
        FilterConfig {
            max_radius_diff: self.max_radius_diff,
            max_velocity_deviation: self.max_velocity_deviation,
            max_frame_gap: self.max_frame_gap,
        }
    }
}
