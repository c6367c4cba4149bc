use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use hailcore::calibration::CalibrationRatio;
use hailcore::prelude::FilterConfig;
use hailcore::processing::{read_detections_from_path, write_points_to_path, FilterOutcome, Gate};
use hailcore::telemetry::GateTally;
use hailcore::KinematicFilter;
use log::{debug, info, warn};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

pub struct WorkflowResult {
    pub filter: FilterConfig,
    pub detection_count: usize,
    pub skipped_lines: usize,
    pub ratio: CalibrationRatio,
    pub outcome: FilterOutcome,
}

/// JSON summary written next to the filtered output when requested.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub detection_log: PathBuf,
    pub output: PathBuf,
    pub detections: usize,
    pub skipped_lines: usize,
    pub ratio: f64,
    pub trajectories: usize,
    pub points_written: usize,
    pub filter: FilterConfig,
    pub gates: GateTally,
    pub rejected_by_gate: Vec<GateRejections>,
}

#[derive(Debug, Serialize)]
pub struct GateRejections {
    pub gate: Gate,
    pub rejected: usize,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    /// Reads, filters and writes. Nothing is written unless the log and the
    /// calibration ratio both load.
    pub fn execute(&self) -> anyhow::Result<WorkflowResult> {
        let config = &self.config;

        let readout = read_detections_from_path(&config.detection_log).with_context(|| {
            format!("reading detection log {}", config.detection_log.display())
        })?;
        if readout.detections.is_empty() {
            warn!("No valid detections found. Check input formatting.");
        }

        let ratio = CalibrationRatio::load(&config.calibration_file).with_context(|| {
            format!(
                "loading pixel ratio from {} (run the calibration step first)",
                config.calibration_file.display()
            )
        })?;

        let filter =
            KinematicFilter::new(config.to_filter_config()).context("configuring filter")?;
        let outcome = filter.run(&readout.detections, ratio, 0);
        for gate in Gate::ALL {
            debug!("rejected at {}: {}", gate, outcome.tally.rejected_at(gate));
        }

        write_points_to_path(&config.output, &outcome.points)
            .with_context(|| format!("writing {}", config.output.display()))?;
        info!(
            "{} trajectories written to {}",
            outcome.trajectory_count(),
            config.output.display()
        );

        let result = WorkflowResult {
            filter: filter.config().clone(),
            detection_count: readout.detections.len(),
            skipped_lines: readout.skipped_lines,
            ratio,
            outcome,
        };

        if let Some(report_path) = config.report.as_ref() {
            let report = serde_json::to_string_pretty(&self.report(&result))
                .context("serializing run report")?;
            fs::write(report_path, report)
                .with_context(|| format!("writing run report {}", report_path.display()))?;
        }

        Ok(result)
    }

    pub fn report(&self, result: &WorkflowResult) -> RunReport {
        RunReport {
            detection_log: self.config.detection_log.clone(),
            output: self.config.output.clone(),
            detections: result.detection_count,
            skipped_lines: result.skipped_lines,
            ratio: result.ratio.value(),
            trajectories: result.outcome.trajectory_count(),
            points_written: result.outcome.points.len(),
            filter: result.filter.clone(),
            gates: result.outcome.tally,
            rejected_by_gate: Gate::ALL
                .into_iter()
                .map(|gate| GateRejections {
                    gate,
                    rejected: result.outcome.tally.rejected_at(gate),
                })
                .collect(),
        }
    }
}
