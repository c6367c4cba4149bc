use crate::calibration::CalibrationRatio;
use crate::math::stats::StatsHelper;
use crate::math::velocity::segment_velocity;
use crate::prelude::{FilterConfig, TrackResult};
use crate::records::{AcceptedTrajectoryPoint, Detection, TrajectoryCandidate};
use crate::telemetry::log::LogManager;
use crate::telemetry::metrics::{GateMetrics, GateTally};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Plausibility tests, in the order they are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gate {
    /// y must not decrease across the triple.
    VerticalMonotonicity,
    /// Frames must be strictly increasing.
    FrameOrdering,
    /// Consecutive detections at most `max_frame_gap` frames apart.
    FrameGap,
    /// Consecutive radii within `max_radius_diff`.
    RadiusConsistency,
    /// Both segment velocities defined, non-zero and of similar speed.
    VelocityConsistency,
}

impl Gate {
    pub const ALL: [Gate; 5] = [
        Gate::VerticalMonotonicity,
        Gate::FrameOrdering,
        Gate::FrameGap,
        Gate::RadiusConsistency,
        Gate::VelocityConsistency,
    ];
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Gate::VerticalMonotonicity => "vertical monotonicity",
            Gate::FrameOrdering => "frame ordering",
            Gate::FrameGap => "frame gap",
            Gate::RadiusConsistency => "radius consistency",
            Gate::VelocityConsistency => "velocity consistency",
        };
        f.write_str(name)
    }
}

/// Averaged velocity of an accepted candidate, pixels per frame, two decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelVelocity {
    pub vertical: f64,
    pub horizontal: f64,
}

impl PixelVelocity {
    /// Scales into real-world units.
    pub fn to_real(self, ratio: CalibrationRatio) -> PixelVelocity {
        PixelVelocity {
            vertical: StatsHelper::round2(self.vertical * ratio.value()),
            horizontal: StatsHelper::round2(self.horizontal * ratio.value()),
        }
    }
}

/// Result of one filter run.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    /// Three points per accepted candidate, in acceptance order.
    pub points: Vec<AcceptedTrajectoryPoint>,
    /// First id not handed out by this run.
    pub next_trajectory_id: u64,
    pub tally: GateTally,
}

impl FilterOutcome {
    pub fn trajectory_count(&self) -> usize {
        self.points.len() / 3
    }
}

/// Brute-force triplet search over a detection list.
///
/// Every `(i, j, k)` with `i < j < k` is tried, so a detection can end up in
/// several accepted trajectories.
pub struct KinematicFilter {
    config: FilterConfig,
    logger: LogManager,
}

impl KinematicFilter {
    pub fn new(config: FilterConfig) -> TrackResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            logger: LogManager::new("filter"),
        })
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Runs the gates on one candidate and returns the first one it fails.
    pub fn evaluate(&self, candidate: &TrajectoryCandidate) -> Result<PixelVelocity, Gate> {
        let [d1, d2, d3] = candidate.detections();

        if d1.y > d2.y || d2.y > d3.y {
            return Err(Gate::VerticalMonotonicity);
        }

        if !(d1.frame < d2.frame && d2.frame < d3.frame) {
            return Err(Gate::FrameOrdering);
        }

        let max_gap = self.config.max_frame_gap;
        if d2.frame - d1.frame > max_gap || d3.frame - d2.frame > max_gap {
            return Err(Gate::FrameGap);
        }

        let max_radius = self.config.max_radius_diff;
        if d1.radius.abs_diff(d2.radius) > max_radius || d2.radius.abs_diff(d3.radius) > max_radius
        {
            return Err(Gate::RadiusConsistency);
        }

        let (first, second) = match (segment_velocity(&d1, &d2), segment_velocity(&d2, &d3)) {
            (Some(first), Some(second)) => (first, second),
            _ => return Err(Gate::VelocityConsistency),
        };
        if first.has_zero_component() || second.has_zero_component() {
            return Err(Gate::VelocityConsistency);
        }
        if (first.magnitude - second.magnitude).abs() > self.config.max_velocity_deviation {
            return Err(Gate::VelocityConsistency);
        }

        Ok(PixelVelocity {
            vertical: StatsHelper::round2(StatsHelper::mean_pair(first.vertical, second.vertical)),
            horizontal: StatsHelper::round2(StatsHelper::mean_pair(
                first.horizontal,
                second.horizontal,
            )),
        })
    }

    /// Filters `detections`, numbering accepted trajectories from `first_id`.
    pub fn run(
        &self,
        detections: &[Detection],
        ratio: CalibrationRatio,
        first_id: u64,
    ) -> FilterOutcome {
        let mut metrics = GateMetrics::new();
        let mut points = Vec::new();
        let mut next_id = first_id;
        let n = detections.len();

        for i in 0..n {
            for j in (i + 1)..n {
                for k in (j + 1)..n {
                    let candidate =
                        TrajectoryCandidate::new(detections[i], detections[j], detections[k]);
                    match self.evaluate(&candidate) {
                        Ok(pixel_velocity) => {
                            let velocity = pixel_velocity.to_real(ratio);
                            self.logger.debug(&format!(
                                "trajectory {} from indices ({}, {}, {}): ver {:?} hor {:?}",
                                next_id, i, j, k, velocity.vertical, velocity.horizontal
                            ));
                            points.extend(candidate.detections().into_iter().map(|detection| {
                                AcceptedTrajectoryPoint {
                                    detection,
                                    vertical_velocity: velocity.vertical,
                                    horizontal_velocity: velocity.horizontal,
                                    trajectory_id: next_id,
                                }
                            }));
                            next_id += 1;
                            metrics.record_accepted();
                        }
                        Err(gate) => metrics.record_rejected(gate),
                    }
                }
            }
        }

        let tally = metrics.snapshot();
        self.logger.record(&format!(
            "{} detections, {} candidates evaluated, {} accepted",
            n, tally.evaluated, tally.accepted
        ));

        FilterOutcome {
            points,
            next_trajectory_id: next_id,
            tally,
        }
    }
}
