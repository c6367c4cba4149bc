use crate::processing::filter::Gate;
use serde::{Deserialize, Serialize};

/// Counts how candidates fared against the filter gates.
pub struct GateMetrics {
    tally: GateTally,
}

/// Snapshot of a [`GateMetrics`] recorder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateTally {
    pub evaluated: usize,
    pub accepted: usize,
    pub vertical_monotonicity: usize,
    pub frame_ordering: usize,
    pub frame_gap: usize,
    pub radius_consistency: usize,
    pub velocity_consistency: usize,
}

impl GateTally {
    pub fn rejected(&self) -> usize {
        self.vertical_monotonicity
            + self.frame_ordering
            + self.frame_gap
            + self.radius_consistency
            + self.velocity_consistency
    }

    pub fn rejected_at(&self, gate: Gate) -> usize {
        match gate {
            Gate::VerticalMonotonicity => self.vertical_monotonicity,
            Gate::FrameOrdering => self.frame_ordering,
            Gate::FrameGap => self.frame_gap,
            Gate::RadiusConsistency => self.radius_consistency,
            Gate::VelocityConsistency => self.velocity_consistency,
        }
    }
}

impl GateMetrics {
    pub fn new() -> Self {
        Self {
            tally: GateTally::default(),
        }
    }

    pub fn record_accepted(&mut self) {
        self.tally.evaluated += 1;
        self.tally.accepted += 1;
    }

    pub fn record_rejected(&mut self, gate: Gate) {
        self.tally.evaluated += 1;
        let slot = match gate {
            Gate::VerticalMonotonicity => &mut self.tally.vertical_monotonicity,
            Gate::FrameOrdering => &mut self.tally.frame_ordering,
            Gate::FrameGap => &mut self.tally.frame_gap,
            Gate::RadiusConsistency => &mut self.tally.radius_consistency,
            Gate::VelocityConsistency => &mut self.tally.velocity_consistency,
        };
        *slot += 1;
    }

    pub fn snapshot(&self) -> GateTally {
        self.tally
    }
}

impl Default for GateMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejections_are_counted_per_gate() {
        let mut metrics = GateMetrics::new();
        metrics.record_rejected(Gate::FrameGap);
        metrics.record_rejected(Gate::FrameGap);
        metrics.record_rejected(Gate::RadiusConsistency);
        metrics.record_accepted();

        let tally = metrics.snapshot();
        assert_eq!(tally.evaluated, 4);
        assert_eq!(tally.accepted, 1);
        assert_eq!(tally.rejected(), 3);
        assert_eq!(tally.rejected_at(Gate::FrameGap), 2);
        assert_eq!(tally.rejected_at(Gate::VerticalMonotonicity), 0);
    }
}
