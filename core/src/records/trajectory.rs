use crate::records::Detection;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Three detections, in enumeration order, tested together as one trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrajectoryCandidate {
    pub first: Detection,
    pub second: Detection,
    pub third: Detection,
}

impl TrajectoryCandidate {
    pub fn new(first: Detection, second: Detection, third: Detection) -> Self {
        Self {
            first,
            second,
            third,
        }
    }

    pub fn detections(&self) -> [Detection; 3] {
        [self.first, self.second, self.third]
    }
}

/// A detection annotated with the real-world velocity of the trajectory it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcceptedTrajectoryPoint {
    pub detection: Detection,
    pub vertical_velocity: f64,
    pub horizontal_velocity: f64,
    pub trajectory_id: u64,
}

impl fmt::Display for AcceptedTrajectoryPoint {
    // `{:?}` keeps a decimal point on whole values ("15.0") and prints the
    // shortest form that reads back to the same f64.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, VelocityVer={:?}, VelocityHor={:?}, DetectionNum={}",
            self.detection, self.vertical_velocity, self.horizontal_velocity, self.trajectory_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_line_keeps_decimal_point_on_whole_velocities() {
        let point = AcceptedTrajectoryPoint {
            detection: Detection::new(4, 108, 160, 60),
            vertical_velocity: 21.5,
            horizontal_velocity: 2.0,
            trajectory_id: 3,
        };
        assert_eq!(
            point.to_string(),
            "Frame 4: X=108, Y=160, Radius=60, VelocityVer=21.5, VelocityHor=2.0, DetectionNum=3"
        );
    }

    #[test]
    fn negative_velocities_print_with_sign() {
        let point = AcceptedTrajectoryPoint {
            detection: Detection::new(0, 1, 2, 3),
            vertical_velocity: -410.33,
            horizontal_velocity: -0.5,
            trajectory_id: 0,
        };
        assert!(point
            .to_string()
            .ends_with("VelocityVer=-410.33, VelocityHor=-0.5, DetectionNum=0"));
    }
}
