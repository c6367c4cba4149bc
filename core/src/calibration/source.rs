use crate::prelude::{TrackError, TrackResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pixel coordinate picked on a reference frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i64,
    pub y: i64,
}

impl PixelPoint {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &PixelPoint) -> f64 {
        // Subtracting in f64 cannot overflow at the i64 extremes.
        let dx = other.x as f64 - self.x as f64;
        let dy = other.y as f64 - self.y as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for PixelPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Accepts `x,y` (whitespace around either number is allowed).
impl FromStr for PixelPoint {
    type Err = TrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| TrackError::InvalidInput(format!("expected x,y but got {:?}", s)))?;
        let parse = |raw: &str| {
            raw.trim()
                .parse::<i64>()
                .map_err(|err| TrackError::InvalidInput(format!("coordinate {:?}: {}", raw, err)))
        };
        Ok(Self::new(parse(x)?, parse(y)?))
    }
}

/// Anything that can hand back the two reference points of a calibration.
///
/// The interactive picker blocks until the operator has clicked twice; it
/// reports [`TrackError::InsufficientPoints`] when the window goes away first
/// and [`TrackError::FrameUnavailable`] when there is nothing to show.
pub trait ReferencePointSource {
    fn obtain_two_reference_points(&mut self) -> TrackResult<(PixelPoint, PixelPoint)>;
}

/// Points known ahead of time, e.g. typed on the command line.
#[derive(Debug, Clone, Default)]
pub struct FixedPoints {
    points: Vec<PixelPoint>,
}

impl FixedPoints {
    pub fn new(points: Vec<PixelPoint>) -> Self {
        Self { points }
    }

    pub fn pair(first: PixelPoint, second: PixelPoint) -> Self {
        Self::new(vec![first, second])
    }
}

impl ReferencePointSource for FixedPoints {
    fn obtain_two_reference_points(&mut self) -> TrackResult<(PixelPoint, PixelPoint)> {
        match self.points.as_slice() {
            [first, second, ..] => Ok((*first, *second)),
            other => Err(TrackError::InsufficientPoints(other.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = PixelPoint::new(0, 0);
        let b = PixelPoint::new(3, 4);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn distance_between_extreme_coordinates_is_finite() {
        let a = PixelPoint::new(i64::MIN, 0);
        let b = PixelPoint::new(i64::MAX, 0);
        let distance = a.distance_to(&b);
        assert!(distance.is_finite());
        assert!(distance > 1.8e19);
    }

    #[test]
    fn parses_comma_separated_coordinates() {
        assert_eq!("12, 40".parse::<PixelPoint>().unwrap(), PixelPoint::new(12, 40));
        assert!("12;40".parse::<PixelPoint>().is_err());
        assert!("a,4".parse::<PixelPoint>().is_err());
    }

    #[test]
    fn fixed_points_need_two_entries() {
        let mut source = FixedPoints::new(vec![PixelPoint::new(1, 1)]);
        assert!(matches!(
            source.obtain_two_reference_points(),
            Err(TrackError::InsufficientPoints(1))
        ));
    }
}
