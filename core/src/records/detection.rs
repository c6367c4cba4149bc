use crate::prelude::LineError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Anchored at the start only; anything after the radius is ignored.
static DETECTION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Frame (\d+): X=(\d+), Y=(\d+), Radius=(\d+)").expect("detection pattern compiles")
});

/// One observed candidate object in one video frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Detection {
    pub frame: u32,
    pub x: u32,
    pub y: u32,
    pub radius: u32,
}

impl Detection {
    pub fn new(frame: u32, x: u32, y: u32, radius: u32) -> Self {
        Self {
            frame,
            x,
            y,
            radius,
        }
    }

    /// Parses one log line. Surrounding whitespace is ignored.
    pub fn parse_line(line: &str) -> Result<Self, LineError> {
        let captures = DETECTION_LINE
            .captures(line.trim())
            .ok_or(LineError::Malformed)?;

        let field = |index: usize, name: &'static str| -> Result<u32, LineError> {
            let raw = &captures[index];
            raw.parse().map_err(|_| LineError::InvalidValue {
                field: name,
                value: raw.to_string(),
            })
        };

        Ok(Self {
            frame: field(1, "frame")?,
            x: field(2, "x")?,
            y: field(3, "y")?,
            radius: field(4, "radius")?,
        })
    }
}

impl FromStr for Detection {
    type Err = LineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_line(s)
    }
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Frame {}: X={}, Y={}, Radius={}",
            self.frame, self.x, self.y, self.radius
        )
    }
}
