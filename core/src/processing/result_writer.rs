use crate::prelude::TrackResult;
use crate::records::AcceptedTrajectoryPoint;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes one line per point.
pub fn write_points<W: Write>(
    mut writer: W,
    points: &[AcceptedTrajectoryPoint],
) -> TrackResult<()> {
    for point in points {
        writeln!(writer, "{}", point)?;
    }
    writer.flush()?;
    Ok(())
}

/// Truncates `path` and writes `points` into it.
pub fn write_points_to_path<P: AsRef<Path>>(
    path: P,
    points: &[AcceptedTrajectoryPoint],
) -> TrackResult<()> {
    let file = File::create(path)?;
    write_points(BufWriter::new(file), points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Detection;
    use std::fs;

    fn point(frame: u32, id: u64) -> AcceptedTrajectoryPoint {
        AcceptedTrajectoryPoint {
            detection: Detection::new(frame, 10, 20, 3),
            vertical_velocity: 1.25,
            horizontal_velocity: -0.4,
            trajectory_id: id,
        }
    }

    #[test]
    fn writes_one_line_per_point() {
        let mut buffer = Vec::new();
        write_points(&mut buffer, &[point(1, 0), point(2, 0)]).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Frame 1: X=10, Y=20, Radius=3, VelocityVer=1.25, VelocityHor=-0.4, DetectionNum=0\n\
             Frame 2: X=10, Y=20, Radius=3, VelocityVer=1.25, VelocityHor=-0.4, DetectionNum=0\n"
        );
    }

    #[test]
    fn file_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filteredHailstones.txt");
        fs::write(&path, "stale contents that are longer than the new output\n".repeat(4)).unwrap();

        write_points_to_path(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");

        write_points_to_path(&path, &[point(4, 2)]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 1);
    }
}
