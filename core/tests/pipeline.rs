use hailcore::calibration::{calibrate, FixedPoints, PixelPoint};
use hailcore::processing::{read_detections_from_path, write_points_to_path};
use hailcore::{CalibrationRatio, Detection, FilterConfig, KinematicFilter, TrackError};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const LOG: &str = "\
Frame 0: X=936, Y=40, Radius=60
Frame 0: X=200, Y=700, Radius=12
Frame 1: X=912, Y=62, Radius=60
camera hiccup
Frame 2: X=888, Y=84, Radius=61
Frame 3: X=864, Y=106, Radius=61
Frame 9: X=10, Y=10, Radius=3
";

fn run_once(dir: &Path, output_name: &str) -> String {
    let readout = read_detections_from_path(dir.join("hailstoneData.txt")).unwrap();
    let ratio = CalibrationRatio::load(dir.join("pixelToMeter.txt")).unwrap();
    let filter = KinematicFilter::new(FilterConfig::default()).unwrap();
    let outcome = filter.run(&readout.detections, ratio, 0);

    let output = dir.join(output_name);
    write_points_to_path(&output, &outcome.points).unwrap();
    fs::read_to_string(output).unwrap()
}

#[test]
fn log_to_filtered_output() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("hailstoneData.txt"), LOG).unwrap();

    let mut source = FixedPoints::pair(PixelPoint::new(0, 0), PixelPoint::new(0, 200));
    let ratio = calibrate(&mut source, 10.0).unwrap();
    ratio.save(dir.path().join("pixelToMeter.txt")).unwrap();

    let contents = run_once(dir.path(), "filteredHailstones.txt");
    let lines: Vec<&str> = contents.lines().collect();

    // Frames 0..=3 of the falling stone: (0,1,2) (0,1,3) (0,2,3) (1,2,3).
    assert_eq!(lines.len(), 12);
    assert!(lines[0].starts_with("Frame 0: X=936, Y=40, Radius=60, VelocityVer="));
    assert!(lines[11].ends_with("DetectionNum=3"));

    for (index, line) in lines.iter().enumerate() {
        let id = format!("DetectionNum={}", index / 3);
        assert!(line.ends_with(&id), "{} should end with {}", line, id);
        // Written lines still start with a detection record.
        let detection: Detection = line.parse().unwrap();
        assert!(detection.radius >= 60);
    }
}

#[test]
fn rerun_is_byte_identical() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("hailstoneData.txt"), LOG).unwrap();
    CalibrationRatio::new(0.0125)
        .unwrap()
        .save(dir.path().join("pixelToMeter.txt"))
        .unwrap();

    let first = run_once(dir.path(), "first.txt");
    let second = run_once(dir.path(), "second.txt");
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn degenerate_calibration_writes_nothing() {
    let dir = tempdir().unwrap();
    let ratio_path = dir.path().join("pixelToMeter.txt");

    let mut source = FixedPoints::pair(PixelPoint::new(0, 0), PixelPoint::new(0, 0));
    let result = calibrate(&mut source, 1.0).and_then(|ratio| ratio.save(&ratio_path));

    assert!(matches!(result, Err(TrackError::DegenerateCalibration(_))));
    assert!(!ratio_path.exists());
}
