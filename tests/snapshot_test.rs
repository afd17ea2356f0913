use gpx2csv::{convert_str, CsvOptions, LineEnding};
use std::path::Path;

fn load_fixture(path: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{path}")).unwrap()
}

fn convert(gpx: &str) -> String {
    let opts = CsvOptions {
        line_ending: LineEnding::Lf,
    };
    convert_str(gpx, &opts).unwrap()
}

/// Compare actual CSV output against the expected snapshot file.
/// When `UPDATE_SNAPSHOTS=1` is set, write/overwrite the expected file instead.
fn assert_snapshot(actual: &str, expected_path: &str) {
    let path = format!("tests/fixtures/expected/{expected_path}");

    if matches!(std::env::var("UPDATE_SNAPSHOTS").as_deref(), Ok("1")) {
        let dir = Path::new(&path).parent().unwrap();
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(&path, actual.as_bytes()).unwrap();
        eprintln!("Updated snapshot: {path}");
        return;
    }

    let expected = std::fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Expected file not found: {path}. Run with UPDATE_SNAPSHOTS=1 to generate."));

    assert_eq!(
        actual, expected,
        "Snapshot mismatch for {path}.\nRun with UPDATE_SNAPSHOTS=1 to update."
    );
}

fn assert_snapshot_default(fixture: &str, expected: &str) {
    let gpx = load_fixture(fixture);
    assert_snapshot(&convert(&gpx), expected);
}

// ---- basic/ ----

#[test]
fn snapshot_01_minimal_waypoint() {
    assert_snapshot_default(
        "basic/01_minimal_waypoint.gpx",
        "basic/01_minimal_waypoint.csv",
    );
}

#[test]
fn snapshot_02_full_waypoint() {
    assert_snapshot_default("basic/02_full_waypoint.gpx", "basic/02_full_waypoint.csv");
}

#[test]
fn snapshot_03_summit() {
    assert_snapshot_default("basic/03_summit.gpx", "basic/03_summit.csv");
}

#[test]
fn snapshot_04_multiple_waypoints() {
    assert_snapshot_default(
        "basic/04_multiple_waypoints.gpx",
        "basic/04_multiple_waypoints.csv",
    );
}

// ---- edge/ ----

#[test]
fn snapshot_05_quoting() {
    assert_snapshot_default("edge/05_quoting.gpx", "edge/05_quoting.csv");
}

#[test]
fn snapshot_06_mixed_document() {
    assert_snapshot_default("edge/06_mixed_document.gpx", "edge/06_mixed_document.csv");
}

#[test]
fn snapshot_07_no_waypoints() {
    assert_snapshot_default("edge/07_no_waypoints.gpx", "edge/07_no_waypoints.csv");
}
