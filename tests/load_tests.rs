//! End-to-end scans over temporary trace trees.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use trace_panda::plot::TraceCollector;
use trace_panda::{LoadError, PathSchema, TraceFilters, TraceKey, TraceLoader};

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn reference_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "los/modeA/UE_A/1/5G_drx_rsrp.csv", "-80,-81,-79");
    write(dir.path(), "los/modeA/UE_B/1/5G_drx_rsrp.csv", "-90,-91");
    dir
}

#[test]
fn modem_filter_keeps_only_matching_modem() {
    let dir = reference_tree();
    let store = TraceLoader::new(dir.path())
        .load(&TraceFilters::new().modems(["UE_A"]))
        .unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(
        store.get("UE_A", "modeA", "5G_drx_rsrp", 1).unwrap(),
        &vec![-80.0, -81.0, -79.0]
    );
    assert!(store.get("UE_B", "modeA", "5G_drx_rsrp", 1).is_none());
}

#[test]
fn unfiltered_load_keeps_everything() {
    let dir = reference_tree();
    let store = TraceLoader::new(dir.path()).load(&TraceFilters::new()).unwrap();

    let keys: Vec<TraceKey> = store.keys().collect();
    assert_eq!(
        keys,
        vec![
            TraceKey::new("UE_A", "modeA", "5G_drx_rsrp", 1),
            TraceKey::new("UE_B", "modeA", "5G_drx_rsrp", 1),
        ]
    );
}

#[test]
fn empty_root_gives_empty_store() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "los/modeA/readme.txt", "not a trace");

    let store = TraceLoader::new(dir.path())
        .load(&TraceFilters::new().modems(["UE_A"]))
        .unwrap();
    assert!(store.is_empty());
}

#[test]
fn later_file_with_same_key_wins() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "day1/agv_track1/UE_A/2/5G_prx_rsrp.csv", "-70");
    write(dir.path(), "day2/agv_track1/UE_A/2/5G_prx_rsrp.csv", "-60,-61");

    let store = TraceLoader::new(dir.path()).load(&TraceFilters::new()).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(
        store.get("UE_A", "agv_track1", "5G_prx_rsrp", 2).unwrap(),
        &vec![-60.0, -61.0]
    );
}

#[test]
fn track_and_metric_filters_combine() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "g/agv_track1/UE_A/1/5G_drx_rsrp.csv", "-80");
    write(dir.path(), "g/agv_track1/UE_A/1/4G_prx_rsrp.csv", "-81");
    write(dir.path(), "g/agv_track2/UE_A/1/5G_drx_rsrp.csv", "-82");
    write(dir.path(), "g/pedestrian_track1/UE_B/1/5G_drx_rsrp.csv", "-83");

    let filters = TraceFilters::new().tracks(["track1"]).metrics(["5G"]);
    let store = TraceLoader::new(dir.path()).load(&filters).unwrap();

    let keys: Vec<String> = store.keys().map(|k| k.to_string()).collect();
    assert_eq!(
        keys,
        vec![
            "UE_A/agv_track1/5G_drx_rsrp/1",
            "UE_B/pedestrian_track1/5G_drx_rsrp/1",
        ]
    );
}

#[test]
fn malformed_trace_aborts_the_scan() {
    let dir = reference_tree();
    write(dir.path(), "los/modeA/UE_C/1/5G_drx_rsrp.csv", "-80,n/a");

    let err = TraceLoader::new(dir.path())
        .load(&TraceFilters::new())
        .unwrap_err();
    assert!(matches!(err, LoadError::MalformedTrace { .. }), "{err}");
}

#[test]
fn empty_trace_file_aborts_the_scan() {
    let dir = reference_tree();
    write(dir.path(), "los/modeA/UE_C/1/5G_drx_rsrp.csv", "");

    let err = TraceLoader::new(dir.path())
        .load(&TraceFilters::new())
        .unwrap_err();
    assert!(matches!(err, LoadError::EmptyTrace { .. }), "{err}");
}

#[test]
fn shallow_file_fails_classification() {
    let dir = reference_tree();
    write(dir.path(), "stray.csv", "1,2");

    let err = TraceLoader::new(dir.path())
        .load(&TraceFilters::new())
        .unwrap_err();
    assert!(matches!(err, LoadError::MalformedPath { .. }), "{err}");
}

#[test]
fn missing_group_level_fails_instead_of_filtering_everything() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "agv_track1/UE_A/1/5G_drx_rsrp.csv", "-80");

    let err = TraceLoader::new(dir.path())
        .load(&TraceFilters::new().modes(["agv"]))
        .unwrap_err();
    assert!(matches!(err, LoadError::MalformedPath { .. }), "{err}");
}

#[test]
fn plotter_sees_each_loaded_trace() {
    let dir = reference_tree();
    let mut collector = TraceCollector::new();
    let store = TraceLoader::new(dir.path())
        .load_with(&TraceFilters::new(), &mut collector)
        .unwrap();

    assert_eq!(store.len(), 2);
    let labels: Vec<&str> = collector.traces.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["modeA@UE_A", "modeA@UE_B"]);
}

#[test]
fn custom_schema_from_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "data/vehicle/UE_C/3/4G_prx_rsrp.csv", "-99,-98");
    let schema_path = dir.path().join("schema.json");
    fs::write(&schema_path, r#"{ "mode": { "from_root": 0 } }"#).unwrap();

    let schema = PathSchema::from_file(&schema_path).unwrap();
    let store = TraceLoader::with_schema(dir.path().join("data"), schema)
        .load(&TraceFilters::new().modes(["vehicle"]))
        .unwrap();
    assert_eq!(
        store.get("UE_C", "vehicle", "4G_prx_rsrp", 3).unwrap(),
        &vec![-99.0, -98.0]
    );
}
