use std::{fs, thread::sleep, time::Duration};

use serial_test::serial;
use sonic_overlay::logging;
use tempfile::tempdir;

#[test]
fn default_level_depends_on_debug() {
    assert_eq!(logging::default_level(true), "debug");
    assert_eq!(logging::default_level(false), "info");
}

#[test]
#[serial]
fn writes_log_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("log.txt");

    logging::init(true, Some(path.clone()));
    tracing::info!("freeze mode toggled");

    sleep(Duration::from_millis(100));

    assert!(path.exists(), "log file was not created");
    let contents = fs::read_to_string(path).unwrap();
    assert!(contents.contains("freeze mode toggled"));
}
