//! Integration tests for logger behavior.

use log::{debug, info, trace, LevelFilter};
use std::fs;
use study_planner::shared::logger::{self, is_verbose, LogOptions};
use tempfile::TempDir;

#[test]
fn file_logging_respects_level() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("logs").join("studyplanner.log");

    let options = LogOptions {
        level: LevelFilter::Debug,
        file: Some(path.clone()),
        verbose: true,
    };
    logger::init(&options).expect("Failed to initialize logger");
    assert!(is_verbose());

    info!("info integration");
    debug!("debug integration");
    trace!("trace integration");
    log::logger().flush();

    let content = fs::read_to_string(&path).expect("Failed to read log file");
    assert!(content.contains("INFO"));
    assert!(content.contains("info integration"));
    assert!(content.contains("debug integration"));
    assert!(!content.contains("trace integration"));

    // only one global logger per process
    assert!(logger::init(&LogOptions::default()).is_err());
}
