//! Unit tests for the Engine logging slot
//!
//! IMPORTANT: LOGGER is a global OnceLock shared across all tests.
//! Every test that swaps the logger is marked #[serial].

use crate::terraview::Engine;
use crate::terraview::log::{Logger, LogEntry, LogSeverity};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Test logger that captures entries from "terraview::test" only
///
/// Unit tests elsewhere in the crate log concurrently through the same global slot.
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        if entry.source == "terraview::test" {
            self.entries.lock().unwrap().push(entry.clone());
        }
    }
}

fn teardown() {
    Engine::set_min_severity(LogSeverity::Trace);
    Engine::reset_logger();
}

// ============================================================================
// LOGGER TESTS
// ============================================================================

#[test]
#[serial]
fn test_custom_logger_receives_logs() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    Engine::log(LogSeverity::Info, "terraview::test", "hello".to_string());

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].source, "terraview::test");
        assert_eq!(captured[0].message, "hello");
        assert!(captured[0].file.is_none());
    }
    teardown();
}

#[test]
#[serial]
fn test_log_detailed_with_file_line() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    Engine::log_detailed(LogSeverity::Error, "terraview::test", "boom".to_string(), "camera.rs", 7);

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured[0].file, Some("camera.rs"));
        assert_eq!(captured[0].line, Some(7));
    }
    teardown();
}

#[test]
#[serial]
fn test_min_severity_filters_entries() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);
    Engine::set_min_severity(LogSeverity::Warn);

    Engine::log(LogSeverity::Debug, "terraview::test", "dropped".to_string());
    Engine::log(LogSeverity::Warn, "terraview::test", "kept".to_string());

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].message, "kept");
    }
    assert_eq!(Engine::min_severity(), LogSeverity::Warn);
    teardown();
}

#[test]
#[serial]
fn test_engine_err_macro_logs_and_builds_error() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    let err = crate::engine_err!("terraview::test", InvalidConfig => "near = {}", -1.0);

    assert!(matches!(err, crate::terraview::Error::InvalidConfig(ref msg) if msg == "near = -1"));
    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].severity, LogSeverity::Error);
        assert!(captured[0].line.is_some());
    }
    teardown();
}

#[test]
#[serial]
fn test_reset_logger_to_default() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);
    Engine::reset_logger();

    Engine::log(LogSeverity::Info, "terraview::test", "to stdout".to_string());

    assert!(entries.lock().unwrap().is_empty());
    teardown();
}
