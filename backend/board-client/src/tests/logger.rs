use crate::logger;

use tempfile::TempDir;

/// **VALUE**: Initialization creates the log file and repeated calls are harmless.
///
/// **WHY THIS MATTERS**: Front-ends may call `initialize` from more than one entry point.
/// A second call must not fail because a global logger is already installed.
///
/// **BUG THIS CATCHES**: Would catch the second call surfacing `SetLoggerError`.
#[test]
fn given_log_dir_when_initialized_twice_then_file_created_and_second_call_ok() {
    let dir = TempDir::new().expect("temp dir");

    logger::initialize(dir.path()).expect("first call installs");
    log::info!("logger test line");
    logger::initialize(dir.path()).expect("second call is a no-op");

    assert!(dir.path().join("board-client.log").exists());
}
