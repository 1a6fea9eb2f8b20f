// Unit tests for logger module
// Only this test installs the global logger for the unit test binary

use crate::logger::{LOG_FILE_NAME, initialize};

use tempfile::TempDir;

#[test]
fn given_log_dir_when_initialized_twice_then_file_created_and_second_call_ok() {
    let dir = TempDir::new().unwrap();

    initialize(dir.path()).unwrap();
    log::info!("report client test line");
    initialize(dir.path()).unwrap();

    let contents = std::fs::read_to_string(dir.path().join(LOG_FILE_NAME)).unwrap();
    assert!(contents.contains("report client test line"));
}
