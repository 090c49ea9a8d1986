use reminders_core::{init_logging, logging_status, LogTarget, LoggingError};

// One test per binary: the logger is process-global.
#[test]
fn file_logging_starts_once_and_rejects_other_settings() {
    let dir = tempfile::tempdir().unwrap();
    let target = LogTarget::Directory(dir.path().to_path_buf());

    assert!(logging_status().is_none());
    init_logging("info", target.clone()).unwrap();
    init_logging("INFO", target.clone()).unwrap();
    assert_eq!(logging_status(), Some(("info", target.clone())));

    let err = init_logging("debug", target.clone()).unwrap_err();
    assert!(matches!(err, LoggingError::Reconfigure { .. }));

    let err = init_logging("info", LogTarget::Stderr).unwrap_err();
    assert!(matches!(err, LoggingError::Reconfigure { .. }));

    log::info!("event=logging_test module=tests status=ok");
    log::logger().flush();
    let written = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(Result::ok)
        .any(|entry| entry.file_name().to_string_lossy().starts_with("reminders"));
    assert!(written, "expected a reminders log file in {}", dir.path().display());
}
