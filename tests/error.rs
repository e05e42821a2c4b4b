use std::path::PathBuf;

use easytask::error::{exit_codes, Error};
use serde_json::Value;

#[test]
fn exit_code_user_error() {
    let err = Error::InvalidArgument("bad input".to_string());
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    let err = Error::TaskNotFound("row 4".to_string());
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
}

#[test]
fn exit_code_operation_failed() {
    let err = Error::OperationFailed("boom".to_string());
    assert_eq!(err.exit_code(), exit_codes::OPERATION_FAILED);
    let err = Error::NoHomeDir("easytask");
    assert_eq!(err.exit_code(), exit_codes::OPERATION_FAILED);
}

#[test]
fn details_include_lock_path() {
    let err = Error::LockFailed(PathBuf::from("/tmp/preferences.json.lock"));
    let details = err.details().expect("details");
    assert_eq!(
        details["path"],
        Value::String("/tmp/preferences.json.lock".to_string())
    );
}

#[test]
fn details_name_missing_task() {
    let err = Error::TaskNotFound("abc".to_string());
    assert_eq!(err.to_string(), "Task not found: abc");
    assert_eq!(err.details().expect("details")["task_id"], "abc");

    let err = Error::InvalidConfig("bad config".to_string());
    assert!(err.details().is_none());
}
