#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

#[tokio::test]
async fn test_successful_command() {
    run_checked("true", &[], None, false).await.unwrap();
}

#[tokio::test]
async fn test_nonzero_exit_carries_code_and_stderr() {
    let err = run_checked("sh", &["-c", "echo boom >&2; exit 3"], None, false)
        .await
        .unwrap_err();
    match err {
        ExecError::NonZeroExit {
            program,
            code,
            stderr,
        } => {
            assert_eq!(program, "sh");
            assert_eq!(code, Some(3));
            assert_eq!(stderr, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_program_is_spawn_error() {
    let err = run_checked("definitely-not-a-real-program", &[], None, false)
        .await
        .unwrap_err();
    assert!(matches!(err, ExecError::Spawn { .. }));
}

#[tokio::test]
async fn test_cwd_is_respected() {
    let dir = tempfile::tempdir().unwrap();
    run_checked("sh", &["-c", "touch here.txt"], Some(dir.path()), false)
        .await
        .unwrap();
    assert!(dir.path().join("here.txt").exists());
}

#[tokio::test]
async fn test_run_step_splits_on_whitespace() {
    let dir = tempfile::tempdir().unwrap();
    run_step("touch marker.txt", dir.path(), false).await.unwrap();
    assert!(dir.path().join("marker.txt").exists());
}

#[tokio::test]
async fn test_empty_step_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_step("   ", dir.path(), false).await.unwrap_err();
    assert!(matches!(err, ExecError::EmptyCommandLine));
}
