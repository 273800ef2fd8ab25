#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

use rstest::rstest;

#[rstest]
#[case(0, "00:00")]
#[case(59, "00:59")]
#[case(61, "01:01")]
#[case(600, "10:00")]
#[case(3999, "66:39")]
fn test_format_duration(#[case] secs: u64, #[case] expected: &str) {
    assert_eq!(format_duration(Duration::from_secs(secs)), expected);
}

#[test]
fn test_empty_summary_is_ok() {
    let summary = Summary::new();
    assert!(summary.is_ok());
    assert_eq!(summary.finish(Duration::from_secs(5)), 0);
}

#[test]
fn test_failures_flip_the_exit_code() {
    let mut summary = Summary::new();
    summary.record_failure("zlib: expected and actual set of errors differ".to_string());
    summary.record_failure("fmt: (2 errors in logs)".to_string());
    assert!(!summary.is_ok());
    assert_eq!(summary.finish(Duration::from_secs(5)), 1);
}
