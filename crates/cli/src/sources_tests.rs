#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

use std::process::Command as StdCommand;

fn git(dir: &Path, args: &[&str]) {
    let status = StdCommand::new("git")
        .args([
            "-c",
            "user.name=fleet",
            "-c",
            "user.email=fleet@example.com",
        ])
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(status.status.success(), "git {args:?} failed");
}

/// A throwaway repository with one committed file; returns its head sha.
fn seed_repo(dir: &Path) -> String {
    git(dir, &["init", "-q", "-b", "main"]);
    std::fs::write(dir.join("hello.txt"), "v1\n").unwrap();
    git(dir, &["add", "."]);
    git(dir, &["commit", "-q", "-m", "initial"]);
    let output = StdCommand::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(dir)
        .output()
        .unwrap();
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

fn spec(repo: &Path, commit: &str) -> SourceSpec {
    SourceSpec {
        kind: None,
        repo: repo.display().to_string(),
        commit: commit.to_string(),
        subrepo: None,
        recursive: false,
        root: None,
    }
}

#[tokio::test]
async fn test_non_git_kind_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut spec = spec(dir.path(), "abc");
    spec.kind = Some("svn".to_string());

    let err = checkout(&spec, &dir.path().join("target"), None, false)
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::UnsupportedKind(kind) if kind == "svn"));
}

#[tokio::test]
async fn test_checkout_clones_and_pins() {
    let upstream = tempfile::tempdir().unwrap();
    let sha = seed_repo(upstream.path());

    let work = tempfile::tempdir().unwrap();
    let target = work.path().join("proj");
    let root = checkout(&spec(upstream.path(), &sha), &target, None, false)
        .await
        .unwrap();

    assert_eq!(root, target);
    assert_eq!(
        std::fs::read_to_string(target.join("hello.txt")).unwrap(),
        "v1\n"
    );
}

#[tokio::test]
async fn test_checkout_discards_local_edits_on_rerun() {
    let upstream = tempfile::tempdir().unwrap();
    let sha = seed_repo(upstream.path());

    let work = tempfile::tempdir().unwrap();
    let target = work.path().join("proj");
    let source = spec(upstream.path(), &sha);
    checkout(&source, &target, None, false).await.unwrap();

    // Simulate a fixup from an earlier run.
    std::fs::write(target.join("hello.txt"), "patched\n").unwrap();
    checkout(&source, &target, None, false).await.unwrap();

    assert_eq!(
        std::fs::read_to_string(target.join("hello.txt")).unwrap(),
        "v1\n"
    );
}

#[tokio::test]
async fn test_branch_overrides_pinned_commit() {
    let upstream = tempfile::tempdir().unwrap();
    let sha = seed_repo(upstream.path());
    git(upstream.path(), &["checkout", "-q", "-b", "develop"]);
    std::fs::write(upstream.path().join("hello.txt"), "v2\n").unwrap();
    git(upstream.path(), &["commit", "-q", "-am", "update"]);

    let work = tempfile::tempdir().unwrap();
    let target = work.path().join("proj");
    let root = checkout(
        &spec(upstream.path(), &sha),
        &target,
        Some("origin/develop"),
        false,
    )
    .await
    .unwrap();

    assert_eq!(
        std::fs::read_to_string(root.join("hello.txt")).unwrap(),
        "v2\n"
    );
}

#[tokio::test]
async fn test_root_subdirectory_is_returned() {
    let upstream = tempfile::tempdir().unwrap();
    git(upstream.path(), &["init", "-q", "-b", "main"]);
    std::fs::create_dir(upstream.path().join("lib")).unwrap();
    std::fs::write(upstream.path().join("lib/a.txt"), "a").unwrap();
    git(upstream.path(), &["add", "."]);
    git(upstream.path(), &["commit", "-q", "-m", "initial"]);

    let work = tempfile::tempdir().unwrap();
    let target = work.path().join("proj");
    let mut source = spec(upstream.path(), "main");
    source.root = Some("lib".to_string());

    let root = checkout(&source, &target, None, false).await.unwrap();
    assert_eq!(root, target.join("lib"));
    assert!(root.join("a.txt").exists());
}

#[tokio::test]
async fn test_repo_info_reads_head_metadata() {
    let upstream = tempfile::tempdir().unwrap();
    let sha = seed_repo(upstream.path());

    let work = tempfile::tempdir().unwrap();
    let target = work.path().join("proj");
    checkout(&spec(upstream.path(), &sha), &target, None, false)
        .await
        .unwrap();

    let info = repo_info(&target).await.unwrap();
    assert_eq!(info.reference, sha);
    assert_eq!(info.message, "initial");
    assert!(info.timestamp > 0);
    assert!(!info.url.is_empty());
}

#[tokio::test]
async fn test_repo_info_on_plain_directory() {
    let dir = tempfile::tempdir().unwrap();
    assert!(repo_info(dir.path()).await.is_none());
}
