// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project source checkout via git.
//!
//! Checkouts are cached: a directory that already has a `.git` is reused
//! and force-reset to the pinned commit, so reruns don't re-clone the
//! fleet.

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::process::Command;

use crate::config::SourceSpec;
use crate::exec::{run_checked, ExecError};

/// Errors fetching project sources.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("unsupported source kind: {0}")]
    UnsupportedKind(String),

    #[error(transparent)]
    Exec(#[from] ExecError),
}

/// Head-commit metadata recorded into the run report.
#[derive(Debug, Clone, Serialize)]
pub struct RepoInfo {
    pub url: String,
    #[serde(rename = "ref")]
    pub reference: String,
    pub message: String,
    pub timestamp: i64,
}

/// Check out a project's sources into `target_dir` and return the
/// directory holding the project itself (the configured `root`
/// subdirectory, when set).
pub async fn checkout(
    spec: &SourceSpec,
    target_dir: &Path,
    branch: Option<&str>,
    verbose: bool,
) -> Result<PathBuf, SourceError> {
    if let Some(kind) = &spec.kind {
        if kind != "git" {
            return Err(SourceError::UnsupportedKind(kind.clone()));
        }
    }

    let revision = branch.unwrap_or(&spec.commit);
    clone_and_force_checkout(target_dir, &spec.repo, revision, verbose).await?;

    if let Some(subrepo) = &spec.subrepo {
        clone_and_force_checkout(
            &target_dir.join(&subrepo.path),
            &subrepo.url,
            &subrepo.commit,
            verbose,
        )
        .await?;
    }

    let mut submodule_args = vec!["submodule", "update", "--init"];
    if spec.recursive {
        submodule_args.push("--recursive");
    }
    run_checked("git", &submodule_args, Some(target_dir), verbose).await?;

    Ok(match &spec.root {
        Some(root) => target_dir.join(root),
        None => target_dir.to_path_buf(),
    })
}

/// Clone unless a checkout already exists, then pin to the revision and
/// discard any local modifications left by fixups of a previous run.
async fn clone_and_force_checkout(
    target_dir: &Path,
    url: &str,
    revision: &str,
    verbose: bool,
) -> Result<(), SourceError> {
    if !target_dir.join(".git").exists() {
        let target = target_dir.display().to_string();
        run_checked("git", &["clone", url, &target], None, verbose).await?;
    }
    run_checked("git", &["checkout", revision], Some(target_dir), verbose).await?;
    run_checked("git", &["reset", "--hard"], Some(target_dir), verbose).await?;
    Ok(())
}

/// Best-effort head-commit metadata for the run report; `None` when the
/// directory is not a usable git checkout.
pub async fn repo_info(dir: &Path) -> Option<RepoInfo> {
    let url = git_capture(dir, &["remote", "get-url", "origin"]).await?;
    let reference = git_capture(dir, &["rev-parse", "HEAD"]).await?;
    let message = git_capture(dir, &["log", "-1", "--pretty=%B"]).await?;
    let timestamp = git_capture(dir, &["log", "-1", "--pretty=%ct"])
        .await?
        .parse()
        .ok()?;
    Some(RepoInfo {
        url,
        reference,
        message,
        timestamp,
    })
}

async fn git_capture(dir: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .await
        .ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(test)]
#[path = "sources_tests.rs"]
mod tests;
