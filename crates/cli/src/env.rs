// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Machine-local environment, resolved once and threaded explicitly
//! through the run.
//!
//! Values come from CLI flags first, then from the optional JSON
//! environment file named by `--env`. There is no global state: callers
//! receive an [`Environment`] and pass it down.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::cli::Cli;

/// Analyzer executable name inside the analyzer build directory.
const ANALYZER_EXE: &str = "inspectcode";

/// Optional JSON environment file with machine-local paths.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
struct EnvFile {
    #[serde(default)]
    analyzer_directory: Option<PathBuf>,
    #[serde(default)]
    projects_cache_dir: Option<PathBuf>,
    #[serde(default)]
    supported_generators: Option<Vec<String>>,
    #[serde(default)]
    vcpkg_dir: Option<PathBuf>,
    #[serde(default)]
    caches_home: Option<PathBuf>,
    #[serde(default)]
    analyzer_version: Option<String>,
}

/// Resolved machine-local configuration for one harness run.
#[derive(Debug, Clone)]
pub struct Environment {
    analyzer_dir: PathBuf,
    projects_cache: PathBuf,
    caches_home: PathBuf,
    supported_generators: Vec<String>,
    vcpkg_dir: Option<PathBuf>,
    analyzer_version: Option<String>,
    pub verbose: bool,
    pub dry_run: bool,
}

/// Errors constructing the environment.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("failed to read environment file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse environment file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing analyzer directory: pass --analyzer-dir or set it in the environment file")]
    MissingAnalyzerDir,
}

impl Environment {
    /// Resolve the environment from CLI args and the optional env file.
    /// CLI flags win over file entries.
    pub fn from_cli(cli: &Cli) -> Result<Self, EnvError> {
        let file = match &cli.env_path {
            Some(path) => load_env_file(path)?,
            None => EnvFile::default(),
        };

        let analyzer_dir = cli
            .analyzer_dir
            .clone()
            .or(file.analyzer_directory)
            .ok_or(EnvError::MissingAnalyzerDir)?;

        let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let projects_cache = cli
            .projects_cache
            .clone()
            .or(file.projects_cache_dir)
            .unwrap_or_else(|| base_dir.join("projects"));
        let caches_home = file
            .caches_home
            .unwrap_or_else(|| base_dir.join("caches-home"));

        let supported_generators = if cli.supported_generators.is_empty() {
            file.supported_generators.unwrap_or_default()
        } else {
            cli.supported_generators.clone()
        };

        Ok(Self {
            analyzer_dir,
            projects_cache,
            caches_home,
            supported_generators,
            vcpkg_dir: cli.vcpkg_dir.clone().or(file.vcpkg_dir),
            analyzer_version: file.analyzer_version,
            verbose: cli.verbose,
            dry_run: cli.dry_run,
        })
    }

    /// Path to the analyzer executable.
    pub fn analyzer_path(&self) -> PathBuf {
        self.analyzer_dir.join(ANALYZER_EXE)
    }

    /// Checkout directory for a named project.
    pub fn project_dir(&self, project_name: &str) -> PathBuf {
        self.projects_cache.join(project_name)
    }

    /// Analyzer cache directory shared across projects.
    pub fn caches_home(&self) -> &Path {
        &self.caches_home
    }

    /// CMake generators usable on this machine.
    pub fn supported_generators(&self) -> &[String] {
        &self.supported_generators
    }

    /// vcpkg installation directory, when one is configured.
    pub fn vcpkg_dir(&self) -> Option<&Path> {
        self.vcpkg_dir.as_deref()
    }

    /// Declared analyzer version, for run metadata.
    pub fn analyzer_version(&self) -> Option<&str> {
        self.analyzer_version.as_deref()
    }
}

fn load_env_file(path: &Path) -> Result<EnvFile, EnvError> {
    let content = std::fs::read_to_string(path).map_err(|source| EnvError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| EnvError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
