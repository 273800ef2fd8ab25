// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fleet configuration: the projects file, per-project configuration, and
//! the toolchains file.
//!
//! Both the projects file and standalone project files may be JSON or
//! TOML, decided by extension.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use inspectfleet_report::{KnownError, KnownFileError};

use crate::env::Environment;
use crate::fixup::PatchSpec;

/// Errors loading or resolving fleet configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },

    #[error("unknown project: {0}")]
    UnknownProject(String),

    #[error("project has no baseline for branch {0:?}")]
    UnknownBranch(String),
}

/// The projects file: project name to inline configuration or to a
/// standalone config file under the project-config directory.
pub type ProjectsFile = BTreeMap<String, ProjectEntry>;

/// One entry in the projects file.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProjectEntry {
    /// Relative path to a standalone project configuration file.
    Path(String),
    /// Inline project configuration.
    Inline(Box<ProjectConfig>),
}

/// Where and how to fetch a project's sources.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct SourceSpec {
    /// Source kind; only git (the default) is supported.
    #[serde(default)]
    pub kind: Option<String>,
    pub repo: String,
    pub commit: String,
    #[serde(default)]
    pub subrepo: Option<SubrepoSpec>,
    /// Update submodules recursively.
    #[serde(default)]
    pub recursive: bool,
    /// Subdirectory of the checkout holding the actual project.
    #[serde(default)]
    pub root: Option<String>,
}

/// A second repository checked out inside the main one.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct SubrepoSpec {
    pub path: String,
    pub url: String,
    pub commit: String,
}

/// Projects that ship their own solution instead of using CMake.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct CustomBuild {
    /// Preparation command (argv) run in the project directory.
    #[serde(default)]
    pub script: Vec<String>,
    /// Shell-less build commands, each split on whitespace.
    #[serde(default)]
    pub build_steps: Vec<String>,
    /// Path of the solution file, relative to the project directory.
    pub solution: String,
}

/// Projects within the solution to restrict the analysis to.
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum ProjectFilter {
    One(String),
    Many(Vec<String>),
}

impl ProjectFilter {
    /// The filter as individual `--project=` argument values.
    pub fn names(&self) -> Vec<&str> {
        match self {
            ProjectFilter::One(name) => vec![name.as_str()],
            ProjectFilter::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// Expected diagnostics for one project revision.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct Baseline {
    #[serde(default)]
    pub known_errors: Vec<KnownError>,
    #[serde(default)]
    pub known_file_errors: Vec<KnownFileError>,
    /// Expected number of files the analyzer inspects; informational.
    #[serde(default)]
    pub inspected_files_count: Option<usize>,
}

/// Configuration of one fleet project.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct ProjectConfig {
    pub sources: SourceSpec,

    /// Declarative source patches applied after checkout.
    #[serde(default)]
    pub fixups: Vec<PatchSpec>,

    /// Set for projects that don't configure through CMake.
    #[serde(default)]
    pub custom_build: Option<CustomBuild>,

    #[serde(default)]
    pub cmake_options: Vec<String>,

    /// vcpkg packages the project needs before CMake configuration.
    #[serde(default)]
    pub required_dependencies: Vec<String>,

    /// Generators the project builds with; `None` means any supported one.
    #[serde(default)]
    pub required_toolchains: Option<Vec<String>>,

    /// Build directory name prefix (default "build").
    #[serde(default)]
    pub build_dir: Option<String>,

    /// Shell-less build commands run after CMake configuration.
    #[serde(default)]
    pub build_steps: Vec<String>,

    /// Restrict analysis to these projects within the solution.
    #[serde(default)]
    pub project_to_check: Option<ProjectFilter>,

    /// MSBuild-style properties forwarded to the analyzer.
    #[serde(default)]
    pub analyzer_properties: BTreeMap<String, String>,

    /// File masks the analyzer must skip, written into the settings file.
    #[serde(default)]
    pub to_skip: Vec<String>,

    /// Accepted for compatibility with older fleet configs; the harness
    /// always runs the 64-bit analyzer.
    #[serde(default)]
    pub only_x64: bool,

    /// Baseline for the pinned commit.
    #[serde(default)]
    pub stable: Baseline,

    /// Baselines for tracked branches, keyed by branch name.
    #[serde(default)]
    pub latest: BTreeMap<String, Baseline>,
}

impl ProjectConfig {
    /// Baseline for the requested branch, or the stable one.
    pub fn baseline(&self, branch: Option<&str>) -> Result<&Baseline, ConfigError> {
        match branch {
            Some(branch) => self
                .latest
                .get(branch)
                .ok_or_else(|| ConfigError::UnknownBranch(branch.to_string())),
            None => Ok(&self.stable),
        }
    }
}

/// CMake generator descriptions plus vcpkg settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct ToolchainsFile {
    pub cmake_generators: BTreeMap<String, GeneratorSpec>,
    pub vcpkg: VcpkgConfig,
}

/// One CMake generator as passed to `cmake -G`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct GeneratorSpec {
    pub name: String,
    #[serde(default)]
    pub architecture: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "snake_case")]
pub struct VcpkgConfig {
    pub triplet: String,
}

/// Load the projects file (JSON or TOML by extension).
pub fn load_projects(path: &Path) -> Result<ProjectsFile, ConfigError> {
    load_by_extension(path)
}

/// Load the toolchains file (JSON or TOML by extension).
pub fn load_toolchains(path: &Path) -> Result<ToolchainsFile, ConfigError> {
    load_by_extension(path)
}

/// Resolve a projects-file entry to a full configuration, reading the
/// standalone file when the entry is a path.
pub fn resolve_entry(
    entry: &ProjectEntry,
    proj_config_dir: &Path,
) -> Result<ProjectConfig, ConfigError> {
    match entry {
        ProjectEntry::Inline(config) => Ok((**config).clone()),
        ProjectEntry::Path(relative) => load_by_extension(&proj_config_dir.join(relative)),
    }
}

/// Toolchains usable for a project: its required generators intersected
/// with the supported ones, sorted for a deterministic try order.
pub fn compatible_toolchains(project: &ProjectConfig, env: &Environment) -> Vec<String> {
    let supported = env.supported_generators();
    match &project.required_toolchains {
        None => supported.to_vec(),
        Some(required) => {
            let mut compatible: Vec<String> = required
                .iter()
                .filter(|t| supported.contains(t))
                .cloned()
                .collect();
            compatible.sort();
            compatible
        }
    }
}

/// Parse `-p/--project` selections into `(name, branch)` pairs. No
/// selection means every configured project on its stable baseline.
pub fn parse_selection(
    specified: &[String],
    projects: &ProjectsFile,
) -> Vec<(String, Option<String>)> {
    if specified.is_empty() {
        projects.keys().map(|name| (name.clone(), None)).collect()
    } else {
        specified
            .iter()
            .map(|raw| match raw.split_once(':') {
                Some((name, branch)) => (name.to_string(), Some(branch.to_string())),
                None => (raw.clone(), None),
            })
            .collect()
    }
}

fn load_by_extension<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: display.clone(),
        source,
    })?;
    if path.extension().is_some_and(|e| e == "toml") {
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: display,
            message: e.to_string(),
        })
    } else {
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: display,
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
