// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing for the fleet harness.

use clap::Parser;
use std::path::PathBuf;

/// Fleet correctness harness for a C/C++ code-inspection tool.
#[derive(Parser, Debug, Clone)]
#[command(name = "inspectfleet", version, about = "Code-inspection fleet correctness harness")]
pub struct Cli {
    /// Projects to check, as `name` or `name:branch`
    /// (default: every configured project on its stable baseline)
    #[arg(short = 'p', long = "project", value_name = "NAME[:BRANCH]")]
    pub projects: Vec<String>,

    /// Projects file (JSON or TOML) mapping project names to configurations
    #[arg(long, default_value = "projects.json", env = "INSPECTFLEET_PROJECTS_FILE")]
    pub projects_file: PathBuf,

    /// Toolchains file describing CMake generators and the vcpkg triplet
    #[arg(long, default_value = "toolchains.json", env = "INSPECTFLEET_TOOLCHAINS_FILE")]
    pub toolchains_file: PathBuf,

    /// Directory holding standalone per-project configuration files
    #[arg(long, default_value = "proj-config")]
    pub proj_config_dir: PathBuf,

    /// JSON environment file with machine-local paths
    #[arg(short = 'e', long = "env", env = "INSPECTFLEET_ENV")]
    pub env_path: Option<PathBuf>,

    /// Directory containing the analyzer build (overrides the env file)
    #[arg(long, env = "INSPECTFLEET_ANALYZER_DIR")]
    pub analyzer_dir: Option<PathBuf>,

    /// Cache directory for checked-out project sources
    #[arg(long, env = "INSPECTFLEET_PROJECTS_CACHE")]
    pub projects_cache: Option<PathBuf>,

    /// CMake generators available on this machine
    #[arg(long, num_args = 0..)]
    pub supported_generators: Vec<String>,

    /// vcpkg installation directory
    #[arg(long)]
    pub vcpkg_dir: Option<PathBuf>,

    /// Write the accumulated run report to this JSON file
    #[arg(long)]
    pub report_path: Option<PathBuf>,

    /// Prepare projects but skip analyzer invocation
    #[arg(long)]
    pub dry_run: bool,

    /// Echo subprocess output instead of capturing it
    #[arg(long)]
    pub verbose: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
