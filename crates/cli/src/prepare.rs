// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project preparation: checkout, fixups, build configuration, and the
//! analyzer settings file.
//!
//! Two preparation paths exist. CMake projects are configured into a
//! generator-specific build directory whose generated solution is
//! analyzed. Custom-build projects ship their own solution; a preparation
//! script and build steps run in the checkout instead.

use std::path::PathBuf;
use thiserror::Error;

use crate::cmake::{self, CmakeError};
use crate::config::{GeneratorSpec, ProjectConfig, ToolchainsFile};
use crate::env::Environment;
use crate::exec::{run_checked, run_step, ExecError};
use crate::fixup::{apply_fixups, FixupError};
use crate::output::print_step;
use crate::sources::{checkout, SourceError};

/// Default build directory name prefix for CMake projects.
const DEFAULT_BUILD_DIR: &str = "build";

/// A project ready for analysis.
#[derive(Debug)]
pub struct PreparedProject {
    /// Directory the analyzer artifacts are written into.
    pub project_dir: PathBuf,
    pub sln_file: PathBuf,
}

/// Errors preparing a project.
#[derive(Debug, Error)]
pub enum PrepareError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Fixup(#[from] FixupError),

    #[error(transparent)]
    Cmake(#[from] CmakeError),

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error("solution file {0} does not exist")]
    SolutionMissing(PathBuf),

    #[error("project has neither a custom build nor a usable CMake generator")]
    NoToolchain,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Check out, patch, and configure one project for one generator, and
/// write its analyzer settings file next to the solution.
pub async fn prepare(
    env: &Environment,
    toolchains: &ToolchainsFile,
    project_name: &str,
    config: &ProjectConfig,
    branch: Option<&str>,
    generator_key: &str,
    generator: Option<&GeneratorSpec>,
) -> Result<PreparedProject, PrepareError> {
    let target_dir = env.project_dir(project_name);
    print_step("prepare", format!("checking out into {}", target_dir.display()));
    let project_root = checkout(&config.sources, &target_dir, branch, env.verbose).await?;

    if !config.fixups.is_empty() {
        print_step("prepare", format!("applying {} fixups", config.fixups.len()));
        apply_fixups(&target_dir, &config.fixups)?;
    }

    let prepared = match (&config.custom_build, generator) {
        (Some(custom), _) => {
            if !custom.script.is_empty() {
                let argv: Vec<&str> = custom.script.iter().map(String::as_str).collect();
                run_checked(argv[0], &argv[1..], Some(&project_root), env.verbose).await?;
            }
            for step in &custom.build_steps {
                run_step(step, &project_root, env.verbose).await?;
            }
            let sln_file = project_root.join(&custom.solution);
            if !sln_file.exists() {
                return Err(PrepareError::SolutionMissing(sln_file));
            }
            PreparedProject {
                project_dir: project_root,
                sln_file,
            }
        }
        (None, Some(generator)) => {
            let prefix = config.build_dir.as_deref().unwrap_or(DEFAULT_BUILD_DIR);
            let build_dir = project_root.join(format!("{prefix}-{generator_key}"));
            print_step("prepare", format!("configuring in {}", build_dir.display()));
            let sln_file = cmake::configure(
                env,
                toolchains,
                &build_dir,
                generator,
                &config.cmake_options,
                &config.required_dependencies,
            )
            .await?;
            for step in &config.build_steps {
                run_step(step, &build_dir, env.verbose).await?;
            }
            PreparedProject {
                project_dir: build_dir,
                sln_file,
            }
        }
        (None, None) => return Err(PrepareError::NoToolchain),
    };

    crate::settings::write_settings(&prepared.sln_file, &config.to_skip).await?;
    Ok(prepared)
}
