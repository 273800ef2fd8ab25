// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CMake configuration and solution resolution.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::{GeneratorSpec, ToolchainsFile};
use crate::env::Environment;
use crate::exec::{run_checked, ExecError};

/// Errors configuring a project through CMake.
#[derive(Debug, Error)]
pub enum CmakeError {
    #[error("project requires dependencies {deps:?}, but no vcpkg directory is configured")]
    VcpkgNotConfigured { deps: Vec<String> },

    #[error("CMakeCache.txt has no CMAKE_PROJECT_NAME entry")]
    ProjectNameNotFound,

    #[error("solution file {0} does not exist")]
    SolutionMissing(PathBuf),

    #[error(transparent)]
    Exec(#[from] ExecError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Configure the project in `build_dir` and return the generated solution
/// file. Required vcpkg dependencies are installed first.
pub async fn configure(
    env: &Environment,
    toolchains: &ToolchainsFile,
    build_dir: &Path,
    generator: &GeneratorSpec,
    cmake_options: &[String],
    required_dependencies: &[String],
) -> Result<PathBuf, CmakeError> {
    let mut args: Vec<String> = vec!["..".into(), "-G".into(), generator.name.clone()];
    if let Some(architecture) = &generator.architecture {
        args.push("-A".into());
        args.push(architecture.clone());
    }

    if !required_dependencies.is_empty() {
        let vcpkg_dir = env
            .vcpkg_dir()
            .ok_or_else(|| CmakeError::VcpkgNotConfigured {
                deps: required_dependencies.to_vec(),
            })?;
        let mut install: Vec<&str> = vec!["install"];
        install.extend(required_dependencies.iter().map(String::as_str));
        install.push("--triplet");
        install.push(&toolchains.vcpkg.triplet);
        run_checked("vcpkg", &install, Some(vcpkg_dir), env.verbose).await?;
        args.push(format!(
            "-DCMAKE_TOOLCHAIN_FILE={}/scripts/buildsystems/vcpkg.cmake",
            vcpkg_dir.display()
        ));
    }

    args.extend(cmake_options.iter().cloned());

    tokio::fs::create_dir_all(build_dir).await?;
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    run_checked("cmake", &arg_refs, Some(build_dir), env.verbose).await?;

    let sln_file = resolve_solution(build_dir).await?;
    if !sln_file.exists() {
        return Err(CmakeError::SolutionMissing(sln_file));
    }
    Ok(sln_file)
}

/// Read the project name out of `CMakeCache.txt` and derive the solution
/// path from it.
async fn resolve_solution(build_dir: &Path) -> Result<PathBuf, CmakeError> {
    let cache = tokio::fs::read_to_string(build_dir.join("CMakeCache.txt")).await?;
    for line in cache.lines() {
        if let Some(rest) = line.strip_prefix("CMAKE_PROJECT_NAME") {
            if let Some((_, name)) = rest.split_once('=') {
                return Ok(build_dir.join(format!("{}.sln", name.trim_end())));
            }
        }
    }
    Err(CmakeError::ProjectNameNotFound)
}

#[cfg(test)]
#[path = "cmake_tests.rs"]
mod tests;
