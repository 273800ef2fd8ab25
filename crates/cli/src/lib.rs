// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Continuous-correctness harness for a C/C++ code-inspection tool.
//!
//! Builds a fleet of third-party C/C++ projects, runs the inspection tool
//! over each one, and compares the emitted diagnostics against a
//! per-project baseline of known errors. A regression in the tool shows up
//! as a mismatch between the expected and actual diagnostic sets.

pub mod cli;
pub mod cmake;
pub mod config;
pub mod env;
pub mod exec;
pub mod fixup;
pub mod inspect;
pub mod output;
pub mod prepare;
pub mod runner;
pub mod settings;
pub mod sources;
pub mod summary;
