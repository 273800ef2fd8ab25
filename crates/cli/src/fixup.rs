// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative source fixups.
//!
//! Fleet projects are pinned to old commits that occasionally need a small
//! patch to configure at all. A fixup is a literal find/replace on one
//! file of the checkout; configs cannot run arbitrary code.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// One literal replacement applied to a file under the checkout root.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PatchSpec {
    /// File to patch, relative to the checkout root.
    pub file: String,
    /// Literal text that must occur in the file.
    pub find: String,
    /// Replacement for every occurrence of `find`.
    pub replace: String,
}

/// Errors applying fixups.
#[derive(Debug, Error)]
pub enum FixupError {
    #[error("failed to read {file}: {source}")]
    Read {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {file}: {source}")]
    Write {
        file: String,
        #[source]
        source: std::io::Error,
    },

    /// The pinned sources changed under the patch; the fixup needs updating.
    #[error("pattern not found in {file}: {find:?}")]
    PatternNotFound { file: String, find: String },
}

/// Apply each patch in order. Zero occurrences of `find` is an error: a
/// silently inapplicable patch means the pin and the fixup disagree.
pub fn apply_fixups(root: &Path, fixups: &[PatchSpec]) -> Result<(), FixupError> {
    for patch in fixups {
        let path = root.join(&patch.file);
        let content = std::fs::read_to_string(&path).map_err(|source| FixupError::Read {
            file: patch.file.clone(),
            source,
        })?;
        if !content.contains(&patch.find) {
            return Err(FixupError::PatternNotFound {
                file: patch.file.clone(),
                find: patch.find.clone(),
            });
        }
        let patched = content.replace(&patch.find, &patch.replace);
        std::fs::write(&path, patched).map_err(|source| FixupError::Write {
            file: patch.file.clone(),
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "fixup_tests.rs"]
mod tests;
