// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

/// Restricts a watch session to files with one of a set of extensions.
///
/// Matching is case-insensitive, mirroring the `TypeId` normalization rule.
#[derive(Debug, Clone)]
pub struct GlobFilter {
    extensions: Vec<String>,
}

impl GlobFilter {
    pub fn new(extensions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            extensions: extensions.into_iter().map(|e| e.into().to_lowercase()).collect(),
        }
    }

    /// Default filter: a single `src` extension, matching this subsystem's
    /// example scripts (`pikachu.src`).
    pub fn default_source() -> Self {
        Self::new(["src"])
    }

    pub fn matches(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions.iter().any(|e| e == &ext.to_lowercase())
    }
}

impl Default for GlobFilter {
    fn default() -> Self {
        Self::default_source()
    }
}
