// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use hotscript_core::Diagnostic;
use hotscript_runtime::Artifact;
use std::sync::Arc;
use std::time::Duration;

/// `{ success, artifact?, diagnostics, elapsed }`.
///
/// A result with `success = true` must carry an artifact that resolves to
/// a type implementing the script contract; the orchestrator's validators
/// reject otherwise and demote the result to a failure with an
/// explanatory diagnostic.
pub struct CompileResult {
    pub success: bool,
    pub artifact: Option<Arc<dyn Artifact>>,
    pub diagnostics: Vec<Diagnostic>,
    pub elapsed: Duration,
}

impl CompileResult {
    pub fn ok(artifact: Arc<dyn Artifact>, elapsed: Duration) -> Self {
        Self {
            success: true,
            artifact: Some(artifact),
            diagnostics: Vec::new(),
            elapsed,
        }
    }

    pub fn failed(diagnostics: Vec<Diagnostic>, elapsed: Duration) -> Self {
        Self {
            success: false,
            artifact: None,
            diagnostics,
            elapsed,
        }
    }
}
