// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors raised by a script lifecycle hook. Logged and counted by the
/// driver; never propagated to the game loop.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("hook failed: {0}")]
    HookFailed(String),
    #[error("hook panicked: {0}")]
    Panicked(String),
}

/// Errors raised when an `Artifact` fails to produce a working `Script`.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact does not resolve to a type implementing the script contract: {0}")]
    NotAScript(String),
    #[error("construction failed: {0}")]
    ConstructionFailed(String),
}

/// Errors from the per-entity component accessors on `World`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("no entity in scope for this context (global script)")]
    NoEntityInScope,
    #[error("component not present")]
    ComponentMissing,
    #[error("component present but of a different type than requested")]
    TypeMismatch,
}
