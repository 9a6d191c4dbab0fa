// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! hotscript-compiler: the contract with the external compiler backend.
//!
//! The compiler itself is a black box out of scope for this subsystem —
//! this crate only defines the shape of its input and output so the
//! orchestrator and the embedding game can agree on it.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod result;

pub use result::CompileResult;

use async_trait::async_trait;
use std::path::Path;

/// Accepts a source path, returns an artifact plus diagnostics.
///
/// Compilation is expected to be blocking and CPU-bound even though this
/// method is `async`: an implementation whose underlying compiler call is
/// synchronous is responsible for routing it through
/// `tokio::task::spawn_blocking` or an equivalent dedicated executor
/// itself, so that awaiting `compile` never stalls the runtime thread the
/// orchestrator's event loop and the tick loop share.
#[async_trait]
pub trait Compiler: Send + Sync {
    async fn compile(&self, path: &Path) -> CompileResult;
}

#[cfg(any(test, feature = "test-support"))]
pub mod fake;
