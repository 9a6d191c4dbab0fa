// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! hotscript-runtime: the script lifecycle contract and the view of the
//! world a script sees.
//!
//! This crate has no knowledge of watching, compiling, or caching — it
//! defines the seam the rest of the subsystem builds on: what a `Script`
//! is, and what it is allowed to touch.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod artifact;
mod context;
mod driver;
mod entity;
mod error;
mod script;
mod services;
mod world;

pub use artifact::Artifact;
pub use context::{ContextLogger, ScriptContext};
pub use driver::ScriptDriver;
pub use entity::EntityHandle;
pub use error::{ArtifactError, ScriptError, WorldError};
pub use script::ScriptBase;
pub use services::ServiceFacade;
pub use world::World;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;
