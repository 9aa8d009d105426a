// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! corral-runner: spawn external tools, stream their output, and deliver
//! their exit code exactly once.
//!
//! The entry point is [`ProcessRunner`]: build one from a
//! [`corral_core::CommandSpec`] plus frozen listener registries, then either
//! `run()` it to completion or `start()` it and supervise in the background.
//! A [`ReadinessWaiter`] attached to the runner lets callers block only until
//! a long-running server announces it is ready, not until it exits.

mod drain;

pub mod error;
pub mod listener;
pub mod readiness;
pub mod supervisor;

pub use error::{ReadyError, RunError};
pub use listener::{ExitListener, LineBuffer, LineListener, StartListener};
pub use readiness::ReadinessWaiter;
pub use supervisor::{ProcessHandle, ProcessRunner, ProcessRunnerBuilder};
