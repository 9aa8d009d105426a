// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the runner.
//!
//! A non-zero exit code is not an error here: it is delivered verbatim to
//! exit listeners, and interpreting it is the caller's business.

use std::time::Duration;
use thiserror::Error;

/// Errors from spawning or waiting on a process.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("cannot run an empty command")]
    EmptyCommand,
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed while waiting for `{program}` to exit: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from awaiting a readiness pattern.
#[derive(Debug, Error)]
pub enum ReadyError {
    #[error("no output matched `{pattern}` within {timeout:?}")]
    Timeout { pattern: String, timeout: Duration },
    #[error("process exited with code {exit_code} before output matched `{pattern}`")]
    ExitedEarly { pattern: String, exit_code: i32 },
}
