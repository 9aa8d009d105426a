// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener seams for process output and lifecycle.
//!
//! Registries are populated through the builder and frozen before the runner
//! starts; nothing mutates them while a run is in flight. Line listeners are
//! invoked on the drainer task, in registration order, once per line.

use crate::supervisor::ProcessHandle;
use parking_lot::Mutex;
use std::sync::Arc;

/// Callback invoked once per output line.
pub trait LineListener: Send + Sync {
    fn on_line(&self, line: &str);
}

/// Callback invoked exactly once, immediately after the child is spawned.
pub trait StartListener: Send + Sync {
    fn on_start(&self, process: &ProcessHandle);
}

/// Callback invoked exactly once with the final exit code, after both
/// drainers have reached end-of-stream.
pub trait ExitListener: Send + Sync {
    fn on_exit(&self, exit_code: i32);
}

impl<F> LineListener for F
where
    F: Fn(&str) + Send + Sync,
{
    fn on_line(&self, line: &str) {
        self(line)
    }
}

impl<F> StartListener for F
where
    F: Fn(&ProcessHandle) + Send + Sync,
{
    fn on_start(&self, process: &ProcessHandle) {
        self(process)
    }
}

impl<F> ExitListener for F
where
    F: Fn(i32) + Send + Sync,
{
    fn on_exit(&self, exit_code: i32) {
        self(exit_code)
    }
}

/// Accumulating line listener.
///
/// Clones share the same buffer, so one clone can be registered on the
/// runner while the caller keeps another to read captured output after the
/// run — typically to hand `--format=json`-style tool output to a parser.
#[derive(Clone, Debug, Default)]
pub struct LineBuffer {
    lines: Arc<Mutex<Vec<String>>>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the captured lines, in arrival order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Captured output joined with newlines.
    pub fn contents(&self) -> String {
        self.lines.lock().join("\n")
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }
}

impl LineListener for LineBuffer {
    fn on_line(&self, line: &str) {
        self.lines.lock().push(line.to_string());
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
