// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Readiness detection for long-running processes.
//!
//! A dev server announces readiness by printing a banner; the waiter watches
//! the output for a configured pattern and lets the caller block only until
//! that banner appears, the process dies first, or a timeout elapses.

use crate::error::ReadyError;
use crate::listener::{ExitListener, LineListener};
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// One-shot readiness gate. Terminal states are mutually exclusive; the
/// first signal to arrive wins and later ones are ignored until `reset()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    Waiting,
    Satisfied,
    TimedOut,
    ExitedEarly { exit_code: i32 },
}

/// Blocks a caller until a matching output line shows the process is ready.
///
/// Register the waiter with
/// [`ready_when`](crate::supervisor::ProcessRunnerBuilder::ready_when), which
/// attaches it to stdout, stderr, and exit notification; then call
/// [`ReadinessWaiter::await_ready`] from the caller. Clones share one gate.
#[derive(Clone)]
pub struct ReadinessWaiter {
    pattern: Regex,
    timeout: Duration,
    gate: Arc<watch::Sender<Gate>>,
}

impl ReadinessWaiter {
    /// Create a waiter for lines matching `pattern`, giving up after
    /// `timeout`. A zero timeout means "do not wait at all".
    pub fn new(pattern: &str, timeout: Duration) -> Result<Self, regex::Error> {
        let (gate, _) = watch::channel(Gate::Waiting);
        Ok(Self {
            pattern: Regex::new(pattern)?,
            timeout,
            gate: Arc::new(gate),
        })
    }

    /// Block until the pattern matches, the process exits first, or the
    /// timeout elapses. Safe to call after the gate has already settled;
    /// the settled outcome is returned immediately.
    pub async fn await_ready(&self) -> Result<(), ReadyError> {
        if self.timeout.is_zero() {
            return Ok(());
        }
        let mut rx = self.gate.subscribe();
        let settled = rx.wait_for(|gate| *gate != Gate::Waiting);
        let outcome = match tokio::time::timeout(self.timeout, settled).await {
            Ok(Ok(gate)) => *gate,
            // The sender lives inside self, so the channel cannot close
            // mid-wait; both failure arms mean the deadline passed. Latch
            // it so later calls fail fast until `reset()`.
            Ok(Err(_)) | Err(_) => {
                self.trip(Gate::TimedOut);
                Gate::TimedOut
            }
        };
        match outcome {
            Gate::Satisfied => Ok(()),
            Gate::ExitedEarly { exit_code } => Err(ReadyError::ExitedEarly {
                pattern: self.pattern.as_str().to_string(),
                exit_code,
            }),
            // wait_for only yields settled gates
            Gate::TimedOut | Gate::Waiting => Err(self.timeout_error()),
        }
    }

    /// Re-arm the gate for another readiness cycle on the same process,
    /// e.g. a dev server that reprints its banner after an automatic
    /// restart. Not meant to race an in-flight `await_ready()`.
    pub fn reset(&self) {
        self.gate.send_replace(Gate::Waiting);
    }

    /// True once a matching line has been observed in the current cycle.
    pub fn is_satisfied(&self) -> bool {
        *self.gate.borrow() == Gate::Satisfied
    }

    fn timeout_error(&self) -> ReadyError {
        ReadyError::Timeout {
            pattern: self.pattern.as_str().to_string(),
            timeout: self.timeout,
        }
    }

    fn trip(&self, next: Gate) {
        self.gate.send_if_modified(|gate| {
            if *gate == Gate::Waiting {
                *gate = next;
                true
            } else {
                false
            }
        });
    }
}

impl LineListener for ReadinessWaiter {
    fn on_line(&self, line: &str) {
        if *self.gate.borrow() == Gate::Waiting && self.pattern.is_match(line) {
            tracing::debug!(pattern = self.pattern.as_str(), line, "readiness pattern matched");
            self.trip(Gate::Satisfied);
        }
    }
}

impl ExitListener for ReadinessWaiter {
    fn on_exit(&self, exit_code: i32) {
        self.trip(Gate::ExitedEarly { exit_code });
    }
}

impl std::fmt::Debug for ReadinessWaiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadinessWaiter")
            .field("pattern", &self.pattern.as_str())
            .field("timeout", &self.timeout)
            .field("gate", &*self.gate.borrow())
            .finish()
    }
}

#[cfg(test)]
#[path = "readiness_tests.rs"]
mod tests;
