// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exit status normalization.

use std::process::ExitStatus;

/// Map an OS exit status to the integer delivered to exit listeners.
///
/// A process killed by a signal has no exit code of its own; following shell
/// convention it reports `128 + signal` instead. `-1` is the fallback when
/// the platform reports neither a code nor a signal.
pub fn exit_code(status: ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    status.code().unwrap_or(-1)
}

#[cfg(test)]
#[path = "exit_tests.rs"]
mod tests;
