// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stream drainer: one task per captured pipe.
//!
//! Each captured stream gets its own task so stdout and stderr never deadlock
//! each other when both pipe buffers fill. The task reads until end-of-stream
//! (which follows process exit once the pipe closes) and terminates normally;
//! read errors stop the drain but are never surfaced to the caller.

use crate::listener::LineListener;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;

/// Spawn a task that reads `stream` line by line and fans each line out to
/// `listeners` in registration order. Lines are decoded as UTF-8 (lossily)
/// with the trailing newline stripped; a final unterminated line is still
/// delivered.
pub(crate) fn spawn_drainer<R>(
    stream: R,
    listeners: Arc<[Arc<dyn LineListener>]>,
    stream_name: &'static str,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut reader = BufReader::new(stream);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf).await {
                Ok(0) => {
                    tracing::trace!(stream = stream_name, "end of stream");
                    break;
                }
                Ok(_) => {
                    let decoded = String::from_utf8_lossy(&buf);
                    // Strip one trailing `\n`, then at most one `\r`; any
                    // further `\r` is content.
                    let line = decoded.strip_suffix('\n').unwrap_or(&decoded);
                    let line = line.strip_suffix('\r').unwrap_or(line);
                    for listener in listeners.iter() {
                        listener.on_line(line);
                    }
                }
                Err(error) => {
                    tracing::debug!(stream = stream_name, %error, "stream read failed");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
#[path = "drain_tests.rs"]
mod tests;
