// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process supervisor: spawn, drain, notify.
//!
//! One supervisor type covers both execution modes. `run()` drives the whole
//! lifecycle on the calling task; `start()` hands the identical lifecycle to
//! a background task and returns a handle immediately. Either way the
//! sequence is: spawn → attach drainers → fire start listeners → await exit →
//! join drainers → fire exit listeners, so exit notification is delivered
//! exactly once and never before the last output line.

use crate::drain::spawn_drainer;
use crate::error::RunError;
use crate::listener::{ExitListener, LineListener, StartListener};
use crate::readiness::ReadinessWaiter;
use corral_core::{exit_code, CommandSpec};
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::{Child, Command};
use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// Cloneable handle to a spawned process.
///
/// The runner keeps exclusive ownership of the OS child; the handle exposes
/// the pid and a way to request forcible termination. Termination closes the
/// child's pipes, which unwinds the drainers and lets exit notification
/// proceed as usual.
#[derive(Clone, Debug)]
pub struct ProcessHandle {
    pid: Option<u32>,
    kill: Arc<Notify>,
}

impl ProcessHandle {
    /// OS process id, if the child is still identifiable.
    pub fn id(&self) -> Option<u32> {
        self.pid
    }

    /// Ask the runner to forcibly terminate the process. Idempotent; has no
    /// effect once the process has exited.
    pub fn terminate(&self) {
        self.kill.notify_one();
    }
}

/// Builder for a [`ProcessRunner`]. Listener registries are ordered and
/// frozen by [`build`](Self::build); they cannot change once a run starts.
pub struct ProcessRunnerBuilder {
    spec: CommandSpec,
    stdout: Vec<Arc<dyn LineListener>>,
    stderr: Vec<Arc<dyn LineListener>>,
    start: Vec<Arc<dyn StartListener>>,
    exit: Vec<Arc<dyn ExitListener>>,
}

impl ProcessRunnerBuilder {
    fn new(spec: CommandSpec) -> Self {
        Self {
            spec,
            stdout: Vec::new(),
            stderr: Vec::new(),
            start: Vec::new(),
            exit: Vec::new(),
        }
    }

    /// Register a listener for stdout lines.
    pub fn on_stdout(mut self, listener: impl LineListener + 'static) -> Self {
        self.stdout.push(Arc::new(listener));
        self
    }

    /// Register a listener for stderr lines.
    pub fn on_stderr(mut self, listener: impl LineListener + 'static) -> Self {
        self.stderr.push(Arc::new(listener));
        self
    }

    /// Register one listener for both stdout and stderr lines.
    pub fn on_output(mut self, listener: impl LineListener + 'static) -> Self {
        let listener: Arc<dyn LineListener> = Arc::new(listener);
        self.stdout.push(Arc::clone(&listener));
        self.stderr.push(listener);
        self
    }

    /// Register a listener fired once, right after the child is spawned.
    pub fn on_start(mut self, listener: impl StartListener + 'static) -> Self {
        self.start.push(Arc::new(listener));
        self
    }

    /// Register a listener fired exactly once with the final exit code.
    pub fn on_exit(mut self, listener: impl ExitListener + 'static) -> Self {
        self.exit.push(Arc::new(listener));
        self
    }

    /// Attach a readiness waiter to stdout, stderr, and exit notification.
    /// The caller keeps their own clone and calls `await_ready()` on it.
    pub fn ready_when(self, waiter: &ReadinessWaiter) -> Self {
        let on_lines = waiter.clone();
        let on_exit = waiter.clone();
        self.on_output(on_lines).on_exit(on_exit)
    }

    /// Freeze the registries and produce the runner.
    pub fn build(self) -> ProcessRunner {
        ProcessRunner {
            spec: self.spec,
            stdout: self.stdout.into(),
            stderr: self.stderr.into(),
            start: self.start.into(),
            exit: self.exit.into(),
        }
    }
}

/// Spawns and supervises one external process per invocation.
///
/// The runner itself is reusable: each `run()`/`start()` call spawns a fresh
/// process against the same frozen configuration.
pub struct ProcessRunner {
    spec: CommandSpec,
    stdout: Arc<[Arc<dyn LineListener>]>,
    stderr: Arc<[Arc<dyn LineListener>]>,
    start: Arc<[Arc<dyn StartListener>]>,
    exit: Arc<[Arc<dyn ExitListener>]>,
}

/// A freshly spawned child with its drainers attached, ready to supervise.
struct Launched {
    program: String,
    child: Child,
    drains: Vec<JoinHandle<()>>,
    handle: ProcessHandle,
}

impl ProcessRunner {
    /// Start configuring a runner for `spec`.
    pub fn builder(spec: CommandSpec) -> ProcessRunnerBuilder {
        ProcessRunnerBuilder::new(spec)
    }

    /// Run the command and wait for it to exit, then return the exit code.
    ///
    /// The code is returned (and delivered to exit listeners) verbatim;
    /// non-zero is not an error at this layer.
    pub async fn run(&self) -> Result<i32, RunError> {
        let launched = self.launch()?;
        supervise(launched, Arc::clone(&self.exit)).await
    }

    /// Spawn the command and return immediately; a background task carries
    /// the wait/join/notify sequence to completion.
    pub fn start(&self) -> Result<ProcessHandle, RunError> {
        let launched = self.launch()?;
        let handle = launched.handle.clone();
        let exit = Arc::clone(&self.exit);
        tokio::spawn(async move {
            if let Err(error) = supervise(launched, exit).await {
                tracing::warn!(%error, "background supervision failed");
            }
        });
        Ok(handle)
    }

    fn launch(&self) -> Result<Launched, RunError> {
        let program = self.spec.program().ok_or(RunError::EmptyCommand)?.to_string();

        let mut cmd = base_command(&program, &self.spec.argv()[1..]);
        if let Some(cwd) = self.spec.cwd() {
            cmd.current_dir(cwd);
        }
        for (key, value) in self.spec.env_overlay() {
            cmd.env(key, value);
        }
        // A stream nobody listens to is inherited, not piped: no drainer
        // task, and the child writes straight to the parent's stream.
        cmd.stdout(stdio_for(&self.stdout));
        cmd.stderr(stdio_for(&self.stderr));
        // The child never outlives the owning task, even on panic or
        // cancellation; this stands in for the original's shutdown hook.
        cmd.kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|source| RunError::Spawn {
            program: program.clone(),
            source,
        })?;
        tracing::debug!(program, pid = child.id(), "process spawned");

        let mut drains = Vec::new();
        if let Some(stdout) = child.stdout.take() {
            drains.push(spawn_drainer(stdout, Arc::clone(&self.stdout), "stdout"));
        }
        if let Some(stderr) = child.stderr.take() {
            drains.push(spawn_drainer(stderr, Arc::clone(&self.stderr), "stderr"));
        }

        let handle = ProcessHandle {
            pid: child.id(),
            kill: Arc::new(Notify::new()),
        };
        for listener in self.start.iter() {
            listener.on_start(&handle);
        }

        Ok(Launched {
            program,
            child,
            drains,
            handle,
        })
    }
}

/// Wait for exit, join the drainers, notify exit listeners once.
async fn supervise(
    launched: Launched,
    exit_listeners: Arc<[Arc<dyn ExitListener>]>,
) -> Result<i32, RunError> {
    let Launched {
        program,
        mut child,
        drains,
        handle,
    } = launched;

    let status = loop {
        let waited = tokio::select! {
            result = child.wait() => Some(result),
            _ = handle.kill.notified() => None,
        };
        match waited {
            Some(Ok(status)) => break status,
            Some(Err(source)) => {
                // Best effort: don't leave the child running behind a
                // failed wait.
                let _ = child.start_kill();
                return Err(RunError::Wait { program, source });
            }
            None => {
                tracing::debug!(program, "termination requested");
                let _ = child.start_kill();
            }
        }
    };

    // Drainers end at pipe end-of-stream; joining them here guarantees no
    // line is dropped before exit notification fires.
    for drain in drains {
        let _ = drain.await;
    }

    let code = exit_code(status);
    tracing::debug!(program, code, "process exited");
    for listener in exit_listeners.iter() {
        listener.on_exit(code);
    }
    Ok(code)
}

fn stdio_for(listeners: &[Arc<dyn LineListener>]) -> Stdio {
    if listeners.is_empty() {
        Stdio::inherit()
    } else {
        Stdio::piped()
    }
}

/// Build the base command. On Windows the wrapped tools must be launched
/// through the system shell, so the argv is prefixed with `cmd /c`.
fn base_command(program: &str, args: &[String]) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.arg("/c").arg(program);
        cmd.args(args);
        cmd
    } else {
        let mut cmd = Command::new(program);
        cmd.args(args);
        cmd
    }
}

#[cfg(test)]
#[path = "supervisor_tests.rs"]
mod tests;
