// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Argv command description consumed by the runner.
//!
//! A `CommandSpec` carries everything the runner needs to spawn a tool: the
//! argv list, an environment overlay merged on top of the parent environment,
//! and an optional working directory. The argv is opaque here; the runner
//! rejects an empty one at spawn time.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// An argv-style command plus its spawn context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    argv: Vec<String>,
    /// Overlay entries in insertion order. Keys are unique; setting a key
    /// again replaces the earlier value (last write wins).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    env: Vec<(String, String)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cwd: Option<PathBuf>,
}

impl CommandSpec {
    /// Create a spec for a single program with no arguments yet.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            argv: vec![program.into()],
            env: Vec::new(),
            cwd: None,
        }
    }

    /// Create a spec from a complete argv list, e.g. one produced by the
    /// flag builders in [`crate::args`]. The list may be empty; the runner
    /// refuses to spawn it.
    pub fn from_argv(argv: Vec<String>) -> Self {
        Self {
            argv,
            env: Vec::new(),
            cwd: None,
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.argv.push(arg.into());
        self
    }

    /// Append a sequence of arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.argv.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the child, replacing any earlier
    /// overlay entry for the same key.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.env.retain(|(k, _)| *k != key);
        self.env.push((key, value.into()));
        self
    }

    /// Set several environment variables at once.
    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in vars {
            self = self.env(k, v);
        }
        self
    }

    /// Run the child in `dir` instead of inheriting the parent's cwd.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// The full argv, program first.
    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    /// The program, or `None` for an empty command.
    pub fn program(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    /// Environment overlay in insertion order.
    pub fn env_overlay(&self) -> &[(String, String)] {
        &self.env
    }

    /// Working directory override, if any.
    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// True when there is no program to run.
    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
