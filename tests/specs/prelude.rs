// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for the runner specs.

use corral_core::CommandSpec;
use std::sync::{Arc, Mutex};

/// A `sh -c` command for the given script.
pub fn sh(script: &str) -> CommandSpec {
    CommandSpec::new("sh").args(["-c", script])
}

/// Records every observation a test double makes, in arrival order.
#[derive(Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<TestEvent>>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TestEvent {
    Line(String),
    Exit(i32),
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_line(&self, line: &str) {
        self.events
            .lock()
            .unwrap()
            .push(TestEvent::Line(line.to_string()));
    }

    pub fn record_exit(&self, code: i32) {
        self.events.lock().unwrap().push(TestEvent::Exit(code));
    }

    pub fn events(&self) -> Vec<TestEvent> {
        self.events.lock().unwrap().clone()
    }
}
