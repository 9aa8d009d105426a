// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Readiness detection against live processes.

use crate::prelude::sh;
use corral_runner::{ProcessRunner, ReadinessWaiter, ReadyError};
use std::time::{Duration, Instant};

#[tokio::test]
async fn await_ready_returns_when_the_banner_appears() {
    let waiter = ReadinessWaiter::new(".*running.*", Duration::from_secs(5)).unwrap();
    let runner = ProcessRunner::builder(sh(
        "echo 'starting...'; echo 'Server is now running'; sleep 3",
    ))
    .ready_when(&waiter)
    .build();

    let started = Instant::now();
    let handle = runner.start().unwrap();
    waiter.await_ready().await.unwrap();

    // Resolved by the banner, well before the timeout and before exit.
    assert!(started.elapsed() < Duration::from_secs(5));
    handle.terminate();
}

#[tokio::test]
async fn await_ready_times_out_when_no_banner_appears() {
    let waiter = ReadinessWaiter::new("never printed", Duration::from_secs(1)).unwrap();
    let runner = ProcessRunner::builder(sh("echo warming up; sleep 10"))
        .ready_when(&waiter)
        .build();

    let started = Instant::now();
    let handle = runner.start().unwrap();
    let err = waiter.await_ready().await.unwrap_err();
    let elapsed = started.elapsed();

    assert!(matches!(err, ReadyError::Timeout { .. }), "got: {err}");
    assert!(elapsed >= Duration::from_secs(1));
    assert!(elapsed < Duration::from_secs(5), "took {elapsed:?}");
    handle.terminate();
}

#[tokio::test]
async fn early_exit_beats_a_long_timeout() {
    let waiter = ReadinessWaiter::new("ready", Duration::from_secs(60)).unwrap();
    let runner = ProcessRunner::builder(sh("echo failed to bind port >&2; exit 1"))
        .ready_when(&waiter)
        .build();

    let started = Instant::now();
    runner.start().unwrap();
    let err = waiter.await_ready().await.unwrap_err();

    match err {
        ReadyError::ExitedEarly { exit_code, .. } => assert_eq!(exit_code, 1),
        other => panic!("expected ExitedEarly, got: {other}"),
    }
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn banner_on_stderr_also_satisfies_the_waiter() {
    let waiter = ReadinessWaiter::new("listening on", Duration::from_secs(5)).unwrap();
    let runner = ProcessRunner::builder(sh("echo 'listening on 8080' >&2; sleep 3"))
        .ready_when(&waiter)
        .build();

    let handle = runner.start().unwrap();
    waiter.await_ready().await.unwrap();
    handle.terminate();
}

#[tokio::test]
async fn zero_timeout_skips_waiting_entirely() {
    let waiter = ReadinessWaiter::new("anything", Duration::ZERO).unwrap();
    let runner = ProcessRunner::builder(sh("sleep 3"))
        .ready_when(&waiter)
        .build();

    let started = Instant::now();
    let handle = runner.start().unwrap();
    waiter.await_ready().await.unwrap();
    assert!(started.elapsed() < Duration::from_millis(500));
    handle.terminate();
}
