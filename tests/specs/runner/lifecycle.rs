// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spawn, wait, and exit-notification behavior.

use crate::prelude::{sh, Recorder, TestEvent};
use corral_core::CommandSpec;
use corral_runner::{ProcessRunner, RunError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

#[tokio::test]
async fn exit_listener_fires_exactly_once_with_the_true_code() {
    let calls = Arc::new(AtomicUsize::new(0));
    let recorder = Recorder::new();

    let counted = Arc::clone(&calls);
    let recorded = recorder.clone();
    let runner = ProcessRunner::builder(sh("exit 23"))
        .on_exit(move |code: i32| {
            counted.fetch_add(1, Ordering::SeqCst);
            recorded.record_exit(code);
        })
        .build();

    let code = runner.run().await.unwrap();
    assert_eq!(code, 23);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(recorder.events(), [TestEvent::Exit(23)]);
}

#[tokio::test]
async fn exit_listener_fires_exactly_once_in_background_mode() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let runner = ProcessRunner::builder(sh("exit 5"))
        .on_exit(move |code: i32| {
            let _ = tx.send(code);
        })
        .build();

    runner.start().unwrap();

    let first = tokio::time::timeout(Duration::from_secs(10), rx.recv())
        .await
        .unwrap();
    assert_eq!(first, Some(5));

    // No second notification arrives.
    let second = tokio::time::timeout(Duration::from_millis(200), rx.recv()).await;
    assert!(second.is_err(), "got a second exit notification: {second:?}");
}

#[tokio::test]
async fn all_output_precedes_exit_notification() {
    let recorder = Recorder::new();

    let lines = recorder.clone();
    let exits = recorder.clone();
    let runner = ProcessRunner::builder(sh("echo L1; echo L2; echo L3; exit 4"))
        .on_stdout(move |line: &str| lines.record_line(line))
        .on_exit(move |code: i32| exits.record_exit(code))
        .build();

    runner.run().await.unwrap();

    assert_eq!(
        recorder.events(),
        [
            TestEvent::Line("L1".into()),
            TestEvent::Line("L2".into()),
            TestEvent::Line("L3".into()),
            TestEvent::Exit(4),
        ]
    );
}

#[tokio::test]
async fn unlistened_output_is_inherited_without_deadlock() {
    // > 64KB of stdout with no listeners registered: the stream is inherited
    // rather than piped, so nothing backs up even though nobody drains it.
    let runner = ProcessRunner::builder(sh("seq 1 20000")).build();
    let code = tokio::time::timeout(Duration::from_secs(30), runner.run())
        .await
        .expect("runner deadlocked on unlistened output")
        .unwrap();
    assert_eq!(code, 0);
}

#[tokio::test]
async fn background_start_returns_before_the_process_exits() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let runner = ProcessRunner::builder(sh("sleep 2; exit 0"))
        .on_exit(move |code: i32| {
            let _ = tx.send(code);
        })
        .build();

    let started = Instant::now();
    let handle = runner.start().unwrap();
    let returned_after = started.elapsed();
    assert!(
        returned_after < Duration::from_millis(500),
        "start() blocked for {returned_after:?}"
    );
    assert!(handle.id().is_some());

    let code = tokio::time::timeout(Duration::from_secs(10), rx.recv())
        .await
        .unwrap();
    assert_eq!(code, Some(0));
    assert!(started.elapsed() >= Duration::from_secs(2));
}

#[tokio::test]
async fn empty_command_fails_without_spawning() {
    let started = Arc::new(AtomicUsize::new(0));

    let counted = Arc::clone(&started);
    let runner = ProcessRunner::builder(CommandSpec::from_argv(vec![]))
        .on_start(move |_process: &corral_runner::ProcessHandle| {
            counted.fetch_add(1, Ordering::SeqCst);
        })
        .build();

    assert!(matches!(runner.run().await, Err(RunError::EmptyCommand)));
    assert_eq!(started.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn spawn_failure_surfaces_the_program_name() {
    let runner = ProcessRunner::builder(CommandSpec::new("/no/such/tool")).build();
    let err = runner.run().await.unwrap_err();
    assert!(err.to_string().contains("/no/such/tool"), "got: {err}");
}
