//! Spawn/wait/reap behaviour against real child processes.

mod common;

use std::error::Error;

use procyard::errors::ProcyardError;
use procyard::proc::{spawn, ExitKind, ProcessSet};

type TestResult = Result<(), Box<dyn Error>>;

#[tokio::test]
async fn wait_classifies_normal_exits() -> TestResult {
    common::init_tracing();

    let child = spawn("sh", ["-c", "exit 0"])?;
    assert_eq!(child.wait().await, ExitKind::Exited(0));

    let child = spawn("sh", ["-c", "exit 3"])?;
    assert_eq!(child.wait().await, ExitKind::Exited(3));

    Ok(())
}

#[tokio::test]
async fn wait_classifies_signal_termination() -> TestResult {
    common::init_tracing();

    let child = spawn("sh", ["-c", "kill -9 $$"])?;
    assert_eq!(child.wait().await, ExitKind::Signaled(9));

    Ok(())
}

#[tokio::test]
async fn failed_spawn_creates_no_process() {
    common::init_tracing();

    let err = spawn("/definitely/not/a/real/program", ["x"]).unwrap_err();
    assert!(matches!(err, ProcyardError::Spawn { .. }));
}

#[tokio::test]
async fn reap_any_follows_completion_order_not_spawn_order() -> TestResult {
    common::init_tracing();

    let mut set = ProcessSet::new();

    let slow = spawn("sh", ["-c", "sleep 0.4; exit 7"])?;
    let slow_pid = slow.pid();
    set.track(slow);

    let fast = spawn("sh", ["-c", "exit 0"])?;
    let fast_pid = fast.pid();
    set.track(fast);

    assert_eq!(set.outstanding(), 2);

    let first = set.reap_any().await.expect("two children outstanding");
    assert_eq!(first.pid, fast_pid);
    assert_eq!(first.status, ExitKind::Exited(0));

    let second = set.reap_any().await.expect("one child outstanding");
    assert_eq!(second.pid, slow_pid);
    assert_eq!(second.status, ExitKind::Exited(7));

    // NoMoreChildren: the set is fully drained.
    assert!(set.reap_any().await.is_none());
    assert!(set.is_empty());

    Ok(())
}

#[tokio::test]
async fn reap_any_on_an_empty_set_is_immediate() {
    common::init_tracing();

    let mut set = ProcessSet::new();
    assert!(set.reap_any().await.is_none());
}
