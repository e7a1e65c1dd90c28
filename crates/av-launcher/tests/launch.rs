//! End-to-end launch tests using stand-in interpreters, so no Python
//! installation is required. `true` and `false` accept and ignore the
//! rendered optimizer arguments.

use av_launcher::Launcher;
use av_types::{LaunchConfig, LaunchError};

#[tokio::test]
async fn zero_exit_is_relayed() {
    let record = Launcher::new()
        .with_interpreter("true")
        .launch(&LaunchConfig::default())
        .await
        .unwrap();

    assert!(record.success());
    assert_eq!(record.exit_code, 0);
    assert!(record.started_at.is_some());
    assert!(record.finished_at.is_some());
}

#[tokio::test]
async fn nonzero_exit_is_relayed_not_an_error() {
    let record = Launcher::new()
        .with_interpreter("false")
        .launch(&LaunchConfig::default())
        .await
        .unwrap();

    assert!(!record.success());
    assert_eq!(record.exit_code, 1);

    match record.into_result() {
        Err(LaunchError::Propagated { code: 1 }) => (),
        other => panic!("expected Propagated, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_interpreter_is_a_launch_failure() {
    let result = Launcher::new()
        .with_interpreter("definitely-not-a-real-python-interpreter")
        .launch(&LaunchConfig::default())
        .await;

    match result {
        Err(LaunchError::Spawn { program, .. }) => {
            assert_eq!(program, "definitely-not-a-real-python-interpreter");
        }
        other => panic!("expected Spawn error, got {other:?}"),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn timeout_kills_the_child() {
    use std::os::unix::fs::PermissionsExt;

    // A stand-in interpreter that ignores its arguments and hangs.
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("hang.sh");
    std::fs::write(&script, "#!/bin/sh\nsleep 30\n").unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

    let result = Launcher::new()
        .with_interpreter(script.to_str().unwrap())
        .with_timeout(std::time::Duration::from_millis(100))
        .launch(&LaunchConfig::default())
        .await;

    assert!(matches!(
        result,
        Err(LaunchError::TimedOut { timeout_secs: 0 })
    ));
}
