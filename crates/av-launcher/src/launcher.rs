//! Spawning and supervising a single optimizer process.

use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::process::Command;
use tracing::{info, warn};
use uuid::Uuid;

use av_types::{is_registered, LaunchConfig, LaunchError};

use crate::command::{Invocation, DEFAULT_INTERPRETER, OPTIMIZER_ENTRY_POINT};

/// Turns a validated [`LaunchConfig`] into one child process and relays
/// its outcome. Owns the child handle for the whole launch.
#[derive(Debug, Clone)]
pub struct Launcher {
    interpreter: String,
    entry_point: String,

    /// Kill the child after this long. Added behavior beyond the original
    /// launcher script, which waited indefinitely; off unless set.
    timeout: Option<Duration>,
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Launcher {
    pub fn new() -> Self {
        Self {
            interpreter: DEFAULT_INTERPRETER.to_string(),
            entry_point: OPTIMIZER_ENTRY_POINT.to_string(),
            timeout: None,
        }
    }

    pub fn with_interpreter(mut self, interpreter: &str) -> Self {
        self.interpreter = interpreter.to_string();
        self
    }

    pub fn with_entry_point(mut self, entry_point: &str) -> Self {
        self.entry_point = entry_point.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate, spawn, and wait for one optimizer run.
    ///
    /// A child that starts and exits non-zero is a successful launch; the
    /// exit code is recorded on the returned [`LaunchRecord`] for the
    /// caller to relay. Only failure to start, wait on, or (when a timeout
    /// is configured) finish in time is an error here.
    pub async fn launch(&self, config: &LaunchConfig) -> Result<LaunchRecord, LaunchError> {
        config.validate()?;
        for (role, model) in [
            ("agent_llm", &config.agent_llm),
            ("api_func_llm", &config.api_func_llm),
        ] {
            if !is_registered(model) {
                warn!("{role} '{model}' is not a registered model; the optimizer may reject it");
            }
        }

        let invocation = Invocation::with_program(&self.interpreter, &self.entry_point, config);
        let mut record = LaunchRecord::new(config.clone());

        info!(
            launch_id = %record.id,
            program = %invocation.program,
            args = ?invocation.args,
            devices = %invocation.env[0].1,
            "Launching optimizer"
        );

        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .envs(invocation.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: invocation.program.clone(),
                source,
            })?;
        record.mark_running();

        let status = match self.timeout {
            None => child.wait().await.map_err(LaunchError::Wait)?,
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(waited) => waited.map_err(LaunchError::Wait)?,
                Err(_) => {
                    let _ = child.kill().await;
                    warn!(launch_id = %record.id, "Optimizer timed out; child killed");
                    return Err(LaunchError::TimedOut {
                        timeout_secs: limit.as_secs(),
                    });
                }
            },
        };

        record.mark_exited(status);
        info!(
            launch_id = %record.id,
            code = record.exit_code,
            "Optimizer finished"
        );
        Ok(record)
    }
}

/// Map an exit status to the code the operator's shell should see:
/// the child's own code, or 128 + signal number if it died to a signal.
pub fn relay_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}

/// Lifecycle state of one launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchState {
    Pending,
    Running,
    Exited,
}

/// In-memory bookkeeping for a single invocation.
#[derive(Debug, Clone)]
pub struct LaunchRecord {
    pub id: Uuid,
    pub config: LaunchConfig,
    pub state: LaunchState,
    pub exit_code: i32,
    pub created_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl LaunchRecord {
    pub fn new(config: LaunchConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            config,
            state: LaunchState::Pending,
            exit_code: 0,
            created_at: Utc::now(),
            started_at: None,
            finished_at: None,
        }
    }

    pub fn mark_running(&mut self) {
        self.state = LaunchState::Running;
        self.started_at = Some(Utc::now());
    }

    pub fn mark_exited(&mut self, status: ExitStatus) {
        self.state = LaunchState::Exited;
        self.finished_at = Some(Utc::now());
        self.exit_code = relay_code(status);
    }

    pub fn success(&self) -> bool {
        self.state == LaunchState::Exited && self.exit_code == 0
    }

    /// Fold a non-zero exit into the error taxonomy for callers that treat
    /// optimizer failure as their own.
    pub fn into_result(self) -> Result<Self, LaunchError> {
        if self.success() {
            Ok(self)
        } else {
            Err(LaunchError::Propagated {
                code: self.exit_code,
            })
        }
    }
}
