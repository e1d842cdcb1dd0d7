//! Child process launch with captured output and an optional wall-clock bound.

use std::{process::Stdio, time::Duration};

use thiserror::Error;
use tokio::{process::Command, time::timeout};
use tracing::debug;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{program}` timed out after {limit:?}")]
    Timeout { program: String, limit: Duration },
    #[error("failed waiting for `{program}`: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Captured output of a finished child.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run `program args...` with stdin closed. The child is killed when `limit` elapses.
pub async fn run<I, S>(program: &str, args: I, limit: Option<Duration>) -> Result<ProcessOutput, ProcessError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = cmd.spawn().map_err(|source| ProcessError::Launch {
        program: program.to_string(),
        source,
    })?;
    debug!(program, pid = ?child.id(), "spawned child process");

    let waited = match limit {
        Some(limit) => timeout(limit, child.wait_with_output())
            .await
            .map_err(|_| ProcessError::Timeout {
                program: program.to_string(),
                limit,
            })?,
        None => child.wait_with_output().await,
    };
    let out = waited.map_err(|source| ProcessError::Wait {
        program: program.to_string(),
        source,
    })?;

    Ok(ProcessOutput {
        exit_code: out.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn captures_streams_and_exit_code() {
        let out = run("sh", ["-c", "echo out; echo err >&2; exit 3"], None)
            .await
            .unwrap();
        assert_eq!(out.exit_code, 3);
        assert_eq!(out.stdout, "out\n");
        assert_eq!(out.stderr, "err\n");
        assert!(!out.success());
    }

    #[tokio::test]
    async fn times_out() {
        let err = run("sh", ["-c", "sleep 5"], Some(Duration::from_millis(200)))
            .await
            .unwrap_err();
        assert!(matches!(err, ProcessError::Timeout { .. }));
    }

    #[tokio::test]
    async fn missing_program_is_launch_error() {
        let err = run("pyfix-no-such-program", Vec::<String>::new(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ProcessError::Launch { .. }));
        assert!(err.to_string().contains("pyfix-no-such-program"));
    }
}
