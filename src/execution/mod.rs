//! Execution engine: runs source text in a fresh interpreter and reports the outcome as data.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    process::{self, ProcessError, ProcessOutput},
};

pub mod deps;

pub use deps::{missing_modules, DependencyResolver};

pub const TIMEOUT_MESSAGE: &str = "Code execution timed out";

/// Why an execution attempt did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionFailure {
    Timeout,
    NonZeroExit,
    /// A module was missing and automatic installation is disabled.
    MissingDependency,
    Launch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub timed_out: bool,
    pub failure: Option<ExecutionFailure>,
}

impl ExecutionResult {
    fn completed(out: ProcessOutput) -> Self {
        let success = out.success();
        Self {
            success,
            failure: (!success).then_some(ExecutionFailure::NonZeroExit),
            stdout: out.stdout,
            stderr: out.stderr,
            exit_code: out.exit_code,
            timed_out: false,
        }
    }

    fn timed_out() -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: TIMEOUT_MESSAGE.to_string(),
            exit_code: -1,
            timed_out: true,
            failure: Some(ExecutionFailure::Timeout),
        }
    }

    fn launch_failed(message: String) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: message,
            exit_code: -1,
            timed_out: false,
            failure: Some(ExecutionFailure::Launch),
        }
    }

    /// stdout on success, otherwise the failure text.
    pub fn output(&self) -> &str {
        if self.success {
            &self.stdout
        } else {
            &self.stderr
        }
    }

    fn missing_module(&self) -> bool {
        !self.success && !self.timed_out && self.stderr.contains("ModuleNotFoundError")
    }
}

#[derive(Debug, Clone)]
pub struct Executor {
    interpreter: String,
    resolver: DependencyResolver,
    auto_install: bool,
}

impl Executor {
    pub fn new(interpreter: impl Into<String>, resolver: DependencyResolver) -> Self {
        Self {
            interpreter: interpreter.into(),
            resolver,
            auto_install: true,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self {
            interpreter: cfg.interpreter(),
            resolver: DependencyResolver::from_config(cfg),
            auto_install: cfg.get_bool("AUTO_INSTALL_MODULES"),
        }
    }

    pub fn with_auto_install(mut self, enabled: bool) -> Self {
        self.auto_install = enabled;
        self
    }

    /// Runs `code` via `<interpreter> -c`. Missing modules trigger one install pass and exactly
    /// one retry; the retried outcome is returned as-is.
    pub async fn execute(&self, code: &str, limit: Duration) -> ExecutionResult {
        let first = self.attempt(code, limit).await;
        if !first.missing_module() {
            return first;
        }

        if !self.auto_install {
            info!("missing module detected, automatic installation disabled");
            return ExecutionResult {
                failure: Some(ExecutionFailure::MissingDependency),
                ..first
            };
        }

        self.resolver.handle_missing_modules(&first.stderr).await;
        debug!("retrying execution after dependency resolution");
        self.attempt(code, limit).await
    }

    async fn attempt(&self, code: &str, limit: Duration) -> ExecutionResult {
        match process::run(&self.interpreter, ["-c", code], Some(limit)).await {
            Ok(out) => {
                debug!(exit_code = out.exit_code, "execution finished");
                ExecutionResult::completed(out)
            }
            Err(ProcessError::Timeout { limit, .. }) => {
                warn!(?limit, "code execution timed out");
                ExecutionResult::timed_out()
            }
            Err(e) => {
                warn!(error = %e, "could not run interpreter");
                ExecutionResult::launch_failed(e.to_string())
            }
        }
    }
}
