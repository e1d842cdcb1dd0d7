//! Lint diagnostics from an external tool run on a scratch copy of the code.

use std::{ffi::OsString, io::Write, path::Path, time::Duration};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::{config::Config, process};

const LINT_FLAGS: [&str; 2] = ["--disable=all", "--enable=E,W,C,R"];

#[derive(Debug, Clone)]
pub struct Linter {
    command: Vec<String>,
    timeout: Option<Duration>,
}

impl Linter {
    pub fn new(command: Vec<String>, timeout: Option<Duration>) -> Self {
        Self { command, timeout }
    }

    pub fn from_config(cfg: &Config) -> Self {
        let command = cfg
            .get("LINT_COMMAND")
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        Self::new(command, cfg.lint_timeout())
    }

    fn tool_name(&self) -> String {
        self.command
            .first()
            .and_then(|p| Path::new(p).file_stem())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "lint".to_string())
    }

    /// Diagnostic lines (those containing `:`). Failures become a single descriptive line.
    pub async fn lint_summary(&self, code: &str) -> Vec<String> {
        match self.run(code).await {
            Ok(lines) => lines,
            Err(e) => {
                warn!(error = %format!("{:#}", e), "lint run failed");
                vec![format!("{} error: {:#}", self.tool_name(), e)]
            }
        }
    }

    async fn run(&self, code: &str) -> Result<Vec<String>> {
        let (program, prefix) = self
            .command
            .split_first()
            .context("no lint command configured")?;

        // Removed when dropped, on every return path.
        let mut file = tempfile::Builder::new()
            .prefix("pyfix-")
            .suffix(".py")
            .tempfile()
            .context("creating temporary source file")?;
        file.write_all(code.as_bytes())
            .and_then(|_| file.flush())
            .context("writing temporary source file")?;

        let mut args: Vec<OsString> = prefix.iter().map(OsString::from).collect();
        args.push(file.path().as_os_str().to_owned());
        args.extend(LINT_FLAGS.iter().map(OsString::from));

        debug!(path = %file.path().display(), "running lint");
        let out = process::run(program, args, self.timeout).await?;

        Ok(out
            .stdout
            .lines()
            .filter(|line| line.contains(':'))
            .map(str::to_string)
            .collect())
    }
}
