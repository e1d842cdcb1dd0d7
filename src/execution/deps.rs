//! Missing-module detection and installation.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{info, warn};

use crate::{config::Config, process};

fn module_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"module named '([A-Za-z_][A-Za-z0-9_.]*)'").expect("static regex")
    })
}

/// Top-level package names mentioned as missing in `stderr`, first-seen order, deduplicated.
pub fn missing_modules(stderr: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in module_pattern().captures_iter(stderr) {
        let full = &caps[1];
        let top = full.split('.').next().unwrap_or(full);
        if !top.is_empty() && !names.iter().any(|n| n == top) {
            names.push(top.to_string());
        }
    }
    names
}

#[derive(Debug, Clone)]
pub struct DependencyResolver {
    manager: Vec<String>,
}

impl DependencyResolver {
    pub fn new(manager: Vec<String>) -> Self {
        Self { manager }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.package_manager())
    }

    /// Runs `<manager> install <name>` to completion. Never fails; the result is reported.
    pub async fn install_module(&self, name: &str) -> bool {
        let Some((program, prefix)) = self.manager.split_first() else {
            warn!(module = name, "no package manager configured");
            return false;
        };
        info!(module = name, "installing module");

        let args = prefix
            .iter()
            .map(String::as_str)
            .chain(["install", name]);
        match process::run(program, args, None).await {
            Ok(out) if out.success() => {
                info!(module = name, "installed module");
                true
            }
            Ok(out) => {
                warn!(module = name, stderr = %out.stderr.trim(), "failed to install module");
                false
            }
            Err(e) => {
                warn!(module = name, error = %e, "failed to install module");
                false
            }
        }
    }

    /// Detects missing modules in `stderr` and attempts one install of each.
    /// Returns the names that were attempted.
    pub async fn handle_missing_modules(&self, stderr: &str) -> Vec<String> {
        let modules = missing_modules(stderr);
        if modules.is_empty() {
            info!("no missing modules detected");
            return modules;
        }
        info!(modules = %modules.join(", "), "detected missing modules");
        for module in &modules {
            self.install_module(module).await;
        }
        modules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_unique_names_in_order() {
        let stderr = "Traceback (most recent call last):\n  File \"<string>\", line 1\n\
            ModuleNotFoundError: No module named 'numpy'\n\
            ModuleNotFoundError: No module named 'yaml'\n\
            ModuleNotFoundError: No module named 'numpy'\n";
        assert_eq!(missing_modules(stderr), vec!["numpy", "yaml"]);
    }

    #[test]
    fn dotted_names_resolve_to_top_level_package() {
        let stderr = "ModuleNotFoundError: No module named 'google.protobuf'";
        assert_eq!(missing_modules(stderr), vec!["google"]);
    }

    #[test]
    fn nothing_to_extract() {
        assert!(missing_modules("NameError: name 'x' is not defined").is_empty());
    }

    #[tokio::test]
    async fn empty_manager_reports_failure() {
        let resolver = DependencyResolver::new(Vec::new());
        assert!(!resolver.install_module("requests").await);
    }
}
