//! Analysis mode: syntax-tree summary and lint report, as fed to the repair prompt.

use anyhow::Result;

use pyfix::{analysis::Analyzer, config::Config, repair::NO_LINT_ISSUES};

use super::OutputMode;
use crate::printer::{print_json, TextPrinter};

pub async fn run(cfg: &Config, code: &str, mode: OutputMode) -> Result<()> {
    let summary = Analyzer::from_config(cfg).summarize(code).await;
    if mode.json {
        return print_json(&summary);
    }

    TextPrinter { color: Some("cyan") }.print("AST summary:");
    println!("{}", summary.ast);
    TextPrinter { color: Some("cyan") }.print("Lint report:");
    if summary.lint.is_empty() {
        println!("{}", NO_LINT_ISSUES);
    }
    for line in &summary.lint {
        println!("{}", line);
    }
    Ok(())
}
