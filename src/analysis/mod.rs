//! Static analysis consumed by the repair prompt: syntax-tree summary and lint diagnostics.

use serde::Serialize;

use crate::config::Config;

pub mod ast;
pub mod lint;

pub use ast::{ast_summary, AstSummary, SyntaxChecker};
pub use lint::Linter;

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    #[serde(rename = "ast_summary")]
    pub ast: AstSummary,
    #[serde(rename = "pylint_report")]
    pub lint: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Analyzer {
    checker: SyntaxChecker,
    linter: Linter,
}

impl Analyzer {
    pub fn new(checker: SyntaxChecker, linter: Linter) -> Self {
        Self { checker, linter }
    }

    pub fn from_config(cfg: &Config) -> Self {
        let checker = SyntaxChecker::new(cfg.interpreter(), Some(cfg.execution_timeout()));
        Self::new(checker, Linter::from_config(cfg))
    }

    pub async fn summarize(&self, code: &str) -> AnalysisSummary {
        AnalysisSummary {
            ast: self.checker.summarize(code).await,
            lint: self.linter.lint_summary(code).await,
        }
    }
}
