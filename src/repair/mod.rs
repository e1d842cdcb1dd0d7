//! Repair and generation requests: prompt assembly, completion call, fence stripping.

use tracing::info;

use crate::{
    analysis::{AnalysisSummary, Analyzer},
    llm::{CompletionRequest, CompletionService, LlmError},
    role::{default_role_text, DefaultRole},
};

pub const NO_LINT_ISSUES: &str = "No issues reported by Pylint.";

/// Builds the user message for a repair request.
pub fn build_repair_prompt(code: &str, error_message: &str, analysis: &AnalysisSummary) -> String {
    let lint_text = if analysis.lint.is_empty() {
        NO_LINT_ISSUES.to_string()
    } else {
        analysis.lint.join("\n")
    };

    format!(
        "You are an AI programming assistant.

The following Python code has issues:

### Original Code:
{code}

### Runtime Error:
{error_message}

### AST Summary (code structure):
{ast}

### Pylint Warnings/Errors:
{lint_text}

Please fix the code so that it runs correctly. Only return valid Python code, no explanation. Wrap the code in triple backticks (```).
",
        ast = analysis.ast,
    )
}

/// Drops fence lines and right-trims the rest. Idempotent.
pub fn clean_response(text: &str) -> String {
    text.split('\n')
        .filter(|line| {
            let t = line.trim();
            !t.starts_with("```") && !t.ends_with("```")
        })
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct Repairer<C> {
    completion: C,
    analyzer: Analyzer,
}

impl<C: CompletionService> Repairer<C> {
    pub fn new(completion: C, analyzer: Analyzer) -> Self {
        Self { completion, analyzer }
    }

    /// Asks for a corrected version of `code`. Completion failures are passed through.
    pub async fn fix(&self, code: &str, error_message: &str) -> Result<String, LlmError> {
        let analysis = self.analyzer.summarize(code).await;
        let request = CompletionRequest {
            system: default_role_text(DefaultRole::Repair),
            user: build_repair_prompt(code, error_message, &analysis),
        };
        info!(lint_issues = analysis.lint.len(), "requesting fix");
        let raw = self.completion.complete(request).await?;
        Ok(clean_response(&raw))
    }

    /// Writes code for a natural-language description.
    pub async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request = CompletionRequest {
            system: default_role_text(DefaultRole::Generate),
            user: prompt.to_string(),
        };
        info!("requesting generated code");
        let raw = self.completion.complete(request).await?;
        Ok(clean_response(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AstSummary;

    fn summary(lint: Vec<String>) -> AnalysisSummary {
        AnalysisSummary {
            ast: AstSummary::Error { error: "SyntaxError: invalid syntax (line 1, column 7)".into() },
            lint,
        }
    }

    #[test]
    fn strips_fences() {
        assert_eq!(clean_response("```python\nprint(1)\n```"), "print(1)");
    }

    #[test]
    fn cleaning_is_idempotent() {
        let raw = "Here you go:\n```python\ndef f(x):   \n    return x\n```\n\n```\nprint(f(2))\n```  \n";
        let once = clean_response(raw);
        assert_eq!(clean_response(&once), once);
        assert_eq!(once, "Here you go:\ndef f(x):\n    return x\n\nprint(f(2))\n");
    }

    #[test]
    fn prompt_embeds_code_error_and_analysis() {
        let prompt = build_repair_prompt(
            "print((1)",
            "SyntaxError: '(' was never closed",
            &summary(vec!["t.py:1:0: C0114: Missing module docstring".into()]),
        );
        assert!(prompt.contains("### Original Code:\nprint((1)\n"));
        assert!(prompt.contains("### Runtime Error:\nSyntaxError: '(' was never closed\n"));
        assert!(prompt.contains(r#"{"error":"SyntaxError: invalid syntax (line 1, column 7)"}"#));
        assert!(prompt.contains("C0114: Missing module docstring"));
        assert!(!prompt.contains(NO_LINT_ISSUES));
    }

    #[test]
    fn prompt_reports_clean_lint() {
        let prompt = build_repair_prompt("x", "boom", &summary(Vec::new()));
        assert!(prompt.contains(&format!("### Pylint Warnings/Errors:\n{}\n", NO_LINT_ISSUES)));
    }
}
