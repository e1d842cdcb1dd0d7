//! Default mode: run the code, and if it fails show an AI-corrected version.

use anyhow::{bail, Result};
use serde::Serialize;

use pyfix::{
    classify::{classify, hint, Status, UserInputMap},
    config::Config,
    execution::Executor,
};

use super::OutputMode;
use crate::printer::{print_code, print_json, TextPrinter};

#[derive(Debug, Serialize)]
struct CheckResponse {
    status: Status,
    output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fixed_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hint: Option<&'static str>,
}

pub async fn run(cfg: &Config, code: &str, mode: OutputMode) -> Result<()> {
    if code.trim().is_empty() {
        bail!("Please provide some code first.");
    }

    let result = Executor::from_config(cfg)
        .execute(code, cfg.execution_timeout())
        .await;
    let verdict = classify(result.output(), &UserInputMap::new());

    if verdict.is_success() {
        if mode.json {
            return print_json(&CheckResponse {
                status: verdict.status,
                output: verdict.message,
                fixed_code: None,
                hint: None,
            });
        }
        TextPrinter { color: Some("green") }.print("Good job! There aren't any mistakes.");
        println!("{}", verdict.message.trim_end());
        return Ok(());
    }

    let fixed = super::repairer(cfg)?.fix(code, &verdict.message).await?;
    let hint = hint(result.output());

    if mode.json {
        return print_json(&CheckResponse {
            status: verdict.status,
            output: verdict.message,
            fixed_code: Some(fixed),
            hint: Some(hint),
        });
    }
    TextPrinter { color: Some("red") }.print("Error detected. Here's the corrected version:");
    print_code(&fixed, mode.md);
    TextPrinter { color: Some("yellow") }.print(hint);
    TextPrinter { color: Some("cyan") }.print("AI has attempted to fix the issue based on analysis.");
    Ok(())
}
