//! Execute mode: inject inputs, run, classify. No repair.

use anyhow::Result;
use serde::Serialize;

use pyfix::{
    classify::{classify, Status, UserInputMap},
    config::Config,
    execution::Executor,
    params::inject,
};

use super::OutputMode;
use crate::printer::{print_json, print_verdict, TextPrinter};

#[derive(Debug, Serialize)]
struct ExecuteResponse {
    status: Status,
    output: String,
    success: bool,
    prepared_code: String,
}

pub async fn run(cfg: &Config, code: &str, inputs: &UserInputMap, mode: OutputMode) -> Result<()> {
    let prepared = inject(code, inputs);
    let result = Executor::from_config(cfg)
        .execute(&prepared, cfg.execution_timeout())
        .await;
    let verdict = classify(result.output(), inputs);

    if mode.json {
        return print_json(&ExecuteResponse {
            status: verdict.status,
            output: verdict.message,
            success: result.success,
            prepared_code: prepared,
        });
    }

    print_verdict(&verdict);
    if !inputs.is_empty() {
        TextPrinter { color: Some("cyan") }.print("Prepared code:");
        println!("{}", prepared.trim_end());
    }
    Ok(())
}
