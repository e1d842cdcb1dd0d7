use anyhow::Result;
use serde::Serialize;

use pyfix::config::Config;

use super::OutputMode;
use crate::printer::{print_code, print_json};

#[derive(Debug, Serialize)]
struct FixResponse {
    fixed_code: String,
}

pub async fn run(cfg: &Config, code: &str, error_message: &str, mode: OutputMode) -> Result<()> {
    let fixed = super::repairer(cfg)?.fix(code, error_message).await?;
    if mode.json {
        print_json(&FixResponse { fixed_code: fixed })
    } else {
        print_code(&fixed, mode.md);
        Ok(())
    }
}
