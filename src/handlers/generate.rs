use anyhow::{bail, Result};
use serde::Serialize;

use pyfix::config::Config;

use super::OutputMode;
use crate::printer::{print_code, print_json};

#[derive(Debug, Serialize)]
struct GenerateResponse {
    code: String,
}

pub async fn run(cfg: &Config, prompt: &str, mode: OutputMode) -> Result<()> {
    if prompt.trim().is_empty() {
        bail!("Provide a description after --generate");
    }
    let code = super::repairer(cfg)?.generate(prompt).await?;
    if mode.json {
        print_json(&GenerateResponse { code })
    } else {
        print_code(&code, mode.md);
        Ok(())
    }
}
