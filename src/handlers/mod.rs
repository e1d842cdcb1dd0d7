//! Mode handlers. Each one wires the library pieces together for one CLI mode.

pub mod analyze;
pub mod check;
pub mod fix;
pub mod generate;
pub mod params;
pub mod run;

use anyhow::Result;
use pyfix::{analysis::Analyzer, config::Config, llm::LlmClient, repair::Repairer};

/// How results are rendered.
#[derive(Debug, Clone, Copy)]
pub struct OutputMode {
    pub json: bool,
    pub md: bool,
}

pub(crate) fn repairer(cfg: &Config) -> Result<Repairer<LlmClient>> {
    let client = LlmClient::from_config(cfg)?;
    Ok(Repairer::new(client, Analyzer::from_config(cfg)))
}
