use anyhow::{bail, Result};
use clap::{ArgGroup, Parser};

use crate::utils::parse_input_pair;

#[derive(Parser, Debug, Clone)]
#[command(name = "pyfix", about = "Run Python code and let an LLM repair it when it fails", version)]
#[command(group(ArgGroup::new("mode").args(["run", "fix", "analyze", "params", "generate"]).multiple(false)))]
#[command(group(ArgGroup::new("md_switch").args(["md", "no_md"]).multiple(false)))]
pub struct Cli {
    /// Python source file. Reads stdin when omitted.
    #[arg(value_name = "FILE")]
    pub file: Option<String>,

    /// Execute and classify only; never ask for a fix.
    #[arg(short = 'r', long)]
    pub run: bool,

    /// Repair the code given the error message it produced.
    #[arg(short = 'f', long, value_name = "ERROR")]
    pub fix: Option<String>,

    /// Print the syntax-tree summary and lint report.
    #[arg(short = 'a', long)]
    pub analyze: bool,

    /// List function parameter names found in the code.
    #[arg(short = 'p', long)]
    pub params: bool,

    /// Generate code from a description instead of reading a file.
    #[arg(short = 'g', long, value_name = "PROMPT")]
    pub generate: Option<String>,

    /// Value substituted into the code before running: NAME=VALUE.
    /// Can be used multiple times: --input path=data.csv --input n=3
    #[arg(short = 'i', long = "input", value_name = "NAME=VALUE", value_parser = parse_input_pair, action = clap::ArgAction::Append)]
    pub inputs: Vec<(String, String)>,

    /// Prompt for a value for every parameter found in the code.
    #[arg(long)]
    pub ask: bool,

    /// Execution timeout in seconds.
    #[arg(short = 't', long, value_parser = clap::value_parser!(f64))]
    pub timeout: Option<f64>,

    /// Large language model to use.
    #[arg(long)]
    pub model: Option<String>,

    /// Python interpreter used to run the code.
    #[arg(long)]
    pub interpreter: Option<String>,

    /// Do not install missing modules before retrying.
    #[arg(long = "no-install")]
    pub no_install: bool,

    /// Print machine-readable JSON instead of formatted text.
    #[arg(long)]
    pub json: bool,

    /// Render code as Markdown.
    #[arg(long)]
    pub md: bool,
    /// Print code as plain text.
    #[arg(long = "no-md")]
    pub no_md: bool,

    /// Verbose logging (debug level).
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Rejects flag combinations that would read the source and the answers from one stream.
    pub fn check_stdin_usage(&self) -> Result<()> {
        if self.ask && self.file.is_none() {
            bail!("--ask cannot be used with stdin input; pass a FILE");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_are_exclusive() {
        assert!(Cli::try_parse_from(["pyfix", "a.py", "--run", "--analyze"]).is_err());
        let cli = Cli::try_parse_from(["pyfix", "a.py", "--fix", "NameError: x"]).unwrap();
        assert_eq!(cli.fix.as_deref(), Some("NameError: x"));
    }

    #[test]
    fn ask_needs_a_file() {
        let cli = Cli::try_parse_from(["pyfix", "--ask"]).unwrap();
        let err = cli.check_stdin_usage().unwrap_err();
        assert!(err.to_string().contains("--ask cannot be used with stdin input"), "{err}");

        let cli = Cli::try_parse_from(["pyfix", "a.py", "--ask"]).unwrap();
        assert!(cli.check_stdin_usage().is_ok());
    }

    #[test]
    fn repeated_inputs() {
        let cli = Cli::try_parse_from(["pyfix", "a.py", "-r", "-i", "a=1", "--input", "b="]).unwrap();
        assert_eq!(
            cli.inputs,
            vec![("a".to_string(), "1".to_string()), ("b".to_string(), String::new())]
        );
    }
}
