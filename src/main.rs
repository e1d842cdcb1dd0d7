mod cli;
mod handlers;
mod printer;
mod utils;

use anyhow::Result;
use handlers::OutputMode;
use pyfix::{classify::UserInputMap, config::Config, params::extract_parameters};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    args.check_stdin_usage()?;

    // Logs go to stderr; stdout carries code and JSON.
    let default_filter = if args.verbose { "pyfix=debug,warn" } else { "pyfix=info,warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // CLI flags override rc file and environment
    let mut cfg = Config::load();
    debug!(path = %cfg.config_path.display(), "configuration loaded");
    if let Some(model) = &args.model {
        cfg.set("DEFAULT_MODEL", model.clone());
    }
    if let Some(secs) = args.timeout {
        cfg.set("EXECUTION_TIMEOUT", secs.to_string());
    }
    if let Some(interpreter) = &args.interpreter {
        cfg.set("PYTHON_INTERPRETER", interpreter.clone());
    }
    if args.no_install {
        cfg.set("AUTO_INSTALL_MODULES", "false");
    }

    let md = if args.no_md {
        false
    } else if args.md {
        true
    } else {
        cfg.get_bool("PRETTIFY_MARKDOWN")
    };
    let mode = OutputMode { json: args.json, md };

    if let Some(prompt) = &args.generate {
        return handlers::generate::run(&cfg, prompt, mode).await;
    }

    let code = utils::read_source(args.file.as_deref())?;

    if args.params {
        return handlers::params::run(&code, mode);
    }
    if args.analyze {
        return handlers::analyze::run(&cfg, &code, mode).await;
    }
    if let Some(error_message) = &args.fix {
        return handlers::fix::run(&cfg, &code, error_message, mode).await;
    }
    if args.run || args.ask || !args.inputs.is_empty() {
        let mut inputs: UserInputMap = if args.ask {
            handlers::params::ask_for_inputs(&extract_parameters(&code))?
        } else {
            UserInputMap::new()
        };
        inputs.extend(args.inputs.iter().cloned());
        return handlers::run::run(&cfg, &code, &inputs, mode).await;
    }

    handlers::check::run(&cfg, &code, mode).await
}
