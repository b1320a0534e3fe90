// payverify CLI - registration payment verification

mod exit_codes;
mod verify;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use exit_codes::{EXIT_CONFIG, EXIT_ERROR, EXIT_RUNTIME, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "payverify")]
#[command(about = "Match registration payments against Zelle notifications and a Venmo statement")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify payments and write the xlsx reports (default when no command is given)
    #[command(after_help = "\
Without --config, payverify.toml in the working directory is used when present,
otherwise the built-in defaults. Input and output paths are relative to the
config file's directory.

Examples:
  payverify run
  payverify run --config seoul-drift.toml
  payverify run --json | jq .summary
  payverify run --output result.json --strict")]
    Run {
        /// Path to a payverify TOML config
        #[arg(long, short = 'c', env = "PAYVERIFY_CONFIG")]
        config: Option<PathBuf>,

        /// Output JSON to stdout
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Exit 5 when any registration is unpaid or unresolved
        #[arg(long)]
        strict: bool,
    },

    /// Validate a config without reading inputs
    #[command(after_help = "\
Examples:
  payverify validate
  payverify validate --config seoul-drift.toml")]
    Validate {
        /// Path to a payverify TOML config
        #[arg(long, short = 'c', env = "PAYVERIFY_CONFIG")]
        config: Option<PathBuf>,
    },
}

/// Error surfaced to the user: message, optional hint, exit code.
#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self { code: EXIT_CONFIG, message: msg.into(), hint: None }
    }

    pub fn runtime(msg: impl Into<String>) -> Self {
        Self { code: EXIT_RUNTIME, message: msg.into(), hint: None }
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        None => verify::cmd_run(None, false, None, false),
        Some(Commands::Run { config, json, output, strict }) => verify::cmd_run(config, json, output, strict),
        Some(Commands::Validate { config }) => verify::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}
