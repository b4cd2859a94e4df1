mod check;
mod completions;
mod export;

use std::path::PathBuf;

use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use export::ExportCommand;
use gnigen_core::{BazelQuery, FileQuery, QueryCommand};
use gnigen_manifest::GnigenToml;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Extension trait for exiting on diagnostics with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for gnigen_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for gnigen_export::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "gnigen")]
#[command(version)]
#[command(about = "Generate GN .gni source lists from Bazel rules")]
pub(crate) struct Cli {
    /// Show debug logs (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn init_tracing(&self) {
        let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let filter = log_filter(self.verbose, env.as_deref());
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .try_init();
    }

    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Export(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

/// Directives from `RUST_LOG` when set, otherwise `debug` or `warn`.
fn log_filter(verbose: bool, env: Option<&str>) -> EnvFilter {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(env.unwrap_or_default())
}

#[derive(Subcommand)]
enum Commands {
    /// Write every .gni file listed in gnigen.toml
    Export(ExportCommand),

    /// Report .gni variables that are out of date, without writing
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Arguments shared by commands that read gnigen.toml and run the query.
#[derive(Args)]
pub struct ProjectArgs {
    /// Path to gnigen.toml (defaults to ./gnigen.toml)
    #[arg(short, long, default_value = "gnigen.toml")]
    pub config: PathBuf,

    /// Read a saved `--output=jsonproto` query result instead of running bazel
    #[arg(long, value_name = "FILE")]
    pub query_file: Option<PathBuf>,
}

impl ProjectArgs {
    pub fn open(&self) -> GnigenToml {
        GnigenToml::open(&self.config).unwrap_or_exit()
    }

    pub fn query(&self, toml: &GnigenToml, workspace_dir: PathBuf) -> Box<dyn QueryCommand> {
        match &self.query_file {
            Some(path) => Box::new(FileQuery::new(path)),
            None => {
                let manifest = toml.manifest();
                Box::new(BazelQuery::new(
                    &manifest.query.command,
                    manifest.query_expression(),
                    workspace_dir,
                ))
            }
        }
    }
}
