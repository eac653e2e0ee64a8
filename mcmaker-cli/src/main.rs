mod commands;
mod config;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use config::{CliOverrides, ConfigMerger};
use mcmaker_core::adapters::FsWritePort;
use mcmaker_core::pipeline::{Destination, ToolError, run_build};
use mcmaker_core::settings::BuildSettings;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = "\
Commands:
  file     Adds a file to the MachineConfig object
  unit     Adds a systemd unit to the MachineConfig object
  dropin   Adds a systemd drop-in to a unit

Commands can be chained. Run `mcmaker --name foo <COMMAND> --help` for details on each command.";

#[derive(Debug, Parser)]
#[command(
    name = "mcmaker",
    version,
    about = "Creates a MachineConfig object with custom contents.",
    after_help = AFTER_HELP
)]
struct Cli {
    /// The name of the MachineConfig object to create.
    #[arg(long)]
    name: Option<String>,

    /// Machine pool role; appended to the name and set as the role label.
    #[arg(long)]
    role: Option<String>,

    /// Dump the object to stdout instead of creating `<name>.yaml`.
    #[arg(long, default_value_t = false)]
    stdout: bool,

    /// Directory for `<name>.yaml` (default: current directory).
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Config file (default: ./mcmaker.toml if present).
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Commands and their options.
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    commands: Vec<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match real_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn real_main() -> Result<(), ToolError> {
    let cli = Cli::parse();
    let cli_ops = commands::parse_operations(&cli.commands).unwrap_or_else(|e| e.exit());

    let file_config = match &cli.config {
        Some(path) => config::load_config(path),
        None => config::load_or_default(&Utf8PathBuf::from(".")),
    }
    .context("load mcmaker.toml config")?;

    let merged = ConfigMerger::new(file_config).merge_cli_args(
        CliOverrides {
            name: cli.name,
            role: cli.role,
            stdout: cli.stdout,
            out_dir: cli.out_dir,
        },
        cli_ops,
    );
    debug!(
        "merged config: name={:?}, role={:?}, output={:?}, ops={}",
        merged.name,
        merged.role,
        merged.output,
        merged.ops.len()
    );

    let Some(name) = merged.name else {
        Cli::command()
            .error(ErrorKind::MissingRequiredArgument, "no --name was specified")
            .exit();
    };

    let settings = BuildSettings {
        name,
        role: merged.role,
        base_dir: Utf8PathBuf::from("."),
        output: merged.output,
        default_mode: merged.default_mode,
        default_enabled: merged.default_enabled,
    };

    let outcome = run_build(&settings, &merged.ops, &FsWritePort)?;
    if let Destination::File(path) = &outcome.destination {
        info!("wrote {} ({} bytes)", path, outcome.bytes_written);
    }
    Ok(())
}
