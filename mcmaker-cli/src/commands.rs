//! Chained command parsing.
//!
//! Each command consumes the options it knows and hands everything from the
//! first positional argument on to the next command:
//!
//! ```text
//! mcmaker --name foo file --source a --path /etc/a unit --source b.service
//! ```

use camino::Utf8PathBuf;
use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser};
use mcmaker_types::ops::Operation;

/// Names accepted as commands, in help order.
pub const COMMAND_NAMES: &[&str] = &["file", "unit", "dropin"];

#[derive(Debug, Parser)]
#[command(name = "file", about = "Adds a file to the MachineConfig object")]
struct FileArgs {
    /// The local file containing the file data.
    #[arg(long)]
    source: Utf8PathBuf,

    /// Path and filename to create on the destination host.
    #[arg(long)]
    path: String,

    /// Mode to create (decimal, 0644, 0o644 or 0x1a4).
    #[arg(long, value_parser = parse_mode)]
    mode: Option<u32>,

    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    rest: Vec<String>,
}

#[derive(Debug, Parser)]
#[command(name = "unit", about = "Adds a systemd unit to the MachineConfig object")]
struct UnitArgs {
    /// The local file containing the unit definition.
    #[arg(long)]
    source: Utf8PathBuf,

    /// Unit name to create (defaults to basename of source).
    #[arg(long)]
    name: Option<String>,

    /// Should it be enabled (`--enable`, `--enable=false`).
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = ArgAction::Set,
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    enable: Option<bool>,

    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    rest: Vec<String>,
}

#[derive(Debug, Parser)]
#[command(name = "dropin", about = "Adds a systemd drop-in to a unit in the MachineConfig object")]
struct DropinArgs {
    /// The local file containing the drop-in contents.
    #[arg(long)]
    source: Utf8PathBuf,

    /// Unit the drop-in applies to.
    #[arg(long)]
    unit: String,

    /// Drop-in name to create (defaults to basename of source).
    #[arg(long)]
    name: Option<String>,

    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    rest: Vec<String>,
}

/// Parse a chain of commands into operations, in order.
pub fn parse_operations(args: &[String]) -> Result<Vec<Operation>, clap::Error> {
    let mut ops = Vec::new();
    let mut remaining = args.to_vec();

    while let Some(command) = remaining.first().cloned() {
        let (op, rest) = match command.as_str() {
            "file" => {
                let a = FileArgs::try_parse_from(&remaining)?;
                let op = Operation::File {
                    source: a.source,
                    path: a.path,
                    mode: a.mode,
                };
                (op, a.rest)
            }
            "unit" => {
                let a = UnitArgs::try_parse_from(&remaining)?;
                let op = Operation::Unit {
                    source: a.source,
                    name: a.name,
                    enabled: a.enable,
                };
                (op, a.rest)
            }
            "dropin" => {
                let a = DropinArgs::try_parse_from(&remaining)?;
                let op = Operation::Dropin {
                    source: a.source,
                    unit: a.unit,
                    name: a.name,
                };
                (op, a.rest)
            }
            other => {
                return Err(crate::Cli::command().error(
                    ErrorKind::InvalidSubcommand,
                    format!(
                        "unrecognized command '{other}' (expected one of: {})",
                        COMMAND_NAMES.join(", ")
                    ),
                ));
            }
        };
        ops.push(op);
        remaining = rest;
    }

    Ok(ops)
}

/// Parse a permission mode. Accepts decimal, `0`-prefixed octal, `0o`/`0O`
/// octal, `0x`/`0X` hex and `0b`/`0B` binary.
pub fn parse_mode(s: &str) -> Result<u32, String> {
    let s = s.trim();
    let (digits, radix) = if let Some(rest) = s.strip_prefix("0o").or_else(|| s.strip_prefix("0O")) {
        (rest, 8)
    } else if let Some(rest) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (rest, 16)
    } else if let Some(rest) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
        (rest, 2)
    } else if s.len() > 1 && s.starts_with('0') {
        (&s[1..], 8)
    } else {
        (s, 10)
    };

    if digits.is_empty() {
        return Err(format!("invalid mode '{s}'"));
    }
    u32::from_str_radix(digits, radix).map_err(|e| format!("invalid mode '{s}': {e}"))
}
