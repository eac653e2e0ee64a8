//! Configuration file loading for mcmaker.
//!
//! Discovers and loads `mcmaker.toml` from the working directory (or an
//! explicit `--config` path) and merges it with CLI arguments (CLI takes
//! precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use mcmaker_core::settings::OutputTarget;
use mcmaker_types::ops::{DEFAULT_FILE_MODE, DEFAULT_UNIT_ENABLED, Operation};
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "mcmaker.toml";

/// Top-level configuration from mcmaker.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct McMakerConfig {
    /// Document name, used when `--name` is absent.
    pub name: Option<String>,

    /// Machine pool role, used when `--role` is absent.
    pub role: Option<String>,

    pub output: OutputConfig,

    pub defaults: DefaultsConfig,

    /// Operations applied before any given on the command line.
    pub ops: Vec<Operation>,
}

/// Output section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Write the document to stdout instead of a file.
    pub stdout: bool,

    /// Directory for `<name>.yaml`.
    pub dir: Option<Utf8PathBuf>,
}

/// Defaults for operations that leave mode or enablement unset.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub mode: u32,
    pub enable: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            mode: DEFAULT_FILE_MODE,
            enable: DEFAULT_UNIT_ENABLED,
        }
    }
}

impl McMakerConfig {
    /// Make relative operation sources relative to `dir`.
    fn rebase_sources(&mut self, dir: &Utf8Path) {
        if dir.as_str().is_empty() {
            return;
        }
        for op in &mut self.ops {
            let source = match op {
                Operation::File { source, .. }
                | Operation::Unit { source, .. }
                | Operation::Dropin { source, .. } => source,
            };
            if source.is_relative() {
                *source = dir.join(&*source);
            }
        }
    }
}

/// Discover `mcmaker.toml` in `dir`. Returns `None` if there is none.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a config file. Relative op sources resolve against the
/// file's directory.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<McMakerConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    let mut config =
        parse_config(&contents).with_context(|| format!("parse config file {}", path))?;
    if let Some(dir) = path.parent() {
        config.rebase_sources(dir);
    }
    Ok(config)
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<McMakerConfig> {
    let config: McMakerConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `dir`, or return default if not found.
pub fn load_or_default(dir: &Utf8Path) -> anyhow::Result<McMakerConfig> {
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(McMakerConfig::default()),
    }
}

/// Top-level CLI values that may override the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub name: Option<String>,
    pub role: Option<String>,
    pub stdout: bool,
    pub out_dir: Option<Utf8PathBuf>,
}

/// Merged configuration combining config file and CLI arguments.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub name: Option<String>,
    pub role: Option<String>,
    pub output: OutputTarget,
    pub default_mode: u32,
    pub default_enabled: bool,

    /// Config file operations followed by CLI operations.
    pub ops: Vec<Operation>,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: McMakerConfig,
}

impl ConfigMerger {
    pub fn new(config: McMakerConfig) -> Self {
        Self { config }
    }

    /// CLI scalars win; `--stdout` is OR'd with the config value; CLI
    /// operations run after the config's.
    pub fn merge_cli_args(self, cli: CliOverrides, cli_ops: Vec<Operation>) -> MergedConfig {
        let config = self.config;
        let nonempty = |s: Option<String>| s.filter(|s| !s.is_empty());

        let output = if cli.stdout || config.output.stdout {
            OutputTarget::Stdout
        } else {
            OutputTarget::Dir(
                cli.out_dir
                    .or(config.output.dir)
                    .unwrap_or_else(|| Utf8PathBuf::from(".")),
            )
        };

        let mut ops = config.ops;
        ops.extend(cli_ops);

        MergedConfig {
            name: nonempty(cli.name).or(nonempty(config.name)),
            role: nonempty(cli.role).or(nonempty(config.role)),
            output,
            default_mode: config.defaults.mode,
            default_enabled: config.defaults.enable,
            ops,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn unit(source: &str) -> Operation {
        Operation::Unit {
            source: source.into(),
            name: None,
            enabled: None,
        }
    }

    #[test]
    fn parses_full_config() {
        let contents = r#"
name = "tuning"
role = "worker"

[output]
stdout = false
dir = "out"

[defaults]
mode = 0o600
enable = false

[[ops]]
type = "file"
source = "files/limits.conf"
path = "/etc/security/limits.d/99.conf"

[[ops]]
type = "dropin"
source = "10-cpu.conf"
unit = "kubelet.service"
"#;
        let config = parse_config(contents).expect("parse");
        assert_eq!(config.name.as_deref(), Some("tuning"));
        assert_eq!(config.role.as_deref(), Some("worker"));
        assert_eq!(config.output.dir, Some(Utf8PathBuf::from("out")));
        assert_eq!(config.defaults.mode, 0o600);
        assert!(!config.defaults.enable);
        assert_eq!(config.ops.len(), 2);
        assert_eq!(config.ops[1].kind(), "dropin");
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse_config("").expect("parse");
        assert!(config.name.is_none());
        assert!(!config.output.stdout);
        assert_eq!(config.defaults.mode, 0o644);
        assert!(config.defaults.enable);
        assert!(config.ops.is_empty());
    }

    #[test]
    fn unknown_op_type_is_an_error() {
        let err = parse_config("[[ops]]\ntype = \"symlink\"\nsource = \"x\"\n")
            .expect_err("bad op");
        assert!(format!("{err:#}").contains("invalid TOML"));
    }

    #[test]
    fn cli_scalars_take_precedence() {
        let config = McMakerConfig {
            name: Some("from-config".into()),
            role: Some("master".into()),
            output: OutputConfig {
                stdout: false,
                dir: Some("config-out".into()),
            },
            ..Default::default()
        };
        let merged = ConfigMerger::new(config).merge_cli_args(
            CliOverrides {
                name: Some("from-cli".into()),
                role: None,
                stdout: false,
                out_dir: Some("cli-out".into()),
            },
            vec![],
        );

        assert_eq!(merged.name.as_deref(), Some("from-cli"));
        assert_eq!(merged.role.as_deref(), Some("master"));
        assert_eq!(merged.output, OutputTarget::Dir("cli-out".into()));
    }

    #[test]
    fn stdout_is_ored() {
        let config = McMakerConfig {
            output: OutputConfig {
                stdout: true,
                dir: None,
            },
            ..Default::default()
        };
        let merged = ConfigMerger::new(config).merge_cli_args(CliOverrides::default(), vec![]);
        assert_eq!(merged.output, OutputTarget::Stdout);

        let merged = ConfigMerger::new(McMakerConfig::default()).merge_cli_args(
            CliOverrides {
                stdout: true,
                ..Default::default()
            },
            vec![],
        );
        assert_eq!(merged.output, OutputTarget::Stdout);
    }

    #[test]
    fn config_ops_run_before_cli_ops() {
        let config = McMakerConfig {
            ops: vec![unit("a.service")],
            ..Default::default()
        };
        let merged = ConfigMerger::new(config)
            .merge_cli_args(CliOverrides::default(), vec![unit("b.service")]);
        assert_eq!(merged.ops, vec![unit("a.service"), unit("b.service")]);
        assert_eq!(merged.output, OutputTarget::Dir(".".into()));
    }

    #[test]
    fn empty_cli_name_falls_back_to_config() {
        let config = McMakerConfig {
            name: Some("from-config".into()),
            ..Default::default()
        };
        let merged = ConfigMerger::new(config).merge_cli_args(
            CliOverrides {
                name: Some(String::new()),
                ..Default::default()
            },
            vec![],
        );
        assert_eq!(merged.name.as_deref(), Some("from-config"));
    }

    #[test]
    fn load_rebases_relative_sources() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        std::fs::write(
            root.join(CONFIG_FILE_NAME),
            "[[ops]]\ntype = \"unit\"\nsource = \"units/a.service\"\n\n\
             [[ops]]\ntype = \"unit\"\nsource = \"/abs/b.service\"\n",
        )
        .expect("write config");

        let config = load_or_default(&root).expect("load");
        assert_eq!(config.ops[0].source(), root.join("units/a.service"));
        assert_eq!(config.ops[1].source(), Utf8Path::new("/abs/b.service"));
    }

    #[test]
    fn discover_config_some_and_none() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        assert!(discover_config(&root).is_none());
        assert!(load_or_default(&root).expect("default").ops.is_empty());

        std::fs::write(root.join(CONFIG_FILE_NAME), "").expect("write config");
        assert!(discover_config(&root).is_some());
    }
}
