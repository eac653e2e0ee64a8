//! Clap-free settings for the build pipeline.

use camino::Utf8PathBuf;
use mcmaker_types::ops::{DEFAULT_FILE_MODE, DEFAULT_UNIT_ENABLED};

/// Where the rendered document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    /// Write `<dir>/<document-name>.yaml`.
    Dir(Utf8PathBuf),
}

/// Settings for one build sequence.
#[derive(Debug, Clone)]
pub struct BuildSettings {
    pub name: String,
    pub role: Option<String>,

    /// Relative operation sources resolve against this directory.
    pub base_dir: Utf8PathBuf,
    pub output: OutputTarget,

    // Defaults for operations that leave them unset
    pub default_mode: u32,
    pub default_enabled: bool,
}

impl BuildSettings {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            role: None,
            base_dir: Utf8PathBuf::from("."),
            output: OutputTarget::Dir(Utf8PathBuf::from(".")),
            default_mode: DEFAULT_FILE_MODE,
            default_enabled: DEFAULT_UNIT_ENABLED,
        }
    }
}
