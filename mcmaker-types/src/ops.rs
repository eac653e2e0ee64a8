use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

/// Default permission bits for embedded files (0644).
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Default enablement for installed units.
pub const DEFAULT_UNIT_ENABLED: bool = true;

/// One additive build step.
///
/// Unset `mode` / `enabled` fall back to the build's configured defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    File {
        source: Utf8PathBuf,
        path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mode: Option<u32>,
    },
    Unit {
        source: Utf8PathBuf,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        enabled: Option<bool>,
    },
    Dropin {
        source: Utf8PathBuf,
        unit: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
}

impl Operation {
    pub fn source(&self) -> &Utf8Path {
        match self {
            Operation::File { source, .. }
            | Operation::Unit { source, .. }
            | Operation::Dropin { source, .. } => source,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Operation::File { .. } => "file",
            Operation::Unit { .. } => "unit",
            Operation::Dropin { .. } => "dropin",
        }
    }
}
