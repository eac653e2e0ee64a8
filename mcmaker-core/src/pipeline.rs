//! Build pipeline, extracted from the CLI.
//!
//! Sources are read from disk through the builder; rendered output only
//! leaves through a [`WritePort`].

use crate::ports::WritePort;
use crate::settings::{BuildSettings, OutputTarget};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use mcmaker_edit::{BuildError, FileSource, McMaker};
use mcmaker_types::ops::Operation;
use tracing::debug;

/// Error type for pipeline results. Exit code 2 = rejected input, 1 = tool error.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("a document name is required")]
    MissingName,
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl ToolError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ToolError::MissingName => 2,
            ToolError::Build(err) => err.exit_code(),
            ToolError::Internal(_) => 1,
        }
    }
}

/// Where a rendered document ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(Utf8PathBuf),
}

/// Outcome of `run_build`.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    /// Document name, including any role suffix.
    pub name: String,
    pub destination: Destination,
    pub bytes_written: u64,
}

/// Apply `ops` in order to a fresh builder. Stops at the first failure.
pub fn build_document(settings: &BuildSettings, ops: &[Operation]) -> Result<McMaker, ToolError> {
    if settings.name.is_empty() {
        return Err(ToolError::MissingName);
    }

    let mut maker = McMaker::new(settings.name.as_str());
    if let Some(role) = settings.role.as_deref().filter(|r| !r.is_empty()) {
        maker.set_role(role);
    }

    for (idx, op) in ops.iter().enumerate() {
        debug!(idx, kind = op.kind(), source = %op.source(), "applying operation");
        apply_operation(&mut maker, settings, op)?;
    }
    Ok(maker)
}

/// Apply a single operation, filling unset fields from `settings`.
pub fn apply_operation(
    maker: &mut McMaker,
    settings: &BuildSettings,
    op: &Operation,
) -> Result<(), BuildError> {
    let source = FileSource::new(source_path(&settings.base_dir, op.source()));
    match op {
        Operation::File { path, mode, .. } => {
            maker.add_file(&source, path, mode.unwrap_or(settings.default_mode))
        }
        Operation::Unit { name, enabled, .. } => maker.add_unit(
            &source,
            name.as_deref().unwrap_or_default(),
            enabled.unwrap_or(settings.default_enabled),
        ),
        Operation::Dropin { unit, name, .. } => {
            maker.add_dropin(&source, unit, name.as_deref().unwrap_or_default())
        }
    }
}

/// Build, render, and write the document to the configured target.
pub fn run_build(
    settings: &BuildSettings,
    ops: &[Operation],
    writer: &dyn WritePort,
) -> Result<BuildOutcome, ToolError> {
    let maker = build_document(settings, ops)?;

    let mut rendered = Vec::new();
    let bytes_written = maker.write_to(&mut rendered)?;

    let destination = match &settings.output {
        OutputTarget::Stdout => {
            writer.write_stdout(&rendered)?;
            Destination::Stdout
        }
        OutputTarget::Dir(dir) => {
            let path = output_path(dir, maker.name());
            writer
                .write_file(&path, &rendered)
                .with_context(|| format!("write {}", path))?;
            Destination::File(path)
        }
    };
    debug!(name = maker.name(), bytes_written, ?destination, "wrote document");

    Ok(BuildOutcome {
        name: maker.name().to_string(),
        destination,
        bytes_written,
    })
}

/// `<dir>/<name>.yaml`.
pub fn output_path(dir: &Utf8Path, name: &str) -> Utf8PathBuf {
    dir.join(format!("{name}.yaml"))
}

fn source_path(base_dir: &Utf8Path, source: &Utf8Path) -> Utf8PathBuf {
    if source.is_absolute() {
        source.to_path_buf()
    } else {
        base_dir.join(source)
    }
}
