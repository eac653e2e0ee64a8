//! Serialization pipeline for MachineConfig documents.
//!
//! Stages:
//! 1. Embed the typed Ignition payload into `spec.config` and encode the
//!    envelope to JSON (per-field `skip_serializing_if` omission).
//! 2. Decode into a [`GenericValue`] tree and [`prune`] it.
//! 3. Render YAML with keys sorted at every level.

pub mod prune;
pub mod value;

pub use prune::prune;
pub use value::GenericValue;

use mcmaker_types::ignition::IgnitionConfig;
use mcmaker_types::machineconfig::MachineConfig;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("encode json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("encode yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Pruning removed the whole document.
    #[error("empty machineconfig")]
    Empty,
}

/// Run the encode and prune stages, returning the minimal tree.
pub fn render_tree(
    document: &MachineConfig,
    config: &IgnitionConfig,
) -> Result<GenericValue, RenderError> {
    let mut document = document.clone();
    document.spec.embed(config)?;

    let raw = serde_json::to_value(&document)?;
    debug!(name = %document.metadata.name, "encoded machineconfig");

    prune(GenericValue::from(raw)).ok_or(RenderError::Empty)
}

/// Render the pruned document as YAML.
pub fn render_yaml(document: &MachineConfig, config: &IgnitionConfig) -> Result<String, RenderError> {
    let tree = render_tree(document, config)?;
    let yaml = serde_yaml::to_string(&tree)?;
    debug!(bytes = yaml.len(), "rendered yaml");
    Ok(yaml)
}
