//! Config tree builder for MachineConfig documents.
//!
//! Responsibilities:
//! - Append embedded files to `storage.files`.
//! - Merge units and drop-ins by name, so a drop-in may arrive before the unit
//!   that carries its base contents.
//! - Reject duplicate submissions (unit contents, drop-in names) instead of
//!   overwriting.
//! - Hand the final tree to `mcmaker-render` for pruning and YAML output.
//!
//! Every operation validates and reads its source before touching the tree,
//! so a failed call leaves the builder unchanged.

pub mod error;
pub mod source;

pub use error::{BuildError, BuildResult, ConflictError};
pub use source::{ContentSource, FileSource, InlineSource};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use mcmaker_types::ignition::{Dropin, File, IgnitionConfig, Resource, Unit};
use mcmaker_types::machineconfig::MachineConfig;
use mcmaker_types::schema::{DATA_URL_PREFIX, ROLE_LABEL};
use std::collections::BTreeMap;
use std::io::Write;
use tracing::debug;

/// Accumulates one MachineConfig and its Ignition payload.
#[derive(Debug, Clone)]
pub struct McMaker {
    base_name: String,
    mc: MachineConfig,
    config: IgnitionConfig,
    /// Position of each unit in `config.systemd.units`.
    units: BTreeMap<String, usize>,
}

impl McMaker {
    pub fn new(name: impl Into<String>) -> Self {
        let base_name = name.into();
        Self {
            mc: MachineConfig::new(base_name.clone()),
            base_name,
            config: IgnitionConfig::new(),
            units: BTreeMap::new(),
        }
    }

    /// The document name, including any role suffix.
    pub fn name(&self) -> &str {
        &self.mc.metadata.name
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    pub fn machine_config(&self) -> &MachineConfig {
        &self.mc
    }

    pub fn ignition(&self) -> &IgnitionConfig {
        &self.config
    }

    pub fn unit(&self, name: &str) -> Option<&Unit> {
        self.units
            .get(name)
            .map(|&idx| &self.config.systemd.units[idx])
    }

    /// Target a machine pool: the name becomes `<base>-<role>` and the role label is set.
    pub fn set_role(&mut self, role: &str) {
        self.mc.metadata.name = format!("{}-{}", self.base_name, role);
        self.mc
            .metadata
            .labels
            .insert(ROLE_LABEL.to_string(), role.to_string());
        debug!(name = %self.mc.metadata.name, role, "set role");
    }

    /// Embed `source` at `path` on the host.
    pub fn add_file(
        &mut self,
        source: &dyn ContentSource,
        path: &str,
        mode: u32,
    ) -> BuildResult<()> {
        if path.is_empty() {
            return Err(BuildError::invalid("file entries require a path"));
        }
        let bytes = read_source(source)?;

        self.config.storage.files.push(File {
            path: path.to_string(),
            overwrite: None,
            contents: Resource {
                compression: None,
                source: Some(data_url(&bytes)),
            },
            mode: Some(mode),
        });
        debug!(path, mode, bytes = bytes.len(), "added file");
        Ok(())
    }

    /// Install a systemd unit; `name` defaults to the source's file name.
    ///
    /// Fills in a unit previously created by [`McMaker::add_dropin`]. Empty
    /// unit text against a unit that already has contents only updates
    /// `enabled`.
    pub fn add_unit(
        &mut self,
        source: &dyn ContentSource,
        name: &str,
        enabled: bool,
    ) -> BuildResult<()> {
        let name = resolve_name(name, source, "unit")?;
        let text = read_text(source)?;

        if !text.is_empty() && self.unit(&name).is_some_and(Unit::has_contents) {
            return Err(ConflictError::UnitContents { unit: name }.into());
        }

        let unit = self.unit_entry(&name);
        if !text.is_empty() {
            unit.contents = Some(text);
        }
        unit.enabled = Some(enabled);
        debug!(unit = %name, enabled, "added unit");
        Ok(())
    }

    /// Attach a drop-in to `unit`, creating a bare unit entry if needed.
    pub fn add_dropin(
        &mut self,
        source: &dyn ContentSource,
        unit: &str,
        dropin: &str,
    ) -> BuildResult<()> {
        if unit.is_empty() {
            return Err(BuildError::invalid("drop-in entries require a unit name"));
        }
        let dropin = resolve_name(dropin, source, "drop-in")?;
        let text = read_text(source)?;

        if self.unit(unit).is_some_and(|u| u.dropin(&dropin).is_some()) {
            return Err(ConflictError::DropinName {
                unit: unit.to_string(),
                dropin,
            }
            .into());
        }

        self.unit_entry(unit).dropins.push(Dropin {
            name: dropin.clone(),
            contents: Some(text),
        });
        debug!(unit, dropin = %dropin, "added drop-in");
        Ok(())
    }

    /// Render the pruned document as YAML.
    pub fn render(&self) -> BuildResult<String> {
        Ok(mcmaker_render::render_yaml(&self.mc, &self.config)?)
    }

    /// Render and write the document, returning the number of bytes written.
    pub fn write_to<W: Write + ?Sized>(&self, output: &mut W) -> BuildResult<u64> {
        let yaml = self.render()?;
        output.write_all(yaml.as_bytes()).map_err(BuildError::Write)?;
        output.flush().map_err(BuildError::Write)?;
        Ok(yaml.len() as u64)
    }

    fn unit_entry(&mut self, name: &str) -> &mut Unit {
        let units = &mut self.config.systemd.units;
        let idx = *self.units.entry(name.to_string()).or_insert_with(|| {
            units.push(Unit::named(name));
            units.len() - 1
        });
        &mut units[idx]
    }
}

fn resolve_name(name: &str, source: &dyn ContentSource, what: &str) -> BuildResult<String> {
    if !name.is_empty() {
        return Ok(name.to_string());
    }
    source
        .file_name()
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            BuildError::invalid(format!(
                "{what} name is empty and cannot be derived from {}",
                source.describe()
            ))
        })
}

fn read_source(source: &dyn ContentSource) -> BuildResult<Vec<u8>> {
    source.read_bytes().map_err(|e| BuildError::Io {
        source_name: source.describe(),
        source: e,
    })
}

fn read_text(source: &dyn ContentSource) -> BuildResult<String> {
    let bytes = read_source(source)?;
    String::from_utf8(bytes).map_err(|e| BuildError::Io {
        source_name: source.describe(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
    })
}

/// Encode bytes as an inline `data:` URL.
pub fn data_url(bytes: &[u8]) -> String {
    format!("{DATA_URL_PREFIX}{}", STANDARD.encode(bytes))
}
