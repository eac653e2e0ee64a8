//! Ignition 3.2 payload types (the subset mcmaker writes).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IgnitionConfig {
    pub ignition: Ignition,

    #[serde(default)]
    pub storage: Storage,

    #[serde(default)]
    pub systemd: Systemd,
}

impl IgnitionConfig {
    pub fn new() -> Self {
        Self {
            ignition: Ignition {
                version: crate::schema::IGNITION_VERSION.to_string(),
            },
            storage: Storage::default(),
            systemd: Systemd::default(),
        }
    }
}

impl Default for IgnitionConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ignition {
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Storage {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<File>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    pub path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<bool>,

    #[serde(default)]
    pub contents: Resource,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<u32>,
}

/// A remote or inline content reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Systemd {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub units: Vec<Unit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropins: Vec<Dropin>,
}

impl Unit {
    /// A unit with only a name, as created implicitly by a drop-in.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: None,
            enabled: None,
            mask: None,
            dropins: Vec::new(),
        }
    }

    /// True once non-empty unit text has been assigned.
    pub fn has_contents(&self) -> bool {
        self.contents.as_deref().is_some_and(|c| !c.is_empty())
    }

    pub fn dropin(&self, name: &str) -> Option<&Dropin> {
        self.dropins.iter().find(|d| d.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dropin {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contents: Option<String>,
}
