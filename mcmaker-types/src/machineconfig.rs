use crate::ignition::IgnitionConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The outer resource envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineConfig {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,

    #[serde(default)]
    pub spec: MachineConfigSpec,
}

impl MachineConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            api_version: crate::schema::MACHINECONFIG_API_VERSION.to_string(),
            kind: crate::schema::MACHINECONFIG_KIND.to_string(),
            metadata: ObjectMeta {
                name: name.into(),
                ..ObjectMeta::default()
            },
            spec: MachineConfigSpec::default(),
        }
    }

    /// The role label, if one was recorded.
    pub fn role(&self) -> Option<&str> {
        self.metadata
            .labels
            .get(crate::schema::ROLE_LABEL)
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    pub name: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,

    /// Serialized as `null` when unset, like Kubernetes object metadata.
    #[serde(default)]
    pub creation_timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineConfigSpec {
    #[serde(default, rename = "osImageURL")]
    pub os_image_url: String,

    /// Raw Ignition payload, embedded as an already-encoded JSON tree.
    #[serde(default)]
    pub config: serde_json::Value,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kernel_arguments: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,

    #[serde(default)]
    pub fips: bool,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kernel_type: String,
}

impl MachineConfigSpec {
    /// Encode `config` and embed it as the raw payload.
    pub fn embed(&mut self, config: &IgnitionConfig) -> serde_json::Result<()> {
        self.config = serde_json::to_value(config)?;
        Ok(())
    }
}
