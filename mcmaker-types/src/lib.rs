//! Shared DTOs (schemas-as-code) for the mcmaker workspace.
//!
//! # Design constraints
//! - Field names follow the MachineConfig and Ignition 3.2 wire schemas.
//! - `skip_serializing_if` only drops a field whose own value is empty. A
//!   nested struct made entirely of empty fields still serializes as `{}`;
//!   `mcmaker-render` prunes those.

pub mod ignition;
pub mod machineconfig;
pub mod ops;

/// Schema identifiers.
pub mod schema {
    pub const MACHINECONFIG_API_VERSION: &str = "machineconfiguration.openshift.io/v1";
    pub const MACHINECONFIG_KIND: &str = "MachineConfig";
    pub const IGNITION_VERSION: &str = "3.2.0";

    /// Label recording which pool (role) a MachineConfig targets.
    pub const ROLE_LABEL: &str = "machineconfiguration.openshift.io/role";

    /// Prefix for embedded file contents; the base64 payload follows it.
    pub const DATA_URL_PREFIX: &str = "data:text/plain;charset=utf-8;base64,";
}
