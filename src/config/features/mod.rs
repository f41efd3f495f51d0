//! Feature settings groups.
//!
//! One record per section of the settings file. A group is populated by
//! [`FeatureSettings::read`] and checked by [`FeatureSettings::validate`];
//! before `read` every field is `None`, which callers treat as unset.
//!
//! # Sections
//! - `server` (always read)
//! - `clients`, `compute_resources`, `discovery`, `docker`, `fake_manifest`,
//!   `ldap`, `oscap`, `performance`, `rhai`, `transition`, `vlan_networking`
//!   (read only when present)

use std::fmt;

use crate::config::error::ConfigError;
use crate::config::reader::IniReader;
use crate::config::validation::{evaluate, Rule};

mod docker;
mod integrations;
mod performance;
mod provisioning;
mod server;

pub use docker::{DockerSettings, DOCKER_UNIX_SOCKET_URL};
pub use integrations::{
    FakeManifestSettings, LdapSettings, OscapSettings, RhaiSettings, TransitionSettings,
};
pub use performance::PerformanceSettings;
pub use provisioning::{
    ClientsSettings, DiscoveryIsoSettings, LibvirtHostSettings, VlanNetworkSettings,
};
pub use server::ServerSettings;

/// Settings related to one feature area.
pub trait FeatureSettings: fmt::Debug {
    /// Section header this group reads from.
    fn section(&self) -> &'static str;

    /// Populate fields from `reader`, applying per-field defaults.
    fn read(&mut self, reader: &IniReader) -> Result<(), ConfigError>;

    /// Requirements checked by [`validate`](Self::validate).
    fn rules(&self) -> Vec<Rule<'_>>;

    /// Human-readable message for every violated requirement.
    fn validate(&self) -> Vec<String> {
        evaluate(&self.rules())
    }
}
