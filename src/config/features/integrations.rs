//! Sections for external services: `[fake_manifest]`, `[ldap]`, `[oscap]`,
//! `[rhai]` and `[transition]`.

use crate::config::error::ConfigError;
use crate::config::reader::IniReader;
use crate::config::validation::{fields, Rule};

use super::FeatureSettings;

/// Location of the fake subscription manifest and its signing material.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeManifestSettings {
    pub cert_url: Option<String>,
    pub key_url: Option<String>,
    pub url: Option<String>,
}

impl FeatureSettings for FakeManifestSettings {
    fn section(&self) -> &'static str {
        "fake_manifest"
    }

    fn read(&mut self, reader: &IniReader) -> Result<(), ConfigError> {
        self.cert_url = reader.get_str_opt("fake_manifest", "cert_url");
        self.key_url = reader.get_str_opt("fake_manifest", "key_url");
        self.url = reader.get_str_opt("fake_manifest", "url");
        Ok(())
    }

    fn rules(&self) -> Vec<Rule<'_>> {
        vec![Rule::all_of(
            fields![self.cert_url, self.key_url, self.url],
            "All [fake_manifest] cert_url, key_url, url options must be provided.",
        )]
    }
}

/// LDAP directory used for external authentication tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LdapSettings {
    pub basedn: Option<String>,
    pub grpbasedn: Option<String>,
    pub hostname: Option<String>,
    pub password: Option<String>,
    pub username: Option<String>,
}

impl FeatureSettings for LdapSettings {
    fn section(&self) -> &'static str {
        "ldap"
    }

    fn read(&mut self, reader: &IniReader) -> Result<(), ConfigError> {
        self.basedn = reader.get_str_opt("ldap", "basedn");
        self.grpbasedn = reader.get_str_opt("ldap", "grpbasedn");
        self.hostname = reader.get_str_opt("ldap", "hostname");
        self.password = reader.get_str_opt("ldap", "password");
        self.username = reader.get_str_opt("ldap", "username");
        Ok(())
    }

    fn rules(&self) -> Vec<Rule<'_>> {
        vec![Rule::all_of(
            fields![
                self.basedn,
                self.grpbasedn,
                self.hostname,
                self.password,
                self.username
            ],
            "All [ldap] basedn, grpbasedn, hostname, password, username options must be provided.",
        )]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OscapSettings {
    pub content_path: Option<String>,
}

impl FeatureSettings for OscapSettings {
    fn section(&self) -> &'static str {
        "oscap"
    }

    fn read(&mut self, reader: &IniReader) -> Result<(), ConfigError> {
        self.content_path = reader.get_str_opt("oscap", "content_path");
        Ok(())
    }

    fn rules(&self) -> Vec<Rule<'_>> {
        vec![Rule::required(
            &self.content_path,
            "[oscap] content_path option must be provided.",
        )]
    }
}

/// Insights client repositories. Nothing is mandatory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RhaiSettings {
    pub insights_client_el6repo: Option<String>,
    pub insights_client_el7repo: Option<String>,
}

impl FeatureSettings for RhaiSettings {
    fn section(&self) -> &'static str {
        "rhai"
    }

    fn read(&mut self, reader: &IniReader) -> Result<(), ConfigError> {
        self.insights_client_el6repo = reader.get_str_opt("rhai", "insights_client_el6repo");
        self.insights_client_el7repo = reader.get_str_opt("rhai", "insights_client_el7repo");
        Ok(())
    }

    fn rules(&self) -> Vec<Rule<'_>> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionSettings {
    pub exported_data: Option<String>,
}

impl FeatureSettings for TransitionSettings {
    fn section(&self) -> &'static str {
        "transition"
    }

    fn read(&mut self, reader: &IniReader) -> Result<(), ConfigError> {
        self.exported_data = reader.get_str_opt("transition", "exported_data");
        Ok(())
    }

    fn rules(&self) -> Vec<Rule<'_>> {
        vec![Rule::required(
            &self.exported_data,
            "[transition] exported_data must be provided.",
        )]
    }
}
