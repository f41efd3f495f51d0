//! `[performance]` settings.

use crate::config::casts::{Boolean, List, Number};
use crate::config::error::ConfigError;
use crate::config::reader::IniReader;
use crate::config::validation::Rule;

use super::FeatureSettings;

const SECTION: &str = "performance";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerformanceSettings {
    pub time_hammer: Option<bool>,
    pub cdn_address: Option<String>,
    pub virtual_machines: Option<Vec<String>>,
    pub fresh_install_savepoint: Option<String>,
    pub enabled_repos_savepoint: Option<String>,
    pub csv_buckets_count: Option<u32>,
    pub sync_count: Option<u32>,
    pub sync_type: Option<String>,
    pub repos: Option<Vec<String>>,
}

impl FeatureSettings for PerformanceSettings {
    fn section(&self) -> &'static str {
        SECTION
    }

    fn read(&mut self, reader: &IniReader) -> Result<(), ConfigError> {
        self.time_hammer = Some(reader.get(SECTION, "time_hammer", false, Boolean)?);
        self.cdn_address = reader.get_str_opt(SECTION, "cdn_address");
        self.virtual_machines = reader.get_opt(SECTION, "virtual_machines", List)?;
        self.fresh_install_savepoint = reader.get_str_opt(SECTION, "fresh_install_savepoint");
        self.enabled_repos_savepoint = reader.get_str_opt(SECTION, "enabled_repos_savepoint");
        self.csv_buckets_count =
            Some(reader.get(SECTION, "csv_buckets_count", 10, Number::<u32>::new())?);
        self.sync_count = Some(reader.get(SECTION, "sync_count", 3, Number::<u32>::new())?);
        self.sync_type = Some(reader.get_str(SECTION, "sync_type", "sync"));
        self.repos = reader.get_opt(SECTION, "repos", List)?;
        Ok(())
    }

    fn rules(&self) -> Vec<Rule<'_>> {
        vec![
            Rule::required(&self.cdn_address, "[performance] cdn_address must be provided."),
            Rule::required(
                &self.virtual_machines,
                "[performance] virtual_machines must be provided.",
            ),
            Rule::required(
                &self.fresh_install_savepoint,
                "[performance] fresh_install_savepoint must be provided.",
            ),
            Rule::required(
                &self.enabled_repos_savepoint,
                "[performance] enabled_repos_savepoint must be provided.",
            ),
        ]
    }
}
