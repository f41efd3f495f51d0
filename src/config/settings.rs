//! Settings aggregate.
//!
//! # Responsibilities
//! - Locate and read `robottelo.properties` under the project root
//! - Read and validate global options, `[server]`, and every optional
//!   feature section that is present
//! - Fail atomically with every validation message at once
//! - On success only: install logging and compute entity defaults
//!
//! # Design Decisions
//! - `configure` stages into a fresh value and commits with one assignment,
//!   so a failure leaves the instance exactly as it was
//! - A configured instance is never re-read; later calls are no-ops
//! - Process-wide access goes through [`global`], a one-time initializer

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use serde_json::Value;
use url::Url;

use crate::config::casts::{Boolean, Capabilities, LogLevel, LoggingLevel};
use crate::config::error::ConfigError;
use crate::config::features::{
    ClientsSettings, DiscoveryIsoSettings, DockerSettings, FakeManifestSettings, FeatureSettings,
    LdapSettings, LibvirtHostSettings, OscapSettings, PerformanceSettings, RhaiSettings,
    ServerSettings, TransitionSettings, VlanNetworkSettings,
};
use crate::config::reader::IniReader;
use crate::config::validation::{evaluate, Rule};
use crate::entities::{EntityDefaults, EntityFactory, ServerConfig};
use crate::observability::logging;

pub const SETTINGS_FILE_NAME: &str = "robottelo.properties";

/// Overrides the project root used by [`Settings::configure`].
pub const PROJECT_ROOT_ENV: &str = "ROBOTTELO_DIR";

const SECTION: &str = "robottelo";
const BROWSERS: &[&str] = &["selenium", "docker", "saucelabs"];
const WEBDRIVERS: &[&str] = &["chrome", "firefox", "ie", "phantomjs", "remote"];
const GPG_KEY_CONTENT: &[&str] = &["tests", "foreman", "data", "valid_gpg_key.txt"];

static SETTINGS: OnceCell<Settings> = OnceCell::new();

/// Directory holding `robottelo.properties` and `logging.toml`.
pub fn project_root() -> PathBuf {
    std::env::var_os(PROJECT_ROOT_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")))
}

/// Process-wide settings, configured from [`project_root`] on first use.
///
/// Concurrent first callers wait for a single initialization. A failed
/// attempt stores nothing, so the error is returned again on the next call.
pub fn global() -> Result<&'static Settings, ConfigError> {
    SETTINGS.get_or_try_init(|| {
        let mut settings = Settings::new();
        settings.configure()?;
        Ok(settings)
    })
}

/// Robottelo's settings.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    configured: bool,
    root: Option<PathBuf>,
    entity_defaults: Option<EntityDefaults>,

    pub browser: Option<String>,
    pub locale: Option<String>,
    pub project: Option<String>,
    pub rhel6_repo: Option<String>,
    pub rhel7_repo: Option<String>,
    pub screenshots_path: Option<String>,
    pub run_one_datapoint: Option<bool>,
    pub upstream: Option<bool>,
    pub verbosity: Option<LogLevel>,
    pub webdriver: Option<String>,
    pub saucelabs_user: Option<String>,
    pub saucelabs_key: Option<String>,
    pub webdriver_binary: Option<String>,
    pub webdriver_desired_capabilities: Option<BTreeMap<String, Value>>,
    pub window_manager_command: Option<String>,

    pub server: ServerSettings,

    // Features
    pub clients: ClientsSettings,
    pub compute_resources: LibvirtHostSettings,
    pub discovery: DiscoveryIsoSettings,
    pub docker: DockerSettings,
    pub fake_manifest: FakeManifestSettings,
    pub ldap: LdapSettings,
    pub oscap: OscapSettings,
    pub performance: PerformanceSettings,
    pub rhai: RhaiSettings,
    pub transition: TransitionSettings,
    pub vlan_networking: VlanNetworkSettings,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once a `configure` call has succeeded.
    pub fn configured(&self) -> bool {
        self.configured
    }

    /// Project root the settings were loaded from.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Every feature group, `server` first.
    pub fn features(&self) -> Vec<&dyn FeatureSettings> {
        vec![
            &self.server,
            &self.clients,
            &self.compute_resources,
            &self.discovery,
            &self.docker,
            &self.fake_manifest,
            &self.ldap,
            &self.oscap,
            &self.performance,
            &self.rhai,
            &self.transition,
            &self.vlan_networking,
        ]
    }

    /// Names of every expected feature section.
    pub fn all_features(&self) -> Vec<&'static str> {
        self.features().iter().map(|feature| feature.section()).collect()
    }

    fn optional_features_mut(&mut self) -> Vec<&mut dyn FeatureSettings> {
        vec![
            &mut self.clients,
            &mut self.compute_resources,
            &mut self.discovery,
            &mut self.docker,
            &mut self.fake_manifest,
            &mut self.ldap,
            &mut self.oscap,
            &mut self.performance,
            &mut self.rhai,
            &mut self.transition,
            &mut self.vlan_networking,
        ]
    }

    /// Configure from [`project_root`].
    pub fn configure(&mut self) -> Result<(), ConfigError> {
        self.configure_in(&project_root())
    }

    /// Read `robottelo.properties` under `root`, validate, and on success
    /// set up logging and entity defaults.
    ///
    /// Does nothing when already configured.
    pub fn configure_in(&mut self, root: &Path) -> Result<(), ConfigError> {
        if self.configured {
            tracing::debug!("Settings already configured, skipping");
            return Ok(());
        }

        let settings_path = root.join(SETTINGS_FILE_NAME);
        if !settings_path.is_file() {
            return Err(ConfigError::SettingsNotFound(settings_path));
        }
        let reader = IniReader::new(&settings_path)?;

        let mut staged = Settings::new();
        let errors = staged.read_all(&reader)?;
        if !errors.is_empty() {
            tracing::debug!(count = errors.len(), "Settings validation failed");
            return Err(ConfigError::Validation(errors));
        }

        let plan = logging::plan(staged.verbosity.unwrap_or(LogLevel::Debug), root)?;
        let entity_defaults = staged.build_entity_defaults(root)?;

        logging::install(&plan);
        staged.entity_defaults = Some(entity_defaults);
        staged.root = Some(root.to_path_buf());
        staged.configured = true;
        *self = staged;

        tracing::info!(
            path = %settings_path.display(),
            server = %self.server.get_url(),
            "Settings configured"
        );
        Ok(())
    }

    /// Read every present section and collect validation messages in order:
    /// global options, server, then optional features.
    fn read_all(&mut self, reader: &IniReader) -> Result<Vec<String>, ConfigError> {
        let mut errors = Vec::new();

        self.read_robottelo_settings(reader)?;
        errors.extend(self.validate_robottelo_settings());

        self.server.read(reader)?;
        errors.extend(self.server.validate());

        for feature in self.optional_features_mut() {
            let section = feature.section();
            if !reader.has_section(section) {
                continue;
            }
            tracing::debug!(section, "Reading feature settings");
            feature.read(reader)?;
            errors.extend(feature.validate());
        }
        Ok(errors)
    }

    fn read_robottelo_settings(&mut self, reader: &IniReader) -> Result<(), ConfigError> {
        self.browser = Some(reader.get_str(SECTION, "browser", "selenium"));
        self.locale = Some(reader.get_str(SECTION, "locale", "en_US.UTF-8"));
        self.project = Some(reader.get_str(SECTION, "project", "sat"));
        self.rhel6_repo = reader.get_str_opt(SECTION, "rhel6_repo");
        self.rhel7_repo = reader.get_str_opt(SECTION, "rhel7_repo");
        self.screenshots_path = Some(reader.get_str(
            SECTION,
            "screenshots_path",
            "/tmp/robottelo/screenshots",
        ));
        self.run_one_datapoint = Some(reader.get(SECTION, "run_one_datapoint", false, Boolean)?);
        self.upstream = Some(reader.get(SECTION, "upstream", true, Boolean)?);
        self.verbosity = Some(reader.get(SECTION, "verbosity", LogLevel::Debug, LoggingLevel)?);
        self.webdriver = Some(reader.get_str(SECTION, "webdriver", "firefox"));
        self.saucelabs_user = reader.get_str_opt(SECTION, "saucelabs_user");
        self.saucelabs_key = reader.get_str_opt(SECTION, "saucelabs_key");
        self.webdriver_binary = reader.get_str_opt(SECTION, "webdriver_binary");
        self.webdriver_desired_capabilities =
            reader.get_opt(SECTION, "webdriver_desired_capabilities", Capabilities)?;
        self.window_manager_command = reader.get_str_opt(SECTION, "window_manager_command");
        Ok(())
    }

    fn robottelo_rules(&self) -> Vec<Rule<'_>> {
        let browser = self.browser.as_deref().unwrap_or_default();
        let saucelabs = browser == "saucelabs";
        vec![
            Rule::one_of(browser, BROWSERS, "[robottelo] browser"),
            Rule::one_of(
                self.webdriver.as_deref().unwrap_or_default(),
                WEBDRIVERS,
                "[robottelo] webdriver",
            ),
            Rule::required_if(
                saucelabs,
                &self.saucelabs_user,
                "[robottelo] saucelabs_user must be provided when browser is saucelabs.",
            ),
            Rule::required_if(
                saucelabs,
                &self.saucelabs_key,
                "[robottelo] saucelabs_key must be provided when browser is saucelabs.",
            ),
        ]
    }

    fn validate_robottelo_settings(&self) -> Vec<String> {
        evaluate(&self.robottelo_rules())
    }

    fn build_entity_defaults(&self, root: &Path) -> Result<EntityDefaults, ConfigError> {
        let url = self.server.get_url();
        let parsed = Url::parse(&url).map_err(|source| ConfigError::InvalidUrl { url, source })?;
        let gpg_key_content = GPG_KEY_CONTENT
            .iter()
            .fold(root.to_path_buf(), |path, part| path.join(part));
        Ok(EntityDefaults {
            create_missing: true,
            server_config: ServerConfig::new(parsed, self.server.get_credentials(), false),
            gpg_key_content,
            docker_url: self.docker.preferred_url(),
        })
    }

    /// Entity defaults derived from the configuration, once configured.
    pub fn entity_defaults(&self) -> Option<&EntityDefaults> {
        self.entity_defaults.as_ref()
    }

    /// Factory injecting [`entity_defaults`](Self::entity_defaults).
    pub fn entity_factory(&self) -> Option<EntityFactory> {
        self.entity_defaults.clone().map(EntityFactory::new)
    }
}
