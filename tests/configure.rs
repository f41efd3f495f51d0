//! End-to-end configuration tests against settings files on disk.

use std::fs;

use robottelo::config::{ConfigError, Settings, SETTINGS_FILE_NAME};
use robottelo::config::features::DOCKER_UNIX_SOCKET_URL;

mod common;

#[test]
fn minimal_settings_configure() {
    let root = common::project_with_settings(common::MINIMAL);
    let mut settings = Settings::new();
    settings.configure_in(root.path()).unwrap();

    assert!(settings.configured());
    assert_eq!(settings.server.get_url(), "https://foo.example.com");
    assert_eq!(settings.root(), Some(root.path()));
    assert!(settings.entity_defaults().is_some());
}

#[test]
fn missing_settings_file_is_reported() {
    let root = tempfile::tempdir().unwrap();
    let mut settings = Settings::new();
    let err = settings.configure_in(root.path()).unwrap_err();

    assert!(matches!(err, ConfigError::SettingsNotFound(ref path) if path.ends_with(SETTINGS_FILE_NAME)));
    assert!(err.to_string().starts_with("Not able to find settings file at"));
    assert!(!settings.configured());
}

#[test]
fn missing_hostname_fails_validation() {
    let root = common::project_with_settings("[server]\nssh_password = x\n");
    let mut settings = Settings::new();
    let err = settings.configure_in(root.path()).unwrap_err();

    assert!(err.to_string().contains("hostname must be provided"));
    assert!(!settings.configured());
    assert_eq!(settings.server.hostname, None);
    assert!(settings.entity_defaults().is_none());
}

#[test]
fn saucelabs_without_credentials_reports_both() {
    let root = common::project_with_settings(
        "[robottelo]\nbrowser = saucelabs\n[server]\nhostname = h\nssh_password = x\n",
    );
    let err = Settings::new().configure_in(root.path()).unwrap_err();

    let errors = err.validation_errors();
    assert_eq!(errors.len(), 2);
    assert!(errors[0].contains("saucelabs_user"));
    assert!(errors[1].contains("saucelabs_key"));
    let message = err.to_string();
    assert_eq!(message.lines().count(), 3);
}

#[test]
fn explicit_port_keeps_default_scheme() {
    let root = common::project_with_settings("[server]\nhostname = h\nport = 8080\nssh_key = k\n");
    let mut settings = Settings::new();
    settings.configure_in(root.path()).unwrap();
    assert_eq!(settings.server.get_url(), "https://h:8080");
}

#[test]
fn docker_socket_flows_into_entity_defaults() {
    let root = common::project_with_settings(&format!(
        "{}[docker]\nunix_socket = true\n",
        common::MINIMAL
    ));
    let mut settings = Settings::new();
    settings.configure_in(root.path()).unwrap();

    assert_eq!(settings.docker.get_unix_socket_url(), Some(DOCKER_UNIX_SOCKET_URL));
    let factory = settings.entity_factory().unwrap();
    assert_eq!(
        factory.docker_compute_resource().url.as_deref(),
        Some(DOCKER_UNIX_SOCKET_URL)
    );
    assert_eq!(
        factory.gpg_key().content,
        root.path().join("tests/foreman/data/valid_gpg_key.txt")
    );
    assert!(!factory.server_config().verify);
}

#[test]
fn docker_without_any_endpoint_fails() {
    let root = common::project_with_settings(&format!(
        "{}[docker]\nunix_socket = false\n",
        common::MINIMAL
    ));
    let err = Settings::new().configure_in(root.path()).unwrap_err();
    assert_eq!(
        err.validation_errors(),
        ["Either [docker] unix_socket or external_url options must be provided or enabled."]
    );
}

#[test]
fn malformed_boolean_is_not_a_validation_error() {
    let root = common::project_with_settings(&format!(
        "{}[docker]\nunix_socket = sometimes\n",
        common::MINIMAL
    ));
    let err = Settings::new().configure_in(root.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Cast { .. }));
    assert!(err.validation_errors().is_empty());
}

#[test]
fn second_configure_is_a_no_op() {
    let root = common::project_with_settings(common::MINIMAL);
    let mut settings = Settings::new();
    settings.configure_in(root.path()).unwrap();

    // Neither a changed nor a removed file is observed once configured.
    common::write_settings(root.path(), "[server]\nhostname = other.example.com\n");
    settings.configure_in(root.path()).unwrap();
    assert_eq!(settings.server.hostname.as_deref(), Some("foo.example.com"));

    fs::remove_file(root.path().join(SETTINGS_FILE_NAME)).unwrap();
    settings.configure_in(root.path()).unwrap();
    assert!(settings.configured());
}

#[test]
fn failed_configure_can_be_retried_after_fixing_file() {
    let root = common::project_with_settings("[server]\n");
    let mut settings = Settings::new();
    assert!(settings.configure_in(root.path()).is_err());
    assert!(!settings.configured());

    common::write_settings(root.path(), common::MINIMAL);
    settings.configure_in(root.path()).unwrap();
    assert!(settings.configured());
}

#[test]
fn malformed_logging_file_blocks_configuration() {
    let root = common::project_with_settings(common::MINIMAL);
    fs::write(root.path().join("logging.toml"), "filter = [\n").unwrap();

    let mut settings = Settings::new();
    let err = settings.configure_in(root.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Logging { .. }));
    assert!(!settings.configured());
}

#[test]
fn optional_groups_are_validated_only_when_present() {
    let root = common::project_with_settings(&format!(
        "{}[ldap]\nhostname = ldap.example.com\n[rhai]\n",
        common::MINIMAL
    ));
    let err = Settings::new().configure_in(root.path()).unwrap_err();
    assert_eq!(
        err.validation_errors(),
        ["All [ldap] basedn, grpbasedn, hostname, password, username options must be provided."]
    );
}

#[test]
fn mixed_case_option_names_configure() {
    let root = common::project_with_settings("[server]\nHostname = foo.example.com\nSSH_Password = x\n");
    let mut settings = Settings::new();
    settings.configure_in(root.path()).unwrap();

    assert_eq!(settings.server.hostname.as_deref(), Some("foo.example.com"));
    assert_eq!(settings.server.ssh_password.as_deref(), Some("x"));
}

#[test]
fn repeated_section_fails_before_validation() {
    let root =
        common::project_with_settings("[server]\nhostname = h\n[server]\nssh_password = x\n");
    let mut settings = Settings::new();
    let err = settings.configure_in(root.path()).unwrap_err();

    assert!(matches!(err, ConfigError::DuplicateSection { ref section, .. } if section == "server"));
    assert!(err.validation_errors().is_empty());
    assert!(!settings.configured());
}

#[test]
fn repeated_option_fails_before_validation() {
    let root = common::project_with_settings(
        "[server]\nhostname = first\nhostname = second\nssh_password = x\n",
    );
    let mut settings = Settings::new();
    let err = settings.configure_in(root.path()).unwrap_err();

    assert!(matches!(err, ConfigError::DuplicateOption { ref option, .. } if option == "hostname"));
    assert!(settings.server.hostname.is_none());
}
