//! `[server]` settings and the URLs derived from them.

use url::Url;

use crate::config::casts::Number;
use crate::config::error::ConfigError;
use crate::config::reader::IniReader;
use crate::config::validation::{fields, Rule};

use super::FeatureSettings;

const SECTION: &str = "server";
const DEFAULT_SCHEME: &str = "https";
const CERT_RPM: &str = "katello-ca-consumer-latest.noarch.rpm";

/// Server under test.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerSettings {
    pub admin_password: Option<String>,
    pub admin_username: Option<String>,
    pub hostname: Option<String>,
    pub port: Option<u16>,
    pub scheme: Option<String>,
    pub ssh_key: Option<String>,
    pub ssh_password: Option<String>,
    pub ssh_username: Option<String>,
}

impl ServerSettings {
    /// Username and password for the server API.
    pub fn get_credentials(&self) -> (String, String) {
        (
            self.admin_username.clone().unwrap_or_default(),
            self.admin_password.clone().unwrap_or_default(),
        )
    }

    /// Base URL: `scheme://hostname[:port]`, no trailing slash.
    ///
    /// `scheme` falls back to `https` when unset or empty. An explicit port
    /// never changes the scheme, so port 80 without a scheme still yields
    /// `https://host:80`. A zero port is treated as unset.
    pub fn get_url(&self) -> String {
        let scheme = self
            .scheme
            .as_deref()
            .filter(|scheme| !scheme.is_empty())
            .unwrap_or(DEFAULT_SCHEME);
        let hostname = self.hostname.as_deref().unwrap_or_default();
        match self.port {
            Some(port) if port != 0 => format!("{scheme}://{hostname}:{port}"),
            _ => format!("{scheme}://{hostname}"),
        }
    }

    /// `http://<hostname>/pub/`, whatever the configured scheme and port.
    pub fn get_pub_url(&self) -> String {
        format!("http://{}/pub/", self.hostname.as_deref().unwrap_or_default())
    }

    /// The CA consumer RPM published under the pub directory.
    pub fn get_cert_rpm_url(&self) -> Result<String, ConfigError> {
        let pub_url = self.get_pub_url();
        let base = Url::parse(&pub_url).map_err(|source| ConfigError::InvalidUrl {
            url: pub_url.clone(),
            source,
        })?;
        let rpm = base.join(CERT_RPM).map_err(|source| ConfigError::InvalidUrl {
            url: pub_url,
            source,
        })?;
        Ok(rpm.into())
    }
}

impl FeatureSettings for ServerSettings {
    fn section(&self) -> &'static str {
        SECTION
    }

    fn read(&mut self, reader: &IniReader) -> Result<(), ConfigError> {
        self.admin_password = Some(reader.get_str(SECTION, "admin_password", "changeme"));
        self.admin_username = Some(reader.get_str(SECTION, "admin_username", "admin"));
        self.hostname = reader.get_str_opt(SECTION, "hostname");
        self.port = reader.get_opt(SECTION, "port", Number::<u16>::new())?;
        self.scheme = Some(reader.get_str(SECTION, "scheme", DEFAULT_SCHEME));
        self.ssh_key = reader.get_str_opt(SECTION, "ssh_key");
        self.ssh_password = reader.get_str_opt(SECTION, "ssh_password");
        self.ssh_username = Some(reader.get_str(SECTION, "ssh_username", "root"));
        Ok(())
    }

    fn rules(&self) -> Vec<Rule<'_>> {
        vec![
            Rule::required(&self.hostname, "[server] hostname must be provided."),
            Rule::any_set(
                fields![self.ssh_key, self.ssh_password],
                "[server] ssh_key or ssh_password must be provided.",
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(content: &str) -> ServerSettings {
        let reader = IniReader::parse(content, "test.properties").unwrap();
        let mut server = ServerSettings::default();
        server.read(&reader).unwrap();
        server
    }

    #[test]
    fn defaults_are_applied() {
        let server = read("[server]\nhostname = sat.example.com\nssh_password = x\n");
        assert_eq!(server.admin_username.as_deref(), Some("admin"));
        assert_eq!(server.admin_password.as_deref(), Some("changeme"));
        assert_eq!(server.scheme.as_deref(), Some("https"));
        assert_eq!(server.ssh_username.as_deref(), Some("root"));
        assert_eq!(server.port, None);
        assert!(server.validate().is_empty());
    }

    #[test]
    fn hostname_and_ssh_auth_are_required() {
        let server = read("[server]\n");
        assert_eq!(
            server.validate(),
            vec![
                "[server] hostname must be provided.",
                "[server] ssh_key or ssh_password must be provided.",
            ]
        );

        let server = read("[server]\nhostname = h\nssh_key = /root/.ssh/id_rsa\n");
        assert!(server.validate().is_empty());

        let server = read("[server]\nhostname = h\nssh_password =\n");
        assert!(server.validate().is_empty());
    }

    #[test]
    fn url_keeps_https_with_explicit_port() {
        let server = read("[server]\nhostname = h\nport = 8080\n");
        assert_eq!(server.get_url(), "https://h:8080");

        let server = read("[server]\nhostname = h\nport = 80\n");
        assert_eq!(server.get_url(), "https://h:80");
    }

    #[test]
    fn url_uses_configured_scheme() {
        let server = read("[server]\nhostname = h\nscheme = http\n");
        assert_eq!(server.get_url(), "http://h");

        let mut server = read("[server]\nhostname = h\n");
        server.scheme = Some(String::new());
        assert_eq!(server.get_url(), "https://h");
    }

    #[test]
    fn pub_and_cert_urls() {
        let server = read("[server]\nhostname = sat.example.com\nscheme = https\nport = 443\n");
        assert_eq!(server.get_pub_url(), "http://sat.example.com/pub/");
        assert_eq!(
            server.get_cert_rpm_url().unwrap(),
            "http://sat.example.com/pub/katello-ca-consumer-latest.noarch.rpm"
        );
    }

    #[test]
    fn credentials_pair() {
        let server = read("[server]\nadmin_username = root\nadmin_password = secret\n");
        assert_eq!(
            server.get_credentials(),
            ("root".to_string(), "secret".to_string())
        );
    }

    #[test]
    fn malformed_port_is_a_cast_error() {
        let reader = IniReader::parse("[server]\nport = https\n", "test.properties").unwrap();
        let err = ServerSettings::default().read(&reader).unwrap_err();
        assert!(matches!(err, ConfigError::Cast { ref option, .. } if option == "port"));
    }
}
