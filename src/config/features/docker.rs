//! `[docker]` settings.

use crate::config::casts::Boolean;
use crate::config::error::ConfigError;
use crate::config::reader::IniReader;
use crate::config::validation::{fields, Rule};

use super::FeatureSettings;

const SECTION: &str = "docker";

/// Local docker daemon socket on the server under test.
pub const DOCKER_UNIX_SOCKET_URL: &str = "unix:///var/run/docker.sock";

/// Docker compute resource endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DockerSettings {
    pub unix_socket: Option<bool>,
    pub external_url: Option<String>,
}

impl DockerSettings {
    /// The local socket URL when `unix_socket` is enabled.
    ///
    /// The server's docker daemon must let the `foreman` user access the
    /// socket (add it to the `docker` group and restart the daemon).
    pub fn get_unix_socket_url(&self) -> Option<&'static str> {
        (self.unix_socket == Some(true)).then_some(DOCKER_UNIX_SOCKET_URL)
    }

    /// Preferred docker URL: the unix socket, else the external URL.
    pub fn preferred_url(&self) -> Option<String> {
        self.get_unix_socket_url()
            .map(str::to_string)
            .or_else(|| self.external_url.clone())
    }
}

impl FeatureSettings for DockerSettings {
    fn section(&self) -> &'static str {
        SECTION
    }

    fn read(&mut self, reader: &IniReader) -> Result<(), ConfigError> {
        self.unix_socket = Some(reader.get(SECTION, "unix_socket", false, Boolean)?);
        self.external_url = reader.get_str_opt(SECTION, "external_url");
        Ok(())
    }

    fn rules(&self) -> Vec<Rule<'_>> {
        vec![Rule::any_of(
            fields![self.unix_socket, self.external_url],
            "Either [docker] unix_socket or external_url options must be provided or enabled.",
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(content: &str) -> DockerSettings {
        let reader = IniReader::parse(content, "test.properties").unwrap();
        let mut docker = DockerSettings::default();
        docker.read(&reader).unwrap();
        docker
    }

    #[test]
    fn unix_socket_url_follows_flag() {
        let docker = read("[docker]\nunix_socket = true\n");
        assert_eq!(docker.get_unix_socket_url(), Some(DOCKER_UNIX_SOCKET_URL));
        assert!(docker.validate().is_empty());

        let docker = read("[docker]\nunix_socket = 0\nexternal_url = http://d:2375\n");
        assert_eq!(docker.get_unix_socket_url(), None);
        assert_eq!(docker.preferred_url().as_deref(), Some("http://d:2375"));
        assert!(docker.validate().is_empty());
    }

    #[test]
    fn socket_wins_over_external_url() {
        let docker = read("[docker]\nunix_socket = 1\nexternal_url = http://d:2375\n");
        assert_eq!(docker.preferred_url().as_deref(), Some(DOCKER_UNIX_SOCKET_URL));
    }

    #[test]
    fn neither_option_fails_validation() {
        let docker = read("[docker]\nunix_socket = false\n");
        assert_eq!(docker.unix_socket, Some(false));
        assert_eq!(
            docker.validate(),
            vec!["Either [docker] unix_socket or external_url options must be provided or enabled."]
        );

        let docker = read("[docker]\nexternal_url =\n");
        assert_eq!(docker.validate().len(), 1);
    }

    #[test]
    fn unread_group_has_no_socket() {
        assert_eq!(DockerSettings::default().get_unix_socket_url(), None);
        assert_eq!(DockerSettings::default().preferred_url(), None);
    }
}
