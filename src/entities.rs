//! Entity construction defaults.
//!
//! # Responsibilities
//! - Carry the default server connection (URL, credentials, TLS policy)
//! - Inject environment-derived defaults into entity records
//!
//! # Design Decisions
//! - No process-wide mutable state: collaborators receive an
//!   [`EntityFactory`] (or a [`ServerConfig`]) explicitly
//! - Values passed by the caller always win over injected defaults
//! - `create_missing` fills required-but-empty fields when building payloads

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::{json, Value};
use url::Url;
use uuid::Uuid;

/// Connection to the server under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerConfig {
    pub url: Url,
    #[serde(skip_serializing)]
    pub auth: (String, String),
    /// Verify the server TLS certificate.
    pub verify: bool,
}

impl ServerConfig {
    pub fn new(url: Url, auth: (String, String), verify: bool) -> Self {
        Self { url, auth, verify }
    }

    /// HTTP client honouring [`verify`](Self::verify).
    pub fn http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        reqwest::Client::builder()
            .danger_accept_invalid_certs(!self.verify)
            .build()
    }

    /// Absolute API URL for `path`, e.g. `api/v2/gpg_keys`.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.url.join(path)
    }
}

/// Defaults applied to every entity built through an [`EntityFactory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityDefaults {
    /// Generate values for required fields left empty.
    pub create_missing: bool,
    pub server_config: ServerConfig,
    /// Default `content` of a GPG key.
    pub gpg_key_content: PathBuf,
    /// Default `url` of a docker compute resource.
    pub docker_url: Option<String>,
}

/// Builds entity records with [`EntityDefaults`] applied.
#[derive(Debug, Clone)]
pub struct EntityFactory {
    defaults: EntityDefaults,
}

impl EntityFactory {
    pub fn new(defaults: EntityDefaults) -> Self {
        Self { defaults }
    }

    pub fn server_config(&self) -> &ServerConfig {
        &self.defaults.server_config
    }

    pub fn gpg_key(&self) -> GpgKey {
        GpgKey {
            server_config: self.defaults.server_config.clone(),
            create_missing: self.defaults.create_missing,
            name: None,
            content: self.defaults.gpg_key_content.clone(),
        }
    }

    pub fn docker_compute_resource(&self) -> DockerComputeResource {
        DockerComputeResource {
            server_config: self.defaults.server_config.clone(),
            create_missing: self.defaults.create_missing,
            name: None,
            url: self.defaults.docker_url.clone(),
        }
    }
}

fn generated_name(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// GPG key entity.
#[derive(Debug, Clone)]
pub struct GpgKey {
    pub server_config: ServerConfig,
    create_missing: bool,
    pub name: Option<String>,
    /// Path of the file holding the ASCII-armored key.
    pub content: PathBuf,
}

impl GpgKey {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<PathBuf>) -> Self {
        self.content = content.into();
        self
    }

    /// Creation payload. Reads the key file.
    pub fn payload(&self) -> io::Result<Value> {
        let content = fs::read_to_string(&self.content)?;
        let name = match (&self.name, self.create_missing) {
            (Some(name), _) => Value::String(name.clone()),
            (None, true) => Value::String(generated_name("gpgkey")),
            (None, false) => Value::Null,
        };
        Ok(json!({ "gpg_key": { "name": name, "content": content } }))
    }
}

/// Docker compute resource entity.
#[derive(Debug, Clone)]
pub struct DockerComputeResource {
    pub server_config: ServerConfig,
    create_missing: bool,
    pub name: Option<String>,
    pub url: Option<String>,
}

impl DockerComputeResource {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn payload(&self) -> Value {
        let mut resource = json!({ "provider": "Docker" });
        if let Some(name) = self
            .name
            .clone()
            .or_else(|| self.create_missing.then(|| generated_name("docker")))
        {
            resource["name"] = Value::String(name);
        }
        if let Some(url) = &self.url {
            resource["url"] = Value::String(url.clone());
        }
        json!({ "compute_resource": resource })
    }
}
