use std::fmt;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EndpointError {
    #[error("O campo servidor não pode estar vazio!")]
    EmptyHost,
    #[error("servidor inválido '{host}': {message}")]
    InvalidHost { host: String, message: String },
    #[error("porta inválida: {0}")]
    InvalidPort(u16),
}

/// Address of the counting service. Cloned into every dispatch so that a later
/// reconfiguration never redirects a call that is already in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEndpoint {
    host: String,
    port: u16,
}

impl ServerEndpoint {
    pub fn new(host: &str, port: u16) -> Result<Self, EndpointError> {
        let host = host.trim();
        if host.is_empty() {
            return Err(EndpointError::EmptyHost);
        }
        if port == 0 {
            return Err(EndpointError::InvalidPort(port));
        }
        url::Host::parse(host).map_err(|err| EndpointError::InvalidHost {
            host: host.to_string(),
            message: err.to_string(),
        })?;

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn process_url(&self) -> String {
        format!("{}/process", self.base_url())
    }

    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url())
    }
}

impl Default for ServerEndpoint {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl fmt::Display for ServerEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base_url())
    }
}
