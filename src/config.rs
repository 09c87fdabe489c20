use std::{env, io, net, path::PathBuf};

use derive_more::{Display, From};
use serde::Deserialize;

/// Name of the environment variable overriding [`Server::port`].
pub const PORT_VAR: &str = "PORT";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: Http,
    pub seed: Seed,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Http {
    pub server: Server,
    pub cors: Cors,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Server {
    pub host: net::IpAddr,
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: net::Ipv4Addr::UNSPECIFIED.into(),
            port: 3000,
        }
    }
}

impl Server {
    pub fn addr(&self) -> net::SocketAddr {
        net::SocketAddr::new(self.host, self.port)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Cors {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Seed {
    /// Seed file to load instead of the bundled one.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Display, From)]
pub enum Error {
    #[display("failed to read config: {_0}")]
    Io(io::Error),
    #[display("malformed config: {_0}")]
    Toml(toml::de::Error),
    #[from(ignore)]
    #[display("invalid PORT value: {_0:?}")]
    InvalidPort(String),
}

impl std::error::Error for Error {}

impl Config {
    /// Parses `raw` as TOML, then applies the `PORT` override.
    pub fn from_toml(raw: &str, port: Option<String>) -> Result<Self, Error> {
        let mut config = toml::from_str::<Self>(raw)?;
        config.apply_port(port)?;
        Ok(config)
    }

    /// Loads `path` when it exists (defaults otherwise) and applies the
    /// `PORT` environment variable.
    pub async fn load(path: &str) -> Result<Self, Error> {
        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        Self::from_toml(&raw, env::var(PORT_VAR).ok())
    }

    fn apply_port(&mut self, port: Option<String>) -> Result<(), Error> {
        match port.as_deref().map(str::trim) {
            None | Some("") => Ok(()),
            Some(raw) => {
                self.http.server.port =
                    raw.parse().map_err(|_| Error::InvalidPort(raw.into()))?;
                Ok(())
            }
        }
    }
}
