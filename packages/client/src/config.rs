//! Endpoint configuration.
//!
//! Values are layered lowest to highest: built-in defaults, the daemon's
//! JSON settings file (when `STATUS_SETTINGS` names one), then individual
//! environment overrides.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ClientError;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5747;

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: Endpoint,
    /// Upper bound on connect plus reply. `None` waits forever.
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Tcp,
    Ipc,
    Pgm,
    Epgm,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::Ipc => "ipc",
            Protocol::Pgm => "pgm",
            Protocol::Epgm => "epgm",
        }
    }
}

impl FromStr for Protocol {
    type Err = ClientError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "tcp" => Ok(Protocol::Tcp),
            "ipc" => Ok(Protocol::Ipc),
            "pgm" => Ok(Protocol::Pgm),
            "epgm" => Ok(Protocol::Epgm),
            other => Err(ClientError::config(format!("Invalid protocol: {}", other))),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Address the client connects its socket to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Tcp { host: String, port: u16 },
    Ipc { path: PathBuf },
}

impl Default for Endpoint {
    fn default() -> Self {
        Endpoint::Tcp {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Tcp { host, port } => write!(f, "tcp://{}:{}", host, port),
            Endpoint::Ipc { path } => write!(f, "ipc://{}", path.display()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            timeout: None,
        }
    }
}

/// The subset of the daemon's settings file that decides where it binds.
#[derive(Debug, Default, Deserialize)]
struct DaemonSettings {
    protocol: Option<String>,
    port: Option<u64>,
}

/// Settings collected from every layer before the endpoint is built.
#[derive(Debug)]
struct Layers {
    protocol: Protocol,
    host: String,
    port: u16,
    ipc_path: Option<PathBuf>,
    timeout: Option<Duration>,
    /// Protocol was last set by the daemon's settings file.
    protocol_from_settings: bool,
}

impl Default for Layers {
    fn default() -> Self {
        Self {
            protocol: Protocol::Tcp,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            ipc_path: None,
            timeout: None,
            protocol_from_settings: false,
        }
    }
}

impl Layers {
    fn apply_settings(&mut self, settings: DaemonSettings) -> Result<(), ClientError> {
        // The daemon binds tcp for any protocol name it does not know.
        if let Some(protocol) = settings.protocol {
            self.protocol = protocol.parse().unwrap_or_else(|_| {
                tracing::warn!("Unknown protocol {:?} in settings, using tcp", protocol);
                Protocol::Tcp
            });
            self.protocol_from_settings = true;
        }
        if let Some(port) = settings.port {
            self.port = u16::try_from(port)
                .ok()
                .filter(|port| *port != 0)
                .ok_or_else(|| ClientError::config(format!("Invalid port in settings: {}", port)))?;
        }
        Ok(())
    }

    fn into_config(self) -> Result<Config, ClientError> {
        let endpoint = match self.protocol {
            Protocol::Tcp => Endpoint::Tcp {
                host: self.host,
                port: self.port,
            },
            Protocol::Ipc => {
                let path = match self.ipc_path {
                    Some(path) => path,
                    // Same address the daemon binds: `ipc://*:<port>`.
                    None if self.protocol_from_settings => {
                        PathBuf::from(format!("*:{}", self.port))
                    }
                    None => return Err(ClientError::config("STATUS_IPC_PATH is required for ipc")),
                };
                Endpoint::Ipc { path }
            }
            unsupported => {
                return Err(ClientError::config(format!(
                    "Unsupported protocol for a request client: {}",
                    unsupported
                )))
            }
        };

        Ok(Config {
            endpoint,
            timeout: self.timeout,
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut layers = Layers::default();

        if let Some(path) = lookup("STATUS_SETTINGS") {
            layers.apply_settings(read_settings(Path::new(&path))?)?;
        }

        if let Some(protocol) = lookup("STATUS_PROTOCOL") {
            layers.protocol = protocol.parse()?;
            layers.protocol_from_settings = false;
        }

        if let Some(host) = lookup("STATUS_HOST") {
            if host.is_empty() {
                return Err(ClientError::config("STATUS_HOST must not be empty"));
            }
            layers.host = host;
        }

        if let Some(port) = lookup("STATUS_PORT") {
            layers.port = port
                .parse::<u16>()
                .ok()
                .filter(|port| *port != 0)
                .ok_or_else(|| ClientError::config("STATUS_PORT must be a valid port number"))?;
        }

        if let Some(path) = lookup("STATUS_IPC_PATH") {
            layers.ipc_path = Some(PathBuf::from(path));
        }

        if let Some(secs) = lookup("STATUS_TIMEOUT_SECS") {
            let secs = secs
                .parse::<f64>()
                .ok()
                .filter(|secs| secs.is_finite() && *secs > 0.0)
                .ok_or_else(|| {
                    ClientError::config("STATUS_TIMEOUT_SECS must be a positive number")
                })?;
            layers.timeout = Some(Duration::from_secs_f64(secs));
        }

        layers.into_config()
    }
}

fn read_settings(path: &Path) -> Result<DaemonSettings, ClientError> {
    let raw = fs::read_to_string(path).map_err(|err| {
        ClientError::config(format!("Unable to read {}: {}", path.display(), err))
    })?;
    parse_settings(&raw)
        .map_err(|err| ClientError::config(format!("{}: {}", path.display(), err)))
}

fn parse_settings(raw: &str) -> Result<DaemonSettings, serde_json::Error> {
    serde_json::from_str(raw)
}
