//! Configuration file handling

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Service activation settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Local endpoint settings
    #[serde(default)]
    pub endpoint: EndpointConfig,

    /// Connection retry settings
    #[serde(default)]
    pub retry: RetryConfig,

    /// Transfer settings
    #[serde(default)]
    pub transfer: TransferConfig,
}

/// How the collection service gets started
#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    /// Name of the service to start
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Program used to write the control property
    #[serde(default = "default_control_program")]
    pub control_program: String,

    /// Control property that starts a named service
    #[serde(default = "default_control_property")]
    pub control_property: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            control_program: default_control_program(),
            control_property: default_control_property(),
        }
    }
}

fn default_service_name() -> String {
    "dumpstatez".to_string()
}
fn default_control_program() -> String {
    "setprop".to_string()
}
fn default_control_property() -> String {
    "ctl.start".to_string()
}

/// Where the service listens
#[derive(Debug, Deserialize)]
pub struct EndpointConfig {
    /// Socket name inside the reserved socket directory
    #[serde(default = "default_endpoint_name")]
    pub name: String,

    /// Reserved socket directory
    #[serde(default = "default_socket_dir")]
    pub socket_dir: PathBuf,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            name: default_endpoint_name(),
            socket_dir: default_socket_dir(),
        }
    }
}

fn default_endpoint_name() -> String {
    "dumpstate".to_string()
}
fn default_socket_dir() -> PathBuf {
    PathBuf::from("/dev/socket")
}

/// Connection retry settings
#[derive(Debug, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of connection attempts
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay between attempts in seconds
    #[serde(default = "default_delay")]
    pub delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_secs: default_delay(),
        }
    }
}

fn default_max_attempts() -> u32 {
    20
}
fn default_delay() -> u64 {
    1
}

/// Transfer settings
#[derive(Debug, Deserialize)]
pub struct TransferConfig {
    /// Give up when nothing is received for this many seconds
    #[serde(default = "default_inactivity_timeout")]
    pub inactivity_timeout_secs: u64,

    /// Size of the transfer buffer in bytes
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            inactivity_timeout_secs: default_inactivity_timeout(),
            buffer_size: default_buffer_size(),
        }
    }
}

// dumpstate never pauses for more than 60 seconds
fn default_inactivity_timeout() -> u64 {
    10 * 60
}
fn default_buffer_size() -> usize {
    64 * 1024
}

impl TransferConfig {
    /// Inactivity deadline applied to every receive
    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_secs(self.inactivity_timeout_secs)
    }
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    super::Error::FileRead {
                        path: path.display().to_string(),
                        error: e.to_string(),
                    }
                })?;
                tracing::debug!(path = %path.display(), "Loaded configuration file");
                return Self::parse(&content);
            }
        }
        Ok(Self::default())
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.retry.max_attempts == 0 {
            return Err(super::Error::ConfigParse(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.transfer.buffer_size == 0 {
            return Err(super::Error::ConfigParse(
                "transfer.buffer_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
