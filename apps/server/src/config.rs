//! Server configuration
//!
//! Layered loading: built-in defaults, then an optional `config/default`
//! file, then `SETU_*` environment variables (section and key separated by
//! `__`, e.g. `SETU_SERVER__PORT=8080`). A `.env` file is honored for local
//! development.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub mapping: MappingConfig,
    pub namaste: NamasteConfig,
    pub icd11: Icd11Config,
    pub emr: EmrConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level applied to this crate's targets (`trace` .. `error`).
    pub level: String,
    /// Emit JSON log lines instead of the human-readable format.
    pub json: bool,
    pub file_enabled: bool,
    pub file_directory: String,
    pub file_prefix: String,
    /// One of `daily`, `hourly`, `minutely`, `never`.
    pub file_rotation: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    /// Path to the concept map JSON artifact loaded at startup.
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NamasteConfig {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Icd11Config {
    pub base_url: String,
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmrConfig {
    pub base_url: String,
    pub api_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            mapping: MappingConfig::default(),
            namaste: NamasteConfig::default(),
            icd11: Icd11Config::default(),
            emr: EmrConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file_enabled: false,
            file_directory: "logs".to_string(),
            file_prefix: "bridge-server".to_string(),
            file_rotation: "daily".to_string(),
        }
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("config/mapping.json"),
        }
    }
}

impl Default for NamasteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
        }
    }
}

impl Default for Icd11Config {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token_url: "https://icdaccessmanagement.who.int/connect/token".to_string(),
            client_id: String::new(),
            client_secret: String::new(),
        }
    }
}

impl Default for EmrConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
        }
    }
}

impl Config {
    /// Load configuration from defaults, the optional config file, and
    /// `SETU_*` environment variables (highest precedence).
    pub fn load() -> anyhow::Result<Self> {
        // Load .env if present; ignore a missing file.
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(
                config::Environment::with_prefix("SETU")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        // serde(default) on every section fills anything the sources omit.
        let loaded: Config = settings.try_deserialize()?;
        Ok(loaded)
    }

    /// Check cross-field requirements that serde defaults cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.host.is_empty() {
            return Err("server.host must not be empty".to_string());
        }
        if self.namaste.base_url.is_empty() {
            return Err("namaste.base_url is required".to_string());
        }
        if self.icd11.base_url.is_empty() {
            return Err("icd11.base_url is required".to_string());
        }
        if !self.icd11.client_id.is_empty() && self.icd11.client_secret.is_empty() {
            return Err("icd11.client_secret is required when icd11.client_id is set".to_string());
        }
        match self.logging.file_rotation.as_str() {
            "daily" | "hourly" | "minutely" | "never" => {}
            other => {
                return Err(format!(
                    "logging.file_rotation must be daily, hourly, minutely, or never (got {other})"
                ))
            }
        }
        Ok(())
    }

    /// The socket address to bind, from `server.host` and `server.port`.
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid listen address: {e}"))
    }
}
