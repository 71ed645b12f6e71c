use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default datasource file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "dbconfig.yml";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("No datasource configured for the {0} environment")]
    MissingDatasource(Environment),
}

/// Running environment; selects which datasource section is used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Environment {
    #[default]
    Development,
    Preproduction,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => f.write_str("development"),
            Environment::Preproduction => f.write_str("preproduction"),
        }
    }
}

/// Shape of `dbconfig.yml`: one section per environment
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasourceFile {
    #[serde(default)]
    pub development: Option<DatabaseConfig>,
    #[serde(default)]
    pub preproduction: Option<DatabaseConfig>,
}

impl DatasourceFile {
    fn section(&self, environment: Environment) -> Option<&DatabaseConfig> {
        match environment {
            Environment::Development => self.development.as_ref(),
            Environment::Preproduction => self.preproduction.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub datasource: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            datasource: String::new(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ApiConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Process configuration, built once at startup and handed to whoever needs it
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
}

impl AppConfig {
    /// Load the datasource file (if present) and apply process environment overrides.
    ///
    /// A missing file is not an error as long as `DATABASE_URL` supplies the datasource.
    pub fn load(path: impl AsRef<Path>, environment: Environment) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            serde_yaml::from_str::<DatasourceFile>(&raw)?
        } else {
            tracing::debug!("Configuration file {} not found, relying on environment", path.display());
            DatasourceFile::default()
        };

        Self::from_file(&file, environment)
            .with_overrides(|key| env::var(key).ok())
            .validated()
    }

    /// Defaults plus process environment overrides, with no datasource requirement
    pub fn for_environment(environment: Environment) -> Self {
        Self::from_file(&DatasourceFile::default(), environment).with_overrides(|key| env::var(key).ok())
    }

    /// Parse YAML text without touching the process environment
    pub fn from_yaml(yaml: &str, environment: Environment) -> Result<Self, ConfigError> {
        let file: DatasourceFile = serde_yaml::from_str(yaml)?;
        Self::from_file(&file, environment).validated()
    }

    fn from_file(file: &DatasourceFile, environment: Environment) -> Self {
        Self {
            environment,
            database: file.section(environment).cloned().unwrap_or_default(),
            api: ApiConfig::default(),
        }
    }

    /// Apply overrides from a key lookup (the process environment in production)
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            self.database.datasource = v;
        }
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connect_timeout_secs = v.parse().unwrap_or(self.database.connect_timeout_secs);
        }
        if let Some(v) = lookup("ARTWORKS_API_PORT").or_else(|| lookup("PORT")) {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }
        if let Some(v) = lookup("ARTWORKS_API_HOST") {
            self.api.host = v;
        }

        self
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.database.datasource.trim().is_empty() {
            return Err(ConfigError::MissingDatasource(self.environment));
        }
        Ok(self)
    }
}
