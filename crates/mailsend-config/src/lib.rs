use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

const APP_DIR: &str = "mailsend";
const CONFIG_FILENAME: &str = "config.toml";

pub const API_URL_ENV: &str = "MAILSEND_API_URL";
pub const DEFAULT_API_URL: &str = "https://toggl-hire-frontend-homework.onrender.com/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = "mailsend";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            http: HttpConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid api_url value: {0}")]
    InvalidApiUrl(String),
    #[error("invalid http.{field} value: {value}")]
    InvalidHttpField { field: &'static str, value: String },
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    api_url: Option<String>,
    http: Option<HttpFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct HttpFile {
    timeout_secs: Option<u64>,
    connect_timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

/// Loads the config file, then applies `MAILSEND_API_URL` on top.
pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let mut config = load_file(config_path)?;
    if let Some(raw) = env::var_os(API_URL_ENV) {
        let raw = raw.to_string_lossy();
        if !raw.trim().is_empty() {
            config.api_url = validate_api_url(&raw)?;
        }
    }
    Ok(config)
}

fn load_file(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

/// Accepts absolute `http`/`https` URLs and strips trailing slashes.
pub fn validate_api_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|_| ConfigError::InvalidApiUrl(trimmed.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(ConfigError::InvalidApiUrl(trimmed.to_string()));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(api_url) = parsed.api_url {
        config.api_url = validate_api_url(&api_url)?;
    }

    if let Some(http) = parsed.http {
        if let Some(timeout) = http.timeout_secs {
            if timeout == 0 {
                return Err(invalid_http_field("timeout_secs", timeout));
            }
            config.http.timeout_secs = timeout;
        }
        if let Some(timeout) = http.connect_timeout_secs {
            if timeout == 0 {
                return Err(invalid_http_field("connect_timeout_secs", timeout));
            }
            config.http.connect_timeout_secs = timeout;
        }
        if let Some(user_agent) = http.user_agent {
            let trimmed = user_agent.trim();
            if trimmed.is_empty() {
                return Err(invalid_http_field("user_agent", user_agent));
            }
            config.http.user_agent = trimmed.to_string();
        }
    }

    Ok(config)
}

fn invalid_http_field(field: &'static str, value: impl ToString) -> ConfigError {
    ConfigError::InvalidHttpField {
        field,
        value: value.to_string(),
    }
}
