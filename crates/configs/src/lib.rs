use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// Where the two JSON record documents live.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_leads_file")]
    pub leads_file: String,
    #[serde(default = "default_users_file")]
    pub users_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            leads_file: default_leads_file(),
            users_file: default_users_file(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FrontendConfig {
    #[serde(default = "default_frontend_dir")]
    pub dir: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self { dir: default_frontend_dir() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { format: default_log_format() }
    }
}

fn default_data_dir() -> String { "data".into() }
fn default_leads_file() -> String { "responses.json".into() }
fn default_users_file() -> String { "users.json".into() }
fn default_frontend_dir() -> String { "frontend".into() }
fn default_log_format() -> String { "compact".into() }

pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_default() -> Result<AppConfig> {
    load_from_file(&config_path())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load the config file, falling back to defaults when it does not exist,
    /// then apply env overrides and validate. A file that exists but fails to
    /// parse is an error.
    pub fn load_and_validate() -> Result<Self> {
        let path = config_path();
        let mut cfg = if Path::new(&path).exists() {
            load_from_file(&path).map_err(|e| anyhow!("{path}: {e}"))?
        } else {
            AppConfig::default()
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.normalize_from_env();
        self.server.normalize()?;
        self.storage.validate()?;
        Ok(())
    }

    /// Environment variables win over file values.
    pub fn normalize_from_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Ok(dir) = std::env::var("DATA_DIR") {
            self.storage.data_dir = dir;
        }
        if let Ok(dir) = std::env::var("FRONTEND_DIR") {
            self.frontend.dir = dir;
        }
        if let Ok(format) = std::env::var("LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.trim().is_empty() {
            return Err(anyhow!("storage.data_dir is empty"));
        }
        for (key, name) in [("storage.leads_file", &self.leads_file), ("storage.users_file", &self.users_file)] {
            if name.trim().is_empty() {
                return Err(anyhow!("{key} is empty"));
            }
            if name.contains('/') || name.contains('\\') {
                return Err(anyhow!("{key} must be a bare file name, got {name:?}"));
            }
        }
        if self.leads_file == self.users_file {
            return Err(anyhow!("storage.leads_file and storage.users_file must differ"));
        }
        Ok(())
    }

    pub fn leads_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.leads_file)
    }

    pub fn users_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.users_file)
    }
}
