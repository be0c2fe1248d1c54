use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub mail: MailConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4), static_dir: default_static_dir() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_file")]
    pub data_file: String,
    /// Write a skeleton document when `data_file` does not exist.
    #[serde(default)]
    pub seed_if_missing: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_file: default_data_file(), seed_if_missing: false }
    }
}

/// Outbound notification settings for contact submissions.
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    #[serde(default)]
    pub relay_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_mail_from")]
    pub from: String,
    #[serde(default)]
    pub recipient: Option<String>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self { relay_url: None, api_key: None, from: default_mail_from(), recipient: None }
    }
}

fn default_static_dir() -> String { "frontend".into() }
fn default_data_file() -> String { "data/db.json".into() }
fn default_mail_from() -> String { "no-reply@localhost".into() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

/// Build the configuration purely from environment variables.
pub fn from_env() -> AppConfig {
    let mut cfg = AppConfig::default();
    if let Ok(host) = std::env::var("SERVER_HOST") {
        cfg.server.host = host;
    }
    if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        cfg.server.port = port;
    }
    cfg.server.worker_threads = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok());
    if let Ok(dir) = std::env::var("STATIC_DIR") {
        cfg.server.static_dir = dir;
    }
    cfg
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`), falling back to the environment
    /// when the file is absent, then normalize and validate. A file that
    /// exists but does not parse is an error.
    pub fn load_and_validate() -> Result<Self> {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path).map_err(|e| anyhow!("cannot load {path}: {e}"))?
        } else {
            from_env()
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.storage.normalize_from_env();
        self.storage.validate()?;
        self.mail.normalize_from_env();
        self.mail.validate()?;
        Ok(())
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
        if self.worker_threads == Some(0) {
            self.worker_threads = Some(4);
        }
        if self.static_dir.trim().is_empty() {
            self.static_dir = default_static_dir();
        }
        Ok(())
    }
}

impl StorageConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(path) = std::env::var("DATA_FILE") {
            if !path.trim().is_empty() {
                self.data_file = path;
            }
        }
        if let Some(seed) = env_non_empty("SEED_IF_MISSING").as_deref().and_then(parse_flag) {
            self.seed_if_missing = seed;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_file.trim().is_empty() {
            return Err(anyhow!("storage.data_file is empty; set it in config.toml or DATA_FILE"));
        }
        Ok(())
    }
}

/// `true`/`1`/`yes`/`on` and their negatives; anything else is ignored.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl MailConfig {
    pub fn normalize_from_env(&mut self) {
        if self.relay_url.is_none() {
            self.relay_url = env_non_empty("MAIL_RELAY_URL");
        }
        if self.api_key.is_none() {
            self.api_key = env_non_empty("MAIL_API_KEY");
        }
        if let Some(from) = env_non_empty("MAIL_FROM") {
            self.from = from;
        }
        if self.recipient.is_none() {
            self.recipient = env_non_empty("CONTACT_RECIPIENT");
        }
        if self.from.trim().is_empty() {
            self.from = default_mail_from();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.relay_url {
            let lower = url.to_lowercase();
            if !(lower.starts_with("http://") || lower.starts_with("https://")) {
                return Err(anyhow!("mail.relay_url must start with http:// or https://"));
            }
        }
        Ok(())
    }

    /// Relay delivery is only possible with both an endpoint and a recipient.
    pub fn relay_enabled(&self) -> bool {
        self.relay_url.is_some() && self.recipient.is_some()
    }
}
