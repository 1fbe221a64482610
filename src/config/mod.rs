use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

use crate::types::error::{GuardError, Result};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub emailrep: EmailRepConfig,
    pub store: StoreConfig,
}

/// HTTP listener and static page settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,

    pub port: u16,

    /// Directory served for every path that is not under `/api`
    pub static_dir: PathBuf,
}

/// EmailRep lookup service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailRepConfig {
    pub base_url: String,

    /// Sent as the `Key` header when present
    pub api_key: Option<String>,

    /// EmailRep rejects requests without a User-Agent
    pub user_agent: String,

    pub timeout_secs: u64,
}

/// Lookup store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Explicit backend; picked from the available credentials when unset
    pub backend: Option<StoreBackend>,

    pub supabase: SupabaseConfig,

    pub sqlite_path: PathBuf,
}

/// Hosted table store (PostgREST) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SupabaseConfig {
    pub url: Option<String>,
    pub key: Option<String>,
    pub table: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Supabase,
    Sqlite,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "supabase" | "rest" => Ok(Self::Supabase),
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(GuardError::Config(format!("Unknown store backend: {}", other))),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: PathBuf::from("public"),
        }
    }
}

impl Default for EmailRepConfig {
    fn default() -> Self {
        Self {
            base_url: "https://emailrep.io".to_string(),
            api_key: None,
            user_agent: "EmailGuard/1.0".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: None,
            supabase: SupabaseConfig::default(),
            sqlite_path: default_sqlite_path(),
        }
    }
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            key: None,
            table: "email_lookups".to_string(),
        }
    }
}

impl StoreConfig {
    /// Resolve which backend to open.
    ///
    /// Without an explicit choice the hosted store wins when both its URL
    /// and key are set, otherwise lookups only live in memory.
    pub fn resolved_backend(&self) -> Result<StoreBackend> {
        let has_supabase = self.supabase.url.is_some() && self.supabase.key.is_some();

        match self.backend {
            Some(StoreBackend::Supabase) if !has_supabase => Err(GuardError::Config(
                "supabase backend requires SUPABASE_URL and a Supabase key".to_string(),
            )),
            Some(backend) => Ok(backend),
            None if has_supabase => Ok(StoreBackend::Supabase),
            None => {
                warn!("Missing SUPABASE_URL or Supabase key, lookups are kept in memory only");
                Ok(StoreBackend::Memory)
            }
        }
    }
}

fn default_sqlite_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("emailguard").join("lookups.db"))
        .unwrap_or_else(|| PathBuf::from("emailguard.db"))
}

/// Get default config paths
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("emailguard").join("config.toml"));
    }

    if let Some(home_dir) = dirs::home_dir() {
        paths.push(home_dir.join(".config").join("emailguard").join("config.toml"));
    }

    paths
}

/// Load configuration from file (if any) and the process environment
pub fn load() -> Result<AppConfig> {
    let var = |key: &str| std::env::var(key).ok();

    let mut config = match config_file(var, &default_config_paths()) {
        Some(path) => load_from_path(&path)?,
        None => {
            info!("No config file found, using defaults");
            AppConfig::default()
        }
    };

    apply_env(&mut config, var)?;
    Ok(config)
}

/// Pick the config file to read.
///
/// `EMAILGUARD_CONFIG` wins even when the file is missing, so a typo fails
/// loudly. Otherwise the first existing candidate is used.
pub fn config_file<F>(var: F, candidates: &[PathBuf]) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    match var("EMAILGUARD_CONFIG").filter(|v| !v.trim().is_empty()) {
        Some(path) => Some(PathBuf::from(path)),
        None => candidates.iter().find(|p| p.exists()).cloned(),
    }
}

/// Load configuration from a specific TOML file
pub fn load_from_path(path: &Path) -> Result<AppConfig> {
    info!("Loading configuration from: {:?}", path);

    let content = fs::read_to_string(path)
        .map_err(|e| GuardError::Config(format!("Failed to read config: {}", e)))?;

    toml::from_str(&content)
        .map_err(|e| GuardError::Config(format!("Failed to parse config: {}", e)))
}

/// Overlay environment variables on top of `config`.
///
/// `var` is the lookup function so tests don't touch the process environment.
pub fn apply_env<F>(config: &mut AppConfig, var: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let first = |keys: &[&str]| {
        keys.iter()
            .copied()
            .find_map(|key| var(key).filter(|v| !v.trim().is_empty()))
    };

    if let Some(host) = first(&["HOST"]) {
        config.server.host = host;
    }
    if let Some(port) = first(&["PORT"]) {
        config.server.port = parse_var("PORT", &port)?;
    }
    if let Some(dir) = first(&["STATIC_DIR"]) {
        config.server.static_dir = PathBuf::from(dir);
    }

    if let Some(url) = first(&["EMAILREP_BASE_URL"]) {
        config.emailrep.base_url = url;
    }
    if let Some(key) = first(&["EMAILREP_API_KEY", "EMAILREP_KEY"]) {
        config.emailrep.api_key = Some(key);
    }
    if let Some(agent) = first(&["EMAILREP_USER_AGENT"]) {
        config.emailrep.user_agent = agent;
    }
    if let Some(secs) = first(&["EMAILREP_TIMEOUT_SECS"]) {
        config.emailrep.timeout_secs = parse_var("EMAILREP_TIMEOUT_SECS", &secs)?;
    }

    if let Some(backend) = first(&["STORE_BACKEND"]) {
        config.store.backend = Some(backend.parse()?);
    }
    if let Some(url) = first(&["SUPABASE_URL"]) {
        config.store.supabase.url = Some(url);
    }
    if let Some(key) = first(&["SUPABASE_SERVICE_ROLE_KEY", "SUPABASE_ANON_KEY"]) {
        config.store.supabase.key = Some(key);
    }
    if let Some(table) = first(&["SUPABASE_TABLE"]) {
        config.store.supabase.table = table;
    }
    if let Some(path) = first(&["SQLITE_PATH"]) {
        config.store.sqlite_path = PathBuf::from(path);
    }

    Ok(())
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| GuardError::Config(format!("Invalid {} value {:?}: {}", key, value, e)))
}
