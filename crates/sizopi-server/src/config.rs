use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub db_path: PathBuf,
    pub session_ttl: Duration,
    pub pool_max_idle: usize,
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            db_path: PathBuf::from("sizopi.sqlite"),
            session_ttl: Duration::from_secs(8 * 3600),
            pool_max_idle: 8,
            log_json: false,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: env::var("SIZOPI_BIND").unwrap_or(defaults.bind_addr),
            db_path: env::var("SIZOPI_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            session_ttl: env_duration_ms(
                "SIZOPI_SESSION_TTL_MS",
                defaults.session_ttl.as_millis() as u64,
            ),
            pool_max_idle: env_usize("SIZOPI_POOL_MAX_IDLE", defaults.pool_max_idle),
            log_json: env_bool("SIZOPI_LOG_JSON", defaults.log_json),
        }
    }
}

pub(crate) fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

pub(crate) fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

pub(crate) fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

pub(crate) fn env_duration_ms(name: &str, default_ms: u64) -> Duration {
    Duration::from_millis(env_u64(name, default_ms))
}
