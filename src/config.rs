/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, APP_ENV, JWT_SECRET, HTTP 制限値など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // HS256 shared secret used to verify access tokens
    pub jwt_secret: String,
    pub access_token_leeway_seconds: u64,

    pub request_body_limit_bytes: usize,
    pub request_timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the secret
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("access_token_leeway_seconds", &self.access_token_leeway_seconds)
            .field("request_body_limit_bytes", &self.request_body_limit_bytes)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (`from_env` passes the process environment).
    pub fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = match get("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(get("APP_ENV"));

        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("JWT_SECRET"));
        }

        let access_token_leeway_seconds = get("ACCESS_TOKEN_LEEWAY_SECONDS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(0);

        let request_body_limit_bytes = get("REQUEST_BODY_LIMIT_BYTES")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(1024 * 1024);

        let request_timeout = get("REQUEST_TIMEOUT_SECONDS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        Ok(Self {
            addr,
            app_env,
            jwt_secret,
            access_token_leeway_seconds,
            request_body_limit_bytes,
            request_timeout,
        })
    }
}
