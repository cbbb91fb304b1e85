/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, CORS 許可、Auth 設定など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::Algorithm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<String>) -> Self {
        match value
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

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,

    pub database_url: String,
    pub db_max_connections: u32,
    pub db_run_migrations: bool,

    pub auth_issuer: String,
    pub auth_audience: String,
    pub auth_jwks_url: String,
    pub auth_algorithms: Vec<Algorithm>,
    pub auth_permissions_claim: String,
    pub access_token_leeway_seconds: u64,

    pub jwks_cache_ttl: Duration,
    pub jwks_fetch_timeout: Duration,
    pub jwks_min_refresh_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source. `from_env` passes the process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = parse_or(&get, "PORT", 3000)?;

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(get("APP_ENV"));

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let database_url = require(&get, "DATABASE_URL")?;
        let db_max_connections = parse_or(&get, "DB_MAX_CONNECTIONS", 5)?;
        let db_run_migrations = parse_or(&get, "DB_RUN_MIGRATIONS", true)?;

        let auth_issuer = require(&get, "AUTH_ISSUER")?;
        let auth_audience = require(&get, "AUTH_AUDIENCE")?;

        let auth_jwks_url = match get("AUTH_JWKS_URL").filter(|s| !s.trim().is_empty()) {
            Some(url) => url,
            None => default_jwks_url(&auth_issuer)?,
        };

        let auth_algorithms = get("AUTH_ALGORITHMS")
            .unwrap_or_else(|| "RS256".to_string())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Algorithm::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ConfigError::Invalid("AUTH_ALGORITHMS"))?;
        if auth_algorithms.is_empty() {
            return Err(ConfigError::Invalid("AUTH_ALGORITHMS"));
        }

        let auth_permissions_claim =
            get("AUTH_PERMISSIONS_CLAIM").unwrap_or_else(|| "permissions".to_string());

        let access_token_leeway_seconds = parse_or(&get, "ACCESS_TOKEN_LEEWAY_SECONDS", 60)?;

        let jwks_cache_ttl = Duration::from_secs(parse_or(&get, "JWKS_CACHE_TTL_SECONDS", 600)?);
        let jwks_fetch_timeout =
            Duration::from_secs(parse_or(&get, "JWKS_FETCH_TIMEOUT_SECONDS", 5)?);
        if jwks_fetch_timeout.is_zero() {
            return Err(ConfigError::Invalid("JWKS_FETCH_TIMEOUT_SECONDS"));
        }
        let jwks_min_refresh_interval =
            Duration::from_secs(parse_or(&get, "JWKS_MIN_REFRESH_INTERVAL_SECONDS", 30)?);

        Ok(Self {
            addr,
            app_env,
            cors_allowed_origins,
            database_url,
            db_max_connections,
            db_run_migrations,
            auth_issuer,
            auth_audience,
            auth_jwks_url,
            auth_algorithms,
            auth_permissions_claim,
            access_token_leeway_seconds,
            jwks_cache_ttl,
            jwks_fetch_timeout,
            jwks_min_refresh_interval,
        })
    }
}

fn require(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, ConfigError> {
    get(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

// Unset means default; set but unparseable is an error rather than a silent default.
fn parse_or<T: FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match get(key) {
        Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

// Auth0 publishes keys at `<issuer>.well-known/jwks.json`.
fn default_jwks_url(issuer: &str) -> Result<String, ConfigError> {
    let issuer = url::Url::parse(issuer).map_err(|_| ConfigError::Invalid("AUTH_ISSUER"))?;
    issuer
        .join(".well-known/jwks.json")
        .map(String::from)
        .map_err(|_| ConfigError::Invalid("AUTH_ISSUER"))
}
