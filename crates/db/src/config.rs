use storefront_core::error::CoreError;

/// Default pool size.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// Default time to wait for a free connection, in seconds.
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Database configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Upper bound on pooled connections (default: `20`).
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection (default: `5`).
    pub acquire_timeout_secs: u64,
}

impl DbConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// A `.env` file in the working directory is read first, if present.
    ///
    /// | Env Var                   | Default    |
    /// |---------------------------|------------|
    /// | `DATABASE_URL`            | (required) |
    /// | `DB_MAX_CONNECTIONS`      | `20`       |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `5`        |
    pub fn from_env() -> Result<Self, CoreError> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| CoreError::Config("DATABASE_URL must be set".into()))?;

        let max_connections = parse_var("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        let acquire_timeout_secs =
            parse_var("DB_ACQUIRE_TIMEOUT_SECS", DEFAULT_ACQUIRE_TIMEOUT_SECS)?;

        Ok(Self {
            database_url,
            max_connections,
            acquire_timeout_secs,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, CoreError> {
    match std::env::var(name) {
        Ok(raw) => parse_value(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, CoreError> {
    raw.trim()
        .parse()
        .map_err(|_| CoreError::Config(format!("{name} must be a number, got '{raw}'")))
}
