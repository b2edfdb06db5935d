/// Configuration management for the API server
///
/// Configuration is read from environment variables once at startup. A
/// `.env` file in the working directory is loaded first when present.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 3000)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
/// - `PRODUCTION`: Enables HSTS and `Secure` cookies (default: false)
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `RUN_MIGRATIONS`: Apply migrations on startup (default: true)
/// - `SESSION_SECRET`: Session signing key, at least 32 characters (required)
/// - `SESSION_TTL_HOURS`: Session lifetime (default: 720)
/// - `OPENAI_API_KEY`: Completion service key; summaries are disabled without it
/// - `OPENAI_BASE_URL`: Completion service base URL (default: https://api.openai.com/v1)
/// - `OPENAI_MODEL`: Model name (default: gpt-3.5-turbo)
/// - `OPENAI_TIMEOUT_SECONDS`: Completion request timeout (default: 30)
/// - `LOG_FORMAT`: `pretty` or `json` (default: pretty)
///
/// # Example
///
/// ```no_run
/// use issuedeck_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use issuedeck_shared::auth::session::DEFAULT_SESSION_TTL_HOURS;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,

    pub database: DatabaseConfig,

    pub session: SessionConfig,

    pub summary: SummaryConfig,

    pub log_format: LogFormat,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,

    pub port: u16,

    /// Allowed CORS origins; `*` allows any origin
    pub cors_origins: Vec<String>,

    /// Production mode (HSTS, secure cookies)
    pub production: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    pub max_connections: u32,

    /// Apply pending migrations before serving
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// HS256 signing key
    ///
    /// Must be kept secret and at least 32 bytes.
    /// Generate with: `openssl rand -hex 32`
    pub secret: String,

    pub ttl_hours: i64,
}

/// Completion service settings for AI summaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// None disables the summary endpoint
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    pub base_url: String,

    pub model: String,

    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => anyhow::bail!("LOG_FORMAT must be 'pretty' or 'json', got '{}'", other),
        }
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_bool(name: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("{} must be a boolean, got '{}'", name, other),
    }
}

/// Splits a comma-separated origin list, dropping empty entries
fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `DATABASE_URL` or `SESSION_SECRET` is missing
    /// - `SESSION_SECRET` is shorter than 32 characters
    /// - A numeric or boolean variable can't be parsed
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let host = var_or("API_HOST", "0.0.0.0");
        let port = var_or("API_PORT", "3000").parse::<u16>()?;
        let cors_origins = parse_origins(&var_or("CORS_ORIGINS", "*"));
        let production = parse_bool("PRODUCTION", &var_or("PRODUCTION", "false"))?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;
        let max_connections = var_or("DATABASE_MAX_CONNECTIONS", "10").parse::<u32>()?;
        let run_migrations = parse_bool("RUN_MIGRATIONS", &var_or("RUN_MIGRATIONS", "true"))?;

        let session_secret = env::var("SESSION_SECRET")
            .map_err(|_| anyhow::anyhow!("SESSION_SECRET environment variable is required"))?;
        if session_secret.len() < 32 {
            anyhow::bail!("SESSION_SECRET must be at least 32 characters long");
        }
        let ttl_hours =
            var_or("SESSION_TTL_HOURS", &DEFAULT_SESSION_TTL_HOURS.to_string()).parse::<i64>()?;
        if ttl_hours <= 0 {
            anyhow::bail!("SESSION_TTL_HOURS must be positive");
        }

        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        Ok(Self {
            api: ApiConfig {
                host,
                port,
                cors_origins,
                production,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
                run_migrations,
            },
            session: SessionConfig {
                secret: session_secret,
                ttl_hours,
            },
            summary: SummaryConfig {
                api_key,
                base_url: var_or("OPENAI_BASE_URL", "https://api.openai.com/v1"),
                model: var_or("OPENAI_MODEL", "gpt-3.5-turbo"),
                timeout_seconds: var_or("OPENAI_TIMEOUT_SECONDS", "30").parse::<u64>()?,
            },
            log_format: var_or("LOG_FORMAT", "pretty").parse()?,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Session lifetime in seconds, used for the cookie `Max-Age`
    pub fn session_ttl_seconds(&self) -> i64 {
        self.session.ttl_hours * 3600
    }
}
