/**
 * Server Configuration
 *
 * Configuration is layered, later sources winning:
 *
 * 1. Built-in defaults
 * 2. A TOML file named by `MARKETCHAT_CONFIG`, if set
 * 3. Environment variables (`DATABASE_URL`, `JWT_SECRET`, `SERVER_PORT`,
 *    `CORS_ORIGIN`), including those loaded from a `.env` file
 *
 * ```toml
 * database_url = "sqlite:///var/lib/marketchat/chat.db?mode=rwc"
 * jwt_secret = "change-me"
 * port = 5000
 * cors_origin = "https://market.example.com"
 * ```
 */

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

/// Default SQLite database, created on first start
pub const DEFAULT_DATABASE_URL: &str = "sqlite://marketchat.db?mode=rwc";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5000;

/// Secret used in debug builds when `JWT_SECRET` is unset
const DEV_JWT_SECRET: &str = "marketchat-dev-secret-change-in-production";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid SERVER_PORT: {0}")]
    InvalidPort(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}

/// Fully resolved server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// sqlx SQLite connection URL
    pub database_url: String,
    /// HMAC secret used to verify bearer tokens
    pub jwt_secret: String,
    /// Port the HTTP server binds on all interfaces
    pub port: u16,
    /// Allowed browser origin; any origin when unset
    pub cors_origin: Option<String>,
}

/// Optional values read from the TOML file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    database_url: Option<String>,
    jwt_secret: Option<String>,
    port: Option<u16>,
    cors_origin: Option<String>,
}

impl FileConfig {
    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&text)?)
    }
}

impl ServerConfig {
    /// Configuration with defaults for everything but the secret
    pub fn new(database_url: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            jwt_secret: jwt_secret.into(),
            port: DEFAULT_PORT,
            cors_origin: None,
        }
    }

    /// Load configuration from `.env`, the optional TOML file and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let file = match std::env::var("MARKETCHAT_CONFIG") {
            Ok(path) => {
                tracing::info!("Reading configuration from {}", path);
                FileConfig::read(Path::new(&path))?
            }
            Err(_) => FileConfig::default(),
        };

        Self::resolve(file, |key| std::env::var(key).ok())
    }

    fn resolve(
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let database_url = env("DATABASE_URL")
            .or(file.database_url)
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let port = match env("SERVER_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => file.port.unwrap_or(DEFAULT_PORT),
        };

        let jwt_secret = match env("JWT_SECRET").or(file.jwt_secret) {
            Some(secret) if !secret.is_empty() => secret,
            _ if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using the development secret");
                DEV_JWT_SECRET.to_string()
            }
            _ => return Err(ConfigError::MissingValue("JWT_SECRET")),
        };

        let cors_origin = env("CORS_ORIGIN").or(file.cors_origin);

        Ok(Self {
            database_url,
            jwt_secret,
            port,
            cors_origin,
        })
    }
}

/// Open the SQLite pool and bring the schema up to date.
pub async fn load_database(config: &ServerConfig) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(options)
        .await?;

    tracing::info!("Database connection pool created successfully");

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Apply the embedded migrations in `migrations/`.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!()
        .run(pool)
        .await
        .map_err(|e| sqlx::Error::Migrate(Box::new(e)))?;
    tracing::info!("Database migrations completed successfully");
    Ok(())
}
