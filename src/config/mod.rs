use serde::{Deserialize, Serialize};

/// Fallback used when `SECRET_KEY` is unset. Only suitable for local development.
pub const DEV_SECRET_KEY: &str = "dev-secret-key-change-me";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    Sqlite,
    Postgres,
}

impl DatabaseBackend {
    /// Pick a backend from an explicit setting, falling back to the URL scheme.
    pub fn detect(explicit: Option<&str>, url: &str) -> Self {
        let hint = explicit
            .map(|s| s.to_lowercase())
            .unwrap_or_else(|| url.split(':').next().unwrap_or_default().to_lowercase());

        match hint.as_str() {
            "postgres" | "postgresql" => DatabaseBackend::Postgres,
            _ => DatabaseBackend::Sqlite,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub cookie_name: String,
}

impl SessionConfig {
    pub fn uses_dev_secret(&self) -> bool {
        self.secret == DEV_SECRET_KEY
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Directory holding page and static files.
    /// If None, uses the embedded site bundle.
    pub static_dir: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://./visitors.db?mode=rwc".to_string());
        let backend = DatabaseBackend::detect(
            std::env::var("DATABASE_BACKEND").ok().as_deref(),
            &database_url,
        );
        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()?;

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()?;

        let secret = std::env::var("SECRET_KEY").unwrap_or_else(|_| DEV_SECRET_KEY.to_string());
        let cookie_name =
            std::env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "folio_session".to_string());

        let static_dir = std::env::var("SITE_DIR").ok();

        Ok(Config {
            database: DatabaseConfig {
                backend,
                url: database_url,
                max_connections,
            },
            server: ServerConfig { host, port },
            session: SessionConfig {
                secret,
                cookie_name,
            },
            site: SiteConfig { static_dir },
        })
    }
}
