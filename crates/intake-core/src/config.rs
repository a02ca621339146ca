//! Configuration module
//!
//! Server configuration is read from the environment (a `.env` file is honoured).
//! A configured database is mandatory: the service never runs without a store.

use std::env;

// Common constants
const DEFAULT_PORT: u16 = 4000;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_BODY_BYTES: usize = 64 * 1024;
const HTTP_CONCURRENCY_LIMIT: usize = 1024;

/// Settings that do not depend on the store
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub environment: String,
    pub max_body_bytes: usize,
    pub http_concurrency_limit: usize,
    /// `text` (default) or `json`
    pub log_format: String,
}

/// Intake service configuration
#[derive(Clone, Debug)]
pub struct IntakeServiceConfig {
    pub base: BaseConfig,
    pub database_url: String,
}

/// Application configuration (intake service).
#[derive(Clone, Debug)]
pub struct Config(pub Box<IntakeServiceConfig>);

impl Config {
    fn as_service(&self) -> &IntakeServiceConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.as_service().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = IntakeServiceConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_service().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.as_service().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.as_service().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.as_service().base.environment
    }

    pub fn db_max_connections(&self) -> u32 {
        self.as_service().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.as_service().base.db_timeout_seconds
    }

    pub fn max_body_bytes(&self) -> usize {
        self.as_service().base.max_body_bytes
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.as_service().base.http_concurrency_limit
    }

    pub fn log_format(&self) -> &str {
        &self.as_service().base.log_format
    }

    pub fn database_url(&self) -> &str {
        &self.as_service().database_url
    }
}

fn is_production_name(environment: &str) -> bool {
    let env = environment.to_lowercase();
    env == "production" || env == "prod"
}

impl IntakeServiceConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            environment,
            max_body_bytes: env::var("MAX_BODY_BYTES")
                .unwrap_or_else(|_| MAX_BODY_BYTES.to_string())
                .parse()
                .unwrap_or(MAX_BODY_BYTES),
            http_concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .ok()
                .and_then(|s| s.parse::<usize>().ok())
                .unwrap_or(HTTP_CONCURRENCY_LIMIT)
                .max(1),
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "text".to_string())
                .to_lowercase(),
        };

        let config = IntakeServiceConfig {
            base,
            database_url: env::var("INTAKE_DATABASE_URL")
                .or_else(|_| env::var("DATABASE_URL"))
                .map_err(|_| anyhow::anyhow!("INTAKE_DATABASE_URL or DATABASE_URL must be set"))?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(self.database_url.starts_with("postgresql://")
            || self.database_url.starts_with("postgres://"))
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if is_production_name(&self.base.environment)
            && self.base.cors_origins.iter().any(|o| o == "*")
        {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if self.base.db_max_connections == 0 {
            return Err(anyhow::anyhow!("Database max connections cannot be 0"));
        }

        if self.base.max_body_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_BODY_BYTES cannot be 0"));
        }

        if !matches!(self.base.log_format.as_str(), "text" | "json") {
            return Err(anyhow::anyhow!("LOG_FORMAT must be 'text' or 'json'"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(environment: &str, cors: &str, database_url: &str) -> IntakeServiceConfig {
        IntakeServiceConfig {
            base: BaseConfig {
                server_port: DEFAULT_PORT,
                cors_origins: vec![cors.to_string()],
                db_max_connections: MAX_CONNECTIONS,
                db_timeout_seconds: CONNECTION_TIMEOUT_SECS,
                environment: environment.to_string(),
                max_body_bytes: MAX_BODY_BYTES,
                http_concurrency_limit: HTTP_CONCURRENCY_LIMIT,
                log_format: "text".to_string(),
            },
            database_url: database_url.to_string(),
        }
    }

    #[test]
    fn development_defaults_are_valid() {
        let cfg = config("development", "*", "postgres://localhost/intake");
        assert!(cfg.validate().is_ok());
        assert!(!Config(Box::new(cfg)).is_production());
    }

    #[test]
    fn database_url_must_be_postgres() {
        let cfg = config("development", "*", "mysql://localhost/intake");
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn wildcard_cors_rejected_in_production() {
        let cfg = config("Production", "*", "postgresql://localhost/intake");
        assert!(cfg.validate().is_err());

        let cfg = config("prod", "https://intake.example.com", "postgresql://localhost/intake");
        assert!(cfg.validate().is_ok());
        assert!(Config(Box::new(cfg)).is_production());
    }

    #[test]
    fn unknown_log_format_rejected() {
        let mut cfg = config("development", "*", "postgresql://localhost/intake");
        cfg.base.log_format = "xml".to_string();
        assert!(cfg.validate().is_err());
    }
}
