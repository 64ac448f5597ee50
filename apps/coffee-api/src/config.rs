//! Configuration for Coffee API

use core_config::{AppInfo, FromEnv, app_info, env_parse, server::ServerConfig};
use database::common::RetryConfig;
use database::postgres::PostgresConfig;

pub use core_config::Environment;

const DEFAULT_PORT: u16 = 3000;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub db_retry: RetryConfig,
    /// Apply pending migrations before serving (`DB_AUTO_MIGRATE`)
    pub auto_migrate: bool,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?;
        let db_retry = RetryConfig::from_env()?;
        let server = ServerConfig::from_env_with_port(DEFAULT_PORT)?;
        let auto_migrate = env_parse("DB_AUTO_MIGRATE", "true")?;

        Ok(Self {
            app: app_info!(),
            database,
            db_retry,
            auto_migrate,
            server,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("APP_ENV", None::<&str>),
                ("PORT", None),
                ("DATABASE_URL", None),
                ("DB_HOST", None),
                ("DB_AUTO_MIGRATE", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.server.port, 3000);
                assert!(config.auto_migrate);
                assert!(config.environment.is_development());
                assert!(config.database.url().contains("@localhost:5432/"));
                assert_eq!(config.app.name, "coffee_api");
            },
        );
    }

    #[test]
    fn test_overrides() {
        temp_env::with_vars(
            [
                ("APP_ENV", Some("production")),
                ("PORT", Some("8081")),
                ("DATABASE_URL", Some("postgres://u:p@db:5432/coffees")),
                ("DB_AUTO_MIGRATE", Some("false")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.server.port, 8081);
                assert!(!config.auto_migrate);
                assert!(config.environment.is_production());
                assert_eq!(config.database.url(), "postgres://u:p@db:5432/coffees");
            },
        );
    }

    #[test]
    fn test_invalid_auto_migrate_flag() {
        temp_env::with_var("DB_AUTO_MIGRATE", Some("sometimes"), || {
            assert!(Config::from_env().is_err());
        });
    }
}
