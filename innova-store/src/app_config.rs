use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Deployment {
    #[default]
    Development,
    Production,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    #[serde(default)]
    pub environment: Deployment,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Mongo,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_database_name")]
    pub name: String,
    #[serde(default)]
    pub backend: StoreBackend,
}

fn default_database_name() -> String { "innovaDB".to_string() }

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: u64,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

fn default_token_ttl() -> u64 { 10 * 60 * 60 }

fn default_cookie_name() -> String { "token".to_string() }

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "https://innova-yamin39.web.app".to_string(),
                "https://innova-yamin39.firebaseapp.com".to_string(),
            ],
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local, uncommitted overrides
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `INNOVA_AUTH__JWT_SECRET=...` sets `auth.jwt_secret`
            .add_source(config::Environment::with_prefix("INNOVA").separator("__"))
            // Hosting platforms hand the listen port over as plain `PORT`
            .set_override_option("server.port", env::var("PORT").ok())?
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(raw: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_fill_optional_keys() {
        let config = from_toml(
            r#"
            [server]
            port = 5000

            [database]
            url = "mongodb://localhost:27017"

            [auth]
            jwt_secret = "secret"
            "#,
        );

        assert_eq!(config.server.environment, Deployment::Development);
        assert_eq!(config.database.name, "innovaDB");
        assert_eq!(config.database.backend, StoreBackend::Mongo);
        assert_eq!(config.auth.token_ttl_seconds, 36_000);
        assert_eq!(config.auth.cookie_name, "token");
        assert_eq!(config.cors.allowed_origins.len(), 3);
    }

    #[test]
    fn test_production_and_memory_backend() {
        let config = from_toml(
            r#"
            [server]
            port = 8080
            environment = "production"

            [database]
            url = "unused"
            backend = "memory"

            [auth]
            jwt_secret = "secret"

            [cors]
            allowed_origins = ["https://rooms.example.com"]
            "#,
        );

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Deployment::Production);
        assert_eq!(config.database.backend, StoreBackend::Memory);
        assert_eq!(config.cors.allowed_origins, vec!["https://rooms.example.com".to_string()]);
    }
}
