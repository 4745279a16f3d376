//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtConfig,
    /// Report rendering configuration.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// Secret key for verifying tokens.
    pub secret: String,
}

/// Settings for the PDF expense report.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// IANA timezone used to display dates (e.g. "Asia/Colombo").
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// `strftime` pattern for short dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            date_format: default_date_format(),
        }
    }
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_date_format() -> String {
    "%-m/%-d/%Y".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones:
    /// `config/default`, `config/{RUN_MODE}` and `ECONOME__*` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("ECONOME").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_environment_uses_defaults() {
        let config = temp_env::with_vars(
            [
                ("ECONOME__DATABASE__URL", Some("postgres://localhost/econome")),
                ("ECONOME__JWT__SECRET", Some("test-secret")),
            ],
            AppConfig::load,
        )
        .unwrap();

        assert_eq!(config.database.url, "postgres://localhost/econome");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.jwt.secret, "test-secret");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.report.timezone, "UTC");
        assert_eq!(config.report.date_format, "%-m/%-d/%Y");
    }

    #[test]
    fn test_report_settings_from_environment() {
        let config = temp_env::with_vars(
            [
                ("ECONOME__DATABASE__URL", Some("postgres://localhost/econome")),
                ("ECONOME__JWT__SECRET", Some("test-secret")),
                ("ECONOME__REPORT__TIMEZONE", Some("Asia/Colombo")),
                ("ECONOME__REPORT__DATE_FORMAT", Some("%d/%m/%Y")),
            ],
            AppConfig::load,
        )
        .unwrap();

        assert_eq!(config.report.timezone, "Asia/Colombo");
        assert_eq!(config.report.date_format, "%d/%m/%Y");
    }

    #[test]
    fn test_missing_database_url_fails() {
        let result = temp_env::with_vars(
            [
                ("ECONOME__DATABASE__URL", None::<&str>),
                ("ECONOME__JWT__SECRET", Some("test-secret")),
            ],
            AppConfig::load,
        );

        assert!(result.is_err());
    }
}
