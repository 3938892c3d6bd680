use crate::workflows::dataset::{DEFAULT_SAMPLE_SEED, DEFAULT_SAMPLE_SIZE};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub analysis: AnalysisConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let sample_seed = match env::var("ATTRITION_SAMPLE_SEED") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidSampleSeed)?,
            Err(_) => DEFAULT_SAMPLE_SEED,
        };
        let sample_size = match env::var("ATTRITION_SAMPLE_SIZE") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidSampleSize)?,
            Err(_) => DEFAULT_SAMPLE_SIZE,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            analysis: AnalysisConfig {
                dataset_path: optional_path("ATTRITION_DATASET"),
                policy_path: optional_path("ATTRITION_POLICY"),
                sample_seed,
                sample_size,
            },
        })
    }
}

fn optional_path(key: &str) -> Option<PathBuf> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where departure data and rule thresholds come from.
///
/// Without a dataset path the seeded sample generator is used.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub dataset_path: Option<PathBuf>,
    pub policy_path: Option<PathBuf>,
    pub sample_seed: u64,
    pub sample_size: usize,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidSampleSeed,
    InvalidSampleSize,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidSampleSeed => {
                write!(f, "ATTRITION_SAMPLE_SEED must be a non-negative integer")
            }
            ConfigError::InvalidSampleSize => {
                write!(f, "ATTRITION_SAMPLE_SIZE must be a non-negative integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidSampleSeed
            | ConfigError::InvalidSampleSize => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "ATTRITION_DATASET",
            "ATTRITION_POLICY",
            "ATTRITION_SAMPLE_SEED",
            "ATTRITION_SAMPLE_SIZE",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.analysis.sample_seed, DEFAULT_SAMPLE_SEED);
        assert_eq!(config.analysis.sample_size, DEFAULT_SAMPLE_SIZE);
        assert!(config.analysis.dataset_path.is_none());
        assert!(config.analysis.policy_path.is_none());
    }

    #[test]
    fn reads_analysis_settings() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ATTRITION_DATASET", "data/departures.csv");
        env::set_var("ATTRITION_SAMPLE_SEED", "7");
        env::set_var("ATTRITION_SAMPLE_SIZE", "250");
        env::set_var("ATTRITION_POLICY", "  ");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(
            config.analysis.dataset_path,
            Some(PathBuf::from("data/departures.csv"))
        );
        assert_eq!(config.analysis.sample_seed, 7);
        assert_eq!(config.analysis.sample_size, 250);
        assert!(config.analysis.policy_path.is_none());
    }

    #[test]
    fn rejects_invalid_sample_size() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("ATTRITION_SAMPLE_SIZE", "lots");
        let error = AppConfig::load().expect_err("invalid size rejected");
        reset_env();
        assert!(matches!(error, ConfigError::InvalidSampleSize));
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        reset_env();
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }
}
