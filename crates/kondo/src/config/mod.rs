use crate::ingestion::{IngestionConfig, DEFAULT_PDF_INLINE_LIMIT_BYTES};
use crate::quality::{QualityConfig, QualityConfigError};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

pub const PDF_INLINE_LIMIT_ENV: &str = "KONDO_PDF_INLINE_LIMIT_BYTES";

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
    pub quality: QualityConfig,
    pub ingestion: IngestionConfig,
}

impl AppConfig {
    /// Loads `.env` (when present) and the process environment.
    ///
    /// Scoring configuration is validated here so an inconsistent threshold or weight set
    /// stops startup.
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

        let quality = QualityConfig::from_env()?;

        let pdf_inline_limit_bytes = match env::var(PDF_INLINE_LIMIT_ENV) {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidPdfLimit)?,
            Err(_) => DEFAULT_PDF_INLINE_LIMIT_BYTES,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            quality,
            ingestion: IngestionConfig {
                pdf_inline_limit_bytes,
            },
        })
    }
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

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidPdfLimit,
    Quality(QualityConfigError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPdfLimit => {
                write!(f, "{PDF_INLINE_LIMIT_ENV} must be a whole number of bytes")
            }
            ConfigError::Quality(err) => write!(f, "invalid quality configuration: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidPdfLimit => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::Quality(err) => Some(err),
        }
    }
}

impl From<QualityConfigError> for ConfigError {
    fn from(value: QualityConfigError) -> Self {
        Self::Quality(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::{
        CONTENT_ADDITIONAL_DETAILS_ENV, CONTENT_BASIC_INFO_ENV, CONTENT_CONVENIENCES_ENV,
        CONTENT_PRICING_ENV, MEDIA_IMAGES_ENV, MEDIA_IMAGE_QUALITY_ENV, MEDIA_RECENCY_ENV,
        MEDIA_VIDEOS_ENV, THRESHOLD_ENV,
    };
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
            PDF_INLINE_LIMIT_ENV,
            THRESHOLD_ENV,
            CONTENT_BASIC_INFO_ENV,
            CONTENT_PRICING_ENV,
            CONTENT_CONVENIENCES_ENV,
            CONTENT_ADDITIONAL_DETAILS_ENV,
            MEDIA_IMAGES_ENV,
            MEDIA_IMAGE_QUALITY_ENV,
            MEDIA_VIDEOS_ENV,
            MEDIA_RECENCY_ENV,
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
        assert_eq!(config.quality, QualityConfig::default());
        assert_eq!(config.ingestion, IngestionConfig::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn threshold_override_is_applied() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var(THRESHOLD_ENV, "0.5");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.quality.threshold(), 0.5);
        reset_env();
    }

    #[test]
    fn invalid_quality_weights_stop_loading() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var(CONTENT_PRICING_ENV, "0.9");
        let err = AppConfig::load().expect_err("unbalanced weights rejected");
        assert!(matches!(
            err,
            ConfigError::Quality(QualityConfigError::ContentWeightsSum { .. })
        ));
        assert!(err.to_string().contains("content weights sum mismatch"));
        reset_env();
    }

    #[test]
    fn media_weight_overrides_are_validated() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var(MEDIA_IMAGES_ENV, "0.2");
        env::set_var(MEDIA_RECENCY_ENV, "0.3");
        let config = AppConfig::load().expect("rebalanced media weights load");
        assert_eq!(config.quality.media_weights().images, 0.2);

        env::set_var(MEDIA_VIDEOS_ENV, "0.5");
        let err = AppConfig::load().expect_err("unbalanced media weights rejected");
        assert!(matches!(
            err,
            ConfigError::Quality(QualityConfigError::MediaWeightsSum { .. })
        ));

        reset_env();
        let config = AppConfig::load().expect("defaults restored");
        assert_eq!(config.quality, QualityConfig::default());
    }

    #[test]
    fn malformed_pdf_limit_is_rejected() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var(PDF_INLINE_LIMIT_ENV, "4MB");
        let err = AppConfig::load().expect_err("malformed limit rejected");
        assert!(matches!(err, ConfigError::InvalidPdfLimit));
        reset_env();
    }
}
