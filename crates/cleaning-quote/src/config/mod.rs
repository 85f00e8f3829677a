use std::env;
use std::fmt;
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

/// Top-level configuration for the quoting tools.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub pricing: PricingSourceConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let pricing = PricingSourceConfig {
            configuration_path: optional_path("QUOTE_PRICING_PATH")?,
            add_ons_path: optional_path("QUOTE_ADDONS_PATH")?,
        };

        Ok(Self {
            environment,
            pricing,
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn optional_path(variable: &'static str) -> Result<Option<PathBuf>, ConfigError> {
    let Ok(raw) = env::var(variable) else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyPath { variable });
    }

    let path = PathBuf::from(trimmed);
    if !path.is_file() {
        return Err(ConfigError::MissingFile { variable, path });
    }

    Ok(Some(path))
}

/// Locations of the administrator-maintained pricing exports.
///
/// When a path is absent the caller falls back to an empty history (zero configuration) or an
/// empty add-on catalog.
#[derive(Debug, Clone, Default)]
pub struct PricingSourceConfig {
    pub configuration_path: Option<PathBuf>,
    pub add_ons_path: Option<PathBuf>,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyPath {
        variable: &'static str,
    },
    MissingFile {
        variable: &'static str,
        path: PathBuf,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyPath { variable } => {
                write!(f, "{variable} is set but empty")
            }
            ConfigError::MissingFile { variable, path } => {
                write!(f, "{variable} points to '{}', which is not a file", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}
