use std::env;
use std::path::PathBuf;

use crate::error::AppError;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Database settings
    pub database: DatabaseConfig,
    /// Logging settings
    pub logging: LoggingConfig,
    /// Report export settings
    pub export: ExportConfig,
    /// Autosave settings
    pub autosave: AutosaveConfig,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: PathBuf,
    /// Connection pool size
    pub max_connections: u32,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Tracing filter directive (e.g. `info`, `debug`)
    pub level: String,
    /// Output format for log lines
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    /// Human-readable multi-line output
    Pretty,
    /// Structured JSON lines
    Json,
}

/// Document export configuration
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory report documents are written into
    pub output_dir: PathBuf,
}

/// Autosave debounce configuration
#[derive(Debug, Clone)]
pub struct AutosaveConfig {
    /// Quiet period in milliseconds before a queued edit is saved
    pub debounce_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database = DatabaseConfig {
            path: PathBuf::from(
                env::var("DATABASE_PATH").unwrap_or_else(|_| "./data/loopbook.db".to_string()),
            ),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
        };

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        let export = ExportConfig {
            output_dir: PathBuf::from(
                env::var("EXPORT_DIR").unwrap_or_else(|_| "./exports".to_string()),
            ),
        };

        let autosave = AutosaveConfig {
            debounce_ms: env::var("AUTOSAVE_DEBOUNCE_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(600),
        };

        Ok(Config {
            database,
            logging,
            export,
            autosave,
        })
    }
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self { debounce_ms: 600 }
    }
}
