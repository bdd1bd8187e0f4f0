//! Error types for loading lint settings.

/// Errors that can occur when loading `hush.toml` or parsing `--lint` flags.
///
/// Unknown category names are not errors; only structurally malformed input is.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A configuration value or flag failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),
}
