//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::{HushConfig, LintSettings};
use std::path::Path;

/// The name of the configuration file looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "hush.toml";

/// Loads and validates `<project_dir>/hush.toml`.
pub fn load_config(project_dir: &Path) -> Result<HushConfig, ConfigError> {
    let content = std::fs::read_to_string(project_dir.join(CONFIG_FILE_NAME))?;
    load_config_from_str(&content)
}

/// Parses and validates a `hush.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<HushConfig, ConfigError> {
    let config: HushConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_settings(&config.lint)?;
    Ok(config)
}

/// Rejects structurally malformed tokens. Unknown category names pass.
fn validate_settings(settings: &LintSettings) -> Result<(), ConfigError> {
    for (list, tokens) in [("enable", &settings.enable), ("disable", &settings.disable)] {
        for token in tokens {
            if token.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "empty category name in lint.{list}"
                )));
            }
            if token.starts_with('-') {
                return Err(ConfigError::ValidationError(format!(
                    "lint.{list} entry '{token}' must not carry a '-' prefix"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LintMode;

    #[test]
    fn parse_full_config() {
        let toml = r#"
[lint]
mode = "extended"
enable = ["serial", "rawtypes"]
disable = ["options"]
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.lint.mode, LintMode::Extended);
        assert_eq!(config.lint.enable, vec!["serial", "rawtypes"]);
        assert_eq!(config.lint.disable, vec!["options"]);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.lint, LintSettings::default());
    }

    #[test]
    fn unknown_category_is_accepted() {
        let config = load_config_from_str("[lint]\nenable = [\"no-such-lint\"]\n").unwrap();
        assert_eq!(config.lint.enable, vec!["no-such-lint"]);
    }

    #[test]
    fn empty_token_rejected() {
        let err = load_config_from_str("[lint]\ndisable = [\" \"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn dash_prefix_rejected() {
        let err = load_config_from_str("[lint]\ndisable = [\"-cast\"]\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn bad_mode_is_parse_error() {
        let err = load_config_from_str("[lint]\nmode = \"loud\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/dir")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
