//! Parsing of the `--lint` command-line flag family.
//!
//! | flag                | effect                                        |
//! |---------------------|-----------------------------------------------|
//! | `--lint`            | mode `extended`                               |
//! | `--lint:all`        | mode `all`                                    |
//! | `--lint:none`       | mode `none`                                   |
//! | `--lint:a,b`        | enable `a` and `b`                            |
//! | `--lint:-a`         | explicitly disable `a`                        |
//!
//! Flags apply left to right, so a later flag overrides an earlier one.

use crate::error::ConfigError;
use crate::types::{LintMode, LintSettings};

const FLAG: &str = "--lint";

/// Applies `flags` on top of `base` and returns the merged settings.
pub fn parse_lint_flags<I, S>(base: LintSettings, flags: I) -> Result<LintSettings, ConfigError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut settings = base;
    for flag in flags {
        apply_flag(&mut settings, flag.as_ref())?;
    }
    Ok(settings)
}

fn apply_flag(settings: &mut LintSettings, flag: &str) -> Result<(), ConfigError> {
    let Some(rest) = flag.strip_prefix(FLAG) else {
        return Err(ConfigError::ValidationError(format!(
            "unrecognized flag '{flag}'"
        )));
    };
    if rest.is_empty() {
        settings.mode = LintMode::Extended;
        return Ok(());
    }
    let Some(list) = rest.strip_prefix(':') else {
        return Err(ConfigError::ValidationError(format!(
            "unrecognized flag '{flag}'"
        )));
    };
    if list.trim().is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "empty category list in '{flag}'"
        )));
    }
    for entry in list.split(',').map(str::trim) {
        match entry {
            "" => {
                return Err(ConfigError::ValidationError(format!(
                    "empty category name in '{flag}'"
                )))
            }
            "all" => settings.mode = LintMode::All,
            "none" => settings.mode = LintMode::None,
            _ => match entry.strip_prefix('-') {
                Some("") => {
                    return Err(ConfigError::ValidationError(format!(
                        "empty category name in '{flag}'"
                    )))
                }
                Some(token) => settings.disable(token),
                None => settings.enable(entry),
            },
        }
    }
    Ok(())
}
