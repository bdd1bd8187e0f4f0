//! Configuration types deserialized from `hush.toml`.

use serde::{Deserialize, Serialize};

/// Top-level structure of a `hush.toml` file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HushConfig {
    /// Global lint settings.
    #[serde(default)]
    pub lint: LintSettings,
}

/// The global baseline from which the root lint state is computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LintMode {
    /// Only the curated on-by-default categories.
    #[default]
    Default,
    /// The default categories plus the extras tier (bare `--lint`).
    Extended,
    /// Every known category (`--lint:all`).
    All,
    /// No category at all (`--lint:none`).
    None,
}

/// Global lint settings: a baseline mode plus explicit per-category overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LintSettings {
    /// The baseline set of enabled categories.
    #[serde(default)]
    pub mode: LintMode,
    /// Category tokens enabled on top of the baseline.
    #[serde(default)]
    pub enable: Vec<String>,
    /// Category tokens explicitly disabled (`--lint:-token`).
    #[serde(default)]
    pub disable: Vec<String>,
}

impl LintSettings {
    /// Creates settings with the given mode and no per-category overrides.
    pub fn with_mode(mode: LintMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Records an explicit enable, cancelling an earlier disable of the same token.
    pub fn enable(&mut self, token: &str) {
        self.disable.retain(|t| t != token);
        if !self.enable.iter().any(|t| t == token) {
            self.enable.push(token.to_string());
        }
    }

    /// Records an explicit disable, cancelling an earlier enable of the same token.
    pub fn disable(&mut self, token: &str) {
        self.enable.retain(|t| t != token);
        if !self.disable.iter().any(|t| t == token) {
            self.disable.push(token.to_string());
        }
    }
}
