//! Lint settings from `hush.toml` and from `--lint` command-line flags.
//!
//! Both surfaces produce the same [`LintSettings`]: a global mode plus lists
//! of explicitly enabled and disabled category tokens. Tokens are kept as
//! strings here; matching them against the category registry (and silently
//! dropping unknown ones) happens in the lint engine.

#![warn(missing_docs)]

pub mod error;
pub mod flags;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use flags::parse_lint_flags;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::{HushConfig, LintMode, LintSettings};
