//! Config file discovery.
//!
//! Lookup order: an explicit path, then `$BONDCALC_CONFIG`, then
//! `<config dir>/bondcalc/config.toml`. When none exists the built-in defaults
//! apply.

use std::path::{Path, PathBuf};

use crate::error::ConfigResult;
use crate::settings::CalculatorConfig;

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "BONDCALC_CONFIG";

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Path given on the command line.
    Explicit(PathBuf),
    /// Path from [`CONFIG_ENV_VAR`].
    Environment(PathBuf),
    /// The per-user config file.
    UserDefault(PathBuf),
    /// No file; built-in defaults.
    Defaults,
}

impl ConfigSource {
    /// File path, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Environment(p) | Self::UserDefault(p) => Some(p),
            Self::Defaults => None,
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Explicit(p) => write!(f, "{} (--config)", p.display()),
            Self::Environment(p) => write!(f, "{} (${CONFIG_ENV_VAR})", p.display()),
            Self::UserDefault(p) => write!(f, "{}", p.display()),
            Self::Defaults => f.write_str("built-in defaults"),
        }
    }
}

/// Per-user config file location, whether or not it exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .map(|dir| dir.join("bondcalc").join("config.toml"))
}

/// Decides which file to load without reading it.
///
/// Explicit and environment paths are returned even if missing so the
/// subsequent load reports the error; the per-user file is used only if it
/// exists.
pub fn resolve_config_source(explicit: Option<&Path>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|v| !v.is_empty()) {
        return ConfigSource::Environment(PathBuf::from(path));
    }
    match default_config_path() {
        Some(path) if path.is_file() => ConfigSource::UserDefault(path),
        _ => ConfigSource::Defaults,
    }
}

/// Resolves and loads the configuration.
pub fn load_config(explicit: Option<&Path>) -> ConfigResult<(CalculatorConfig, ConfigSource)> {
    let source = resolve_config_source(explicit);
    let config = match source.path() {
        Some(path) => CalculatorConfig::from_file(path)?,
        None => CalculatorConfig::default(),
    };
    tracing::debug!(source = %source, "loaded configuration");
    Ok((config, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("c.toml");
        std::fs::write(&path, "[server]\nport = 4321\n").unwrap();

        let (config, source) = load_config(Some(&path)).unwrap();
        assert_eq!(config.server.port, 4321);
        assert_eq!(source, ConfigSource::Explicit(path.clone()));
        assert_eq!(source.path(), Some(path.as_path()));
    }

    #[test]
    fn test_missing_explicit_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_defaults_display() {
        assert_eq!(ConfigSource::Defaults.to_string(), "built-in defaults");
        assert_eq!(ConfigSource::Defaults.path(), None);
    }

    #[test]
    fn test_default_path_shape() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("bondcalc/config.toml"));
        }
    }
}
