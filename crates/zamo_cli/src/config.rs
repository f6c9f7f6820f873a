//! Zamo configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use zamo_i18n::Locale;

pub const CONFIG_FILE: &str = "zamo.toml";

/// Top-level configuration (zamo.toml)
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct ZamoConfig {
    #[serde(default)]
    pub preferences: PreferencesConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where preferences live and what to fall back to
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct PreferencesConfig {
    /// Preference file (relative to the config file's directory)
    #[serde(default = "default_store")]
    pub store: PathBuf,
    #[serde(default = "default_locale")]
    pub default_locale: String,
}

fn default_store() -> PathBuf {
    PathBuf::from("zamo-prefs.toml")
}

fn default_locale() -> String {
    Locale::default().code().to_string()
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            store: default_store(),
            default_locale: default_locale(),
        }
    }
}

/// Host appearance handling
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct ThemeConfig {
    /// Resolve `system` mode against the OS scheme
    #[serde(default = "default_true")]
    pub follow_system: bool,
    /// Poll interval of `zamo watch`
    #[serde(default = "default_watch_interval")]
    pub watch_interval_ms: u64,
}

fn default_true() -> bool {
    true
}

fn default_watch_interval() -> u64 {
    1000
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            follow_system: true,
            watch_interval_ms: default_watch_interval(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` filter directive, overridden by `ZAMO_LOG`
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl ZamoConfig {
    /// Load `path`, or `./zamo.toml` when no path is given.
    ///
    /// An explicit path must exist; the implicit one may be absent, in
    /// which case defaults are used.
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf)> {
        let (config_path, required) = match path {
            Some(p) if p.is_dir() => (p.join(CONFIG_FILE), true),
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(CONFIG_FILE), false),
        };

        if !config_path.exists() {
            if required {
                anyhow::bail!("No config file at {}", config_path.display());
            }
            return Ok((Self::default(), config_path));
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok((config, config_path))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ZamoConfig = toml::from_str(content)?;
        config.default_locale()?;
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    pub fn default_locale(&self) -> Result<Locale> {
        self.preferences
            .default_locale
            .parse()
            .context("Invalid preferences.default_locale")
    }

    /// Store path, resolved against the directory holding `config_path`.
    pub fn store_path(&self, config_path: &Path) -> PathBuf {
        if self.preferences.store.is_absolute() {
            return self.preferences.store.clone();
        }
        match config_path.parent() {
            Some(dir) => dir.join(&self.preferences.store),
            None => self.preferences.store.clone(),
        }
    }

    pub fn watch_interval(&self) -> Duration {
        Duration::from_millis(self.theme.watch_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = ZamoConfig::from_toml("").unwrap();
        assert_eq!(config, ZamoConfig::default());
        assert_eq!(config.default_locale().unwrap(), Locale::En);
        assert_eq!(config.watch_interval(), Duration::from_secs(1));
    }

    #[test]
    fn partial_sections() {
        let config = ZamoConfig::from_toml(
            r#"
[preferences]
default_locale = "fr"

[theme]
follow_system = false
"#,
        )
        .unwrap();

        assert_eq!(config.default_locale().unwrap(), Locale::Fr);
        assert_eq!(config.preferences.store, default_store());
        assert!(!config.theme.follow_system);
        assert_eq!(config.theme.watch_interval_ms, 1000);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn unsupported_default_locale_is_rejected() {
        let err = ZamoConfig::from_toml("[preferences]\ndefault_locale = \"de\"\n").unwrap_err();
        assert!(format!("{err:#}").contains("default_locale"));
    }

    #[test]
    fn store_path_is_relative_to_config() {
        let config = ZamoConfig::default();
        assert_eq!(
            config.store_path(Path::new("/etc/zamo/zamo.toml")),
            PathBuf::from("/etc/zamo/zamo-prefs.toml")
        );
        assert_eq!(
            config.store_path(Path::new("zamo.toml")),
            PathBuf::from("zamo-prefs.toml")
        );
    }

    #[test]
    fn load_missing_implicit_and_explicit() {
        let dir = tempfile::tempdir().unwrap();
        let err = ZamoConfig::load(Some(dir.path())).unwrap_err();
        assert!(err.to_string().contains("No config file"));

        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[logging]\nfilter = \"debug\"\n").unwrap();
        let (config, found) = ZamoConfig::load(Some(dir.path())).unwrap();
        assert_eq!(found, path);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn round_trips_through_toml() {
        let config = ZamoConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(ZamoConfig::from_toml(&text).unwrap(), config);
    }
}
