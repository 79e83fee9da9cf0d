//! Configuration management.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Name of the per-directory config file.
pub const LOCAL_CONFIG_FILE: &str = ".jellyfin-inspect.toml";

/// Prefix of environment overrides; `__` separates section and key.
pub const ENV_PREFIX: &str = "JELLYFIN_INSPECT_";

/// Which envelope frames are decoded through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Server to client.
    #[default]
    Outbound,
    /// Client to server.
    Inbound,
}

/// Configuration structure that matches the TOML file format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    decode: DecodeConfig,
    #[serde(default)]
    output: OutputConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DecodeConfig {
    #[serde(default = "default_allow_untagged")]
    allow_untagged: bool,
    #[serde(default)]
    direction: Direction,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            allow_untagged: default_allow_untagged(),
            direction: Direction::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct OutputConfig {
    #[serde(default)]
    pretty: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct LoggingConfig {
    /// Path to log file (if set, logs are written there in addition to stderr)
    log_file: Option<PathBuf>,
    /// Log level or filter directive
    /// If not set, uses RUST_LOG environment variable or defaults to "info"
    log_level: Option<String>,
}

fn default_allow_untagged() -> bool {
    true
}

/// Values given on the command line. `None` leaves the lower layers in charge.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub direction: Option<Direction>,
    pub allow_untagged: Option<bool>,
    pub pretty: Option<bool>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Envelope used by `decode`
    pub direction: Direction,
    /// Trial-parse frames without a usable `MessageType`
    pub allow_untagged: bool,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Path to log file
    pub log_file: Option<PathBuf>,
    /// Log level (if set, overrides RUST_LOG environment variable)
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration with full priority chain: CLI args > env vars > config files > defaults.
    ///
    /// Config files are merged in this order:
    /// 1. `config.toml` in the user config directory (~/.config/jellyfin-inspect/ on Linux)
    /// 2. `.jellyfin-inspect.toml` in the current directory
    pub fn from_figment(overrides: &Overrides) -> anyhow::Result<Self> {
        let local_config = std::env::current_dir()
            .ok()
            .map(|d| d.join(LOCAL_CONFIG_FILE));
        Self::from_config_files([user_config_path(), local_config].into_iter().flatten(), overrides)
    }

    /// Load configuration from `files`, later files overriding earlier ones.
    /// Missing files are skipped. Environment and CLI layers apply on top.
    pub fn from_config_files<I>(files: I, overrides: &Overrides) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        // 1. Defaults
        let mut figment = Figment::new().merge(Serialized::defaults(ConfigFile::default()));

        // 2. Config files
        for path in files {
            if path.exists() {
                tracing::debug!("Merging config file {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
        }

        // 3. Environment variables (JELLYFIN_INSPECT_DECODE__DIRECTION=inbound)
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        // 4. CLI arguments (highest priority)
        if let Some(direction) = overrides.direction {
            figment = figment.merge(Serialized::default("decode.direction", direction));
        }
        if let Some(allow) = overrides.allow_untagged {
            figment = figment.merge(Serialized::default("decode.allow_untagged", allow));
        }
        if let Some(pretty) = overrides.pretty {
            figment = figment.merge(Serialized::default("output.pretty", pretty));
        }
        if let Some(ref path) = overrides.log_file {
            figment = figment.merge(Serialized::default("logging.log_file", path));
        }
        if let Some(ref level) = overrides.log_level {
            figment = figment.merge(Serialized::default("logging.log_level", level));
        }

        let file: ConfigFile = figment.extract()?;

        Ok(Self {
            direction: file.decode.direction,
            allow_untagged: file.decode.allow_untagged,
            pretty: file.output.pretty,
            log_file: file.logging.log_file,
            log_level: file.logging.log_level,
        })
    }
}

/// `config.toml` in the platform's user config directory.
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "jellyfin-inspect")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

impl Default for Config {
    fn default() -> Self {
        let file = ConfigFile::default();
        Self {
            direction: file.decode.direction,
            allow_untagged: file.decode.allow_untagged,
            pretty: file.output.pretty,
            log_file: None,
            log_level: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn clear_env() {
        for key in [
            "JELLYFIN_INSPECT_DECODE__DIRECTION",
            "JELLYFIN_INSPECT_DECODE__ALLOW_UNTAGGED",
            "JELLYFIN_INSPECT_OUTPUT__PRETTY",
            "JELLYFIN_INSPECT_LOGGING__LOG_LEVEL",
        ] {
            std::env::remove_var(key);
        }
    }

    /// Load with only the local config file of `dir`.
    fn load_local(dir: &TempDir, overrides: &Overrides) -> anyhow::Result<Config> {
        Config::from_config_files([dir.path().join(LOCAL_CONFIG_FILE)], overrides)
    }

    #[test]
    #[serial]
    fn test_load_defaults() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();

        let config = load_local(&temp_dir, &Overrides::default()).unwrap();

        assert_eq!(config.direction, Direction::Outbound);
        assert!(config.allow_untagged);
        assert!(!config.pretty);
        assert!(config.log_file.is_none());
    }

    #[test]
    #[serial]
    fn test_load_local_config_file() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"
[decode]
direction = "inbound"
allow_untagged = false

[logging]
log_level = "debug"
"#;
        fs::write(temp_dir.path().join(LOCAL_CONFIG_FILE), config_content).unwrap();

        let config = load_local(&temp_dir, &Overrides::default()).unwrap();

        assert_eq!(config.direction, Direction::Inbound);
        assert!(!config.allow_untagged);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    #[serial]
    fn test_env_overrides_file_and_cli_overrides_env() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(LOCAL_CONFIG_FILE),
            "[output]\npretty = false\n",
        )
        .unwrap();
        std::env::set_var("JELLYFIN_INSPECT_OUTPUT__PRETTY", "true");
        std::env::set_var("JELLYFIN_INSPECT_DECODE__DIRECTION", "inbound");

        let overrides = Overrides {
            direction: Some(Direction::Outbound),
            ..Default::default()
        };
        let config = load_local(&temp_dir, &overrides).unwrap();
        clear_env();

        assert!(config.pretty);
        assert_eq!(config.direction, Direction::Outbound);
    }

    #[test]
    #[serial]
    fn test_invalid_direction_is_an_error() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(LOCAL_CONFIG_FILE),
            "[decode]\ndirection = \"sideways\"\n",
        )
        .unwrap();

        let result = load_local(&temp_dir, &Overrides::default());
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_local_file_overrides_user_file() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        let user = temp_dir.path().join("config.toml");
        let local = temp_dir.path().join(LOCAL_CONFIG_FILE);
        fs::write(&user, "[decode]\ndirection = \"inbound\"\n\n[output]\npretty = true\n").unwrap();
        fs::write(&local, "[decode]\ndirection = \"outbound\"\n").unwrap();

        let config = Config::from_config_files([user, local], &Overrides::default()).unwrap();

        assert_eq!(config.direction, Direction::Outbound);
        assert!(config.pretty);
    }

    #[test]
    #[serial]
    fn test_missing_files_are_skipped() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();

        let config = Config::from_config_files(
            [temp_dir.path().join("absent.toml")],
            &Overrides::default(),
        )
        .unwrap();

        assert_eq!(config, Config::default());
    }
}
