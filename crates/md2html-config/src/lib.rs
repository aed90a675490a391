//! Configuration management for md2html.
//!
//! Parses `md2html.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `output.dir`
//! - `diagrams.command`
//! - `diagrams.background`
//! - `diagrams.temp_dir`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override the Mermaid CLI executable.
    pub mmdc_command: Option<String>,
    /// Override per-diagram render timeout (seconds).
    pub timeout_secs: Option<u64>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "md2html.toml";

/// Default output directory, relative to the working directory.
const DEFAULT_OUTPUT_DIR: &str = "output";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output configuration (paths are relative strings from TOML).
    output: OutputConfigRaw,
    /// Diagram rendering configuration.
    pub diagrams: DiagramsConfig,

    /// Resolved output directory (set after loading).
    #[serde(skip)]
    pub output_dir: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputConfigRaw::default(),
            diagrams: DiagramsConfig::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            config_path: None,
        }
    }
}

/// Raw output configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct OutputConfigRaw {
    dir: Option<String>,
}

/// Diagram rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DiagramsConfig {
    /// Mermaid CLI executable, either a name looked up on `PATH` or a path.
    pub command: String,
    /// Per-diagram render timeout in seconds.
    pub timeout_secs: u64,
    /// Background colour passed to `mmdc -b`.
    pub background: String,
    /// Directory for per-diagram temporary files (default: system temp dir).
    pub temp_dir: Option<PathBuf>,
}

impl DiagramsConfig {
    /// Render timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for DiagramsConfig {
    fn default() -> Self {
        Self {
            command: "mmdc".to_owned(),
            timeout_secs: 60,
            background: "transparent".to_owned(),
            temp_dir: None,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`diagrams.command`").
        field: String,
        /// Error message (e.g., "${`MMDC_PATH`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `md2html.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the merged configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(output_dir) = &settings.output_dir {
            self.output_dir.clone_from(output_dir);
        }
        if let Some(command) = &settings.mmdc_command {
            self.diagrams.command.clone_from(command);
        }
        if let Some(timeout_secs) = settings.timeout_secs {
            self.diagrams.timeout_secs = timeout_secs;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.diagrams.command, "diagrams.command")?;
        require_non_empty(&self.diagrams.background, "diagrams.background")?;

        if self.diagrams.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "diagrams.timeout_secs must be greater than 0".to_owned(),
            ));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "output.dir cannot be empty".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.output.dir {
            self.output.dir = Some(expand::expand_env(dir, "output.dir")?);
        }
        self.diagrams.command = expand::expand_env(&self.diagrams.command, "diagrams.command")?;
        self.diagrams.background =
            expand::expand_env(&self.diagrams.background, "diagrams.background")?;
        if let Some(ref dir) = self.diagrams.temp_dir {
            let expanded = expand::expand_env(&dir.to_string_lossy(), "diagrams.temp_dir")?;
            self.diagrams.temp_dir = Some(PathBuf::from(expanded));
        }
        Ok(())
    }

    /// Resolve explicit directories relative to the config file directory.
    ///
    /// Without `output.dir` the default stays relative to the working directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        if let Some(dir) = self.output.dir.as_deref() {
            self.output_dir = config_dir.join(dir);
        }
        if let Some(dir) = self.diagrams.temp_dir.take() {
            self.diagrams.temp_dir = Some(config_dir.join(dir));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.diagrams.command, "mmdc");
        assert_eq!(config.diagrams.timeout_secs, 60);
        assert_eq!(config.diagrams.timeout(), Duration::from_secs(60));
        assert_eq!(config.diagrams.background, "transparent");
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.diagrams.command, "mmdc");
        assert_eq!(config.diagrams.timeout_secs, 60);
    }

    #[test]
    fn test_parse_diagrams_config() {
        let toml = r#"
[diagrams]
command = "/usr/local/bin/mmdc"
timeout_secs = 120
background = "white"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.diagrams.command, "/usr/local/bin/mmdc");
        assert_eq!(config.diagrams.timeout_secs, 120);
        assert_eq!(config.diagrams.background, "white");
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[output]
dir = "site"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(config.output_dir, PathBuf::from("/project/site"));
    }

    #[test]
    fn test_resolve_paths_default_dir() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn test_load_from_explicit_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[output]\ndir = \"html\"\n\n[diagrams]\ntimeout_secs = 5\n")
            .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.output_dir, temp_dir.path().join("html"));
        assert_eq!(config.diagrams.timeout_secs, 5);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/md2html.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[diagrams\ncommand = ").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_apply_cli_settings_output_dir() {
        let mut config = Config::default();
        let overrides = CliSettings {
            output_dir: Some(PathBuf::from("/tmp/out")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.diagrams.command, "mmdc"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_multiple() {
        let mut config = Config::default();
        let overrides = CliSettings {
            output_dir: None,
            mmdc_command: Some("./node_modules/.bin/mmdc".to_owned()),
            timeout_secs: Some(10),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.diagrams.command, "./node_modules/.bin/mmdc");
        assert_eq!(config.diagrams.timeout_secs, 10);
    }

    #[test]
    fn test_cli_settings_override_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[diagrams]\ntimeout_secs = 5\n").unwrap();

        let overrides = CliSettings {
            timeout_secs: Some(30),
            ..Default::default()
        };
        let config = Config::load(Some(&path), Some(&overrides)).unwrap();

        assert_eq!(config.diagrams.timeout_secs, 30);
    }

    #[test]
    fn test_expand_env_vars_command() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("MD2HTML_CONFIG_TEST_MMDC", "/opt/mmdc");
        }

        let toml = r#"
[diagrams]
command = "${MD2HTML_CONFIG_TEST_MMDC}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.diagrams.command, "/opt/mmdc");

        unsafe {
            std::env::remove_var("MD2HTML_CONFIG_TEST_MMDC");
        }
    }

    #[test]
    fn test_expand_env_vars_background_and_temp_dir() {
        let toml = r#"
[diagrams]
background = "${MD2HTML_CONFIG_UNSET_BG:-white}"
temp_dir = "${MD2HTML_CONFIG_UNSET_TMP:-/var/tmp/md2html}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.diagrams.background, "white");
        assert_eq!(
            config.diagrams.temp_dir,
            Some(PathBuf::from("/var/tmp/md2html"))
        );
    }

    #[test]
    fn test_resolve_paths_temp_dir() {
        let toml = r#"
[diagrams]
temp_dir = "tmp"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(config.diagrams.temp_dir, Some(PathBuf::from("/project/tmp")));
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MD2HTML_CONFIG_MISSING");
        }

        let toml = r#"
[output]
dir = "${MD2HTML_CONFIG_MISSING}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("output.dir"));
    }

    #[test]
    fn test_validate_default_config_passes() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_timeout_zero() {
        let mut config = Config::default();
        config.diagrams.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_validate_command_empty() {
        let mut config = Config::default();
        config.diagrams.command = "  ".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("diagrams.command"));
    }

    #[test]
    fn test_validate_background_empty() {
        let mut config = Config::default();
        config.diagrams.background = String::new();
        assert!(config.validate().is_err());
    }
}
