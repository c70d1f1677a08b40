//! Configuration management for navfix.
//!
//! Parses `navfix.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! The three paths a fix run needs (documentation root, input
//! configuration document, output document) live in an explicit
//! [`PathsConfig`] that is passed into each component, so tests can run
//! against arbitrary temporary directories. CLI settings can be applied
//! during load via [`CliSettings`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "navfix.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override documentation root directory.
    pub docs_dir: Option<PathBuf>,
    /// Override input site configuration document.
    pub nav_file: Option<PathBuf>,
    /// Override output document path.
    pub output_file: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Paths section (relative strings from TOML).
    paths: PathsRaw,

    /// Resolved paths (set after loading).
    #[serde(skip)]
    pub paths_resolved: PathsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw paths section as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PathsRaw {
    docs_dir: Option<String>,
    nav_file: Option<String>,
    output_file: Option<String>,
}

/// Resolved fix-run paths.
#[derive(Debug, Default)]
pub struct PathsConfig {
    /// Documentation root directory, scanned recursively for `.md` files.
    pub docs_dir: PathBuf,
    /// Input site configuration document.
    pub nav_file: PathBuf,
    /// Output document path.
    pub output_file: PathBuf,
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
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `navfix.toml` in current directory and
    /// parents, falling back to defaults relative to the working
    /// directory when none is found.
    ///
    /// CLI settings are applied after loading and path resolution, allowing
    /// CLI arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing
    /// fails, or validation fails after overrides.
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
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(docs_dir) = &settings.docs_dir {
            self.paths_resolved.docs_dir.clone_from(docs_dir);
        }
        if let Some(nav_file) = &settings.nav_file {
            self.paths_resolved.nav_file.clone_from(nav_file);
        }
        if let Some(output_file) = &settings.output_file {
            self.paths_resolved.output_file.clone_from(output_file);
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

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            paths: PathsRaw::default(),
            paths_resolved: PathsConfig {
                docs_dir: base.join("docs/mkdocs"),
                nav_file: base.join("mkdocs.yml"),
                output_file: base.join("mkdocs_fixed.yml"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.paths_resolved = PathsConfig {
            docs_dir: resolve(self.paths.docs_dir.as_deref(), "docs/mkdocs"),
            nav_file: resolve(self.paths.nav_file.as_deref(), "mkdocs.yml"),
            output_file: resolve(self.paths.output_file.as_deref(), "mkdocs_fixed.yml"),
        };
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading and CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the output path equals the
    /// input document path (the run would clobber its own input).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.paths_resolved.output_file == self.paths_resolved.nav_file {
            return Err(ConfigError::Validation(
                "paths.output_file must differ from paths.nav_file".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(
            config.paths_resolved.docs_dir,
            PathBuf::from("/test/docs/mkdocs")
        );
        assert_eq!(
            config.paths_resolved.nav_file,
            PathBuf::from("/test/mkdocs.yml")
        );
        assert_eq!(
            config.paths_resolved.output_file,
            PathBuf::from("/test/mkdocs_fixed.yml")
        );
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml = "";
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        assert_eq!(
            config.paths_resolved.docs_dir,
            PathBuf::from("/project/docs/mkdocs")
        );
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[paths]
docs_dir = "documentation"
nav_file = "site.yml"
output_file = "site_fixed.yml"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.paths_resolved.docs_dir,
            PathBuf::from("/project/documentation")
        );
        assert_eq!(
            config.paths_resolved.nav_file,
            PathBuf::from("/project/site.yml")
        );
        assert_eq!(
            config.paths_resolved.output_file,
            PathBuf::from("/project/site_fixed.yml")
        );
    }

    #[test]
    fn test_apply_cli_settings_docs_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            docs_dir: Some(PathBuf::from("/custom/docs")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.paths_resolved.docs_dir, PathBuf::from("/custom/docs"));
        // Unchanged
        assert_eq!(
            config.paths_resolved.nav_file,
            PathBuf::from("/test/mkdocs.yml")
        );
    }

    #[test]
    fn test_apply_cli_settings_multiple() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            nav_file: Some(PathBuf::from("/in/site.yml")),
            output_file: Some(PathBuf::from("/out/site.yml")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.paths_resolved.nav_file, PathBuf::from("/in/site.yml"));
        assert_eq!(
            config.paths_resolved.output_file,
            PathBuf::from("/out/site.yml")
        );
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let config_before = Config::default_with_base(Path::new("/test"));
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(
            config.paths_resolved.docs_dir,
            config_before.paths_resolved.docs_dir
        );
        assert_eq!(
            config.paths_resolved.nav_file,
            config_before.paths_resolved.nav_file
        );
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_output_equals_input_fails() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.paths_resolved.output_file = PathBuf::from("/test/mkdocs.yml");

        let result = config.validate();

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        assert!(err.to_string().contains("output_file"));
    }

    #[test]
    fn test_load_explicit_missing_config_fails() {
        let result = Config::load(Some(Path::new("/nonexistent/navfix.toml")), None);

        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file_resolves_against_config_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_file = temp_dir.path().join("navfix.toml");
        std::fs::write(&config_file, "[paths]\ndocs_dir = \"docs\"\n").unwrap();

        let config = Config::load(Some(&config_file), None).unwrap();

        assert_eq!(config.paths_resolved.docs_dir, temp_dir.path().join("docs"));
        assert_eq!(config.config_path, Some(config_file));
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_file = temp_dir.path().join("navfix.toml");
        std::fs::write(&config_file, "[paths\n").unwrap();

        let result = Config::load(Some(&config_file), None);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
