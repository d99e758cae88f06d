//! Optional configuration file support.
//!
//! Every key mirrors a command-line flag. A flag left at its default value
//! is filled from the file, anything given explicitly on the command line wins.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, DEFAULT_OUTPUT};
use crate::history::DEFAULT_HISTORY_CAPACITY;
use crate::http_client::DEFAULT_TIMEOUT_SECS;
use crate::server::{DEFAULT_HOST, DEFAULT_PORT};

const APP_NAME: &str = "seo-tag-inspector";

/// Extensions searched for, in priority order.
const SEARCH_EXTENSIONS: [&str; 4] = ["json", "toml", "yaml", "yml"];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub url: Option<String>,
    pub serve: Option<bool>,
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Number of analyses kept by the in-memory history
    pub history_capacity: Option<usize>,
    /// Fetch timeout in seconds
    pub timeout: Option<u64>,
    /// `text` or `json`
    pub output: Option<String>,
    pub save: Option<String>,
    pub verbose: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Detects the format from the file extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(ConfigFormat::Json),
            "toml" => Some(ConfigFormat::Toml),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            _ => None,
        }
    }

    fn parse(self, contents: &str, path: &Path) -> Result<Config> {
        let config = match self {
            ConfigFormat::Json => serde_json::from_str(contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?,
            ConfigFormat::Toml => toml::from_str(contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?,
            ConfigFormat::Yaml => serde_yaml::from_str(contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?,
        };
        Ok(config)
    }
}

/// Keeps the command-line value unless it still equals the flag default.
fn prefer_cli<T: PartialEq>(cli: T, default: T, file: Option<T>) -> T {
    if cli != default {
        cli
    } else {
        file.unwrap_or(cli)
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let format = ConfigFormat::from_path(path)
            .with_context(|| format!("Unsupported config file format: {}", path.display()))?;

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = format.parse(&contents, path)?;
        tracing::debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Candidate files, highest priority first: the working directory,
    /// then `$XDG_CONFIG_HOME/seo-tag-inspector` (or `~/.config/seo-tag-inspector`).
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = SEARCH_EXTENSIONS
            .iter()
            .map(|ext| PathBuf::from(format!("{}.{}", APP_NAME, ext)))
            .collect();

        let config_home = std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

        if let Some(app_dir) = config_home.map(|home| home.join(APP_NAME)) {
            paths.extend(
                SEARCH_EXTENSIONS
                    .iter()
                    .map(|ext| app_dir.join(format!("config.{}", ext))),
            );
        }

        paths
    }

    /// Loads the first existing default file. A file that exists but fails
    /// to parse is an error rather than being skipped.
    pub fn from_default_paths() -> Result<Option<Self>> {
        Self::default_paths()
            .into_iter()
            .find(|path| path.exists())
            .map(|path| Self::from_file(&path))
            .transpose()
    }

    /// Loads `explicit` when given, otherwise searches the default paths.
    pub fn load(explicit: Option<&str>) -> Result<Option<Self>> {
        match explicit {
            Some(path) => Self::from_file(Path::new(path)).map(Some),
            None => Self::from_default_paths(),
        }
    }

    pub fn merge_with_cli(&self, cli: &Cli) -> Cli {
        Cli {
            url: cli.url.clone().or_else(|| self.url.clone()),
            serve: cli.serve || self.serve.unwrap_or(false),
            host: prefer_cli(cli.host.clone(), DEFAULT_HOST.to_string(), self.host.clone()),
            port: prefer_cli(cli.port, DEFAULT_PORT, self.port),
            history_capacity: prefer_cli(
                cli.history_capacity,
                DEFAULT_HISTORY_CAPACITY,
                self.history_capacity,
            ),
            timeout: prefer_cli(cli.timeout, DEFAULT_TIMEOUT_SECS, self.timeout),
            output: prefer_cli(
                cli.output.clone(),
                DEFAULT_OUTPUT.to_string(),
                self.output.clone(),
            ),
            save: cli.save.clone().or_else(|| self.save.clone()),
            verbose: cli.verbose || self.verbose.unwrap_or(false),
            config: cli.config.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tempfile::{NamedTempFile, tempdir};

    fn default_cli() -> Cli {
        Cli {
            url: Some("https://example.com".to_string()),
            serve: false,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            timeout: DEFAULT_TIMEOUT_SECS,
            output: DEFAULT_OUTPUT.to_string(),
            save: None,
            verbose: false,
            config: None,
        }
    }

    fn write_temp_config(extension: &str, contents: &str) -> PathBuf {
        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path().with_extension(extension);
        fs::write(&temp_path, contents).unwrap();
        temp_path
    }

    #[test]
    fn test_config_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.json")),
            Some(ConfigFormat::Json)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.toml")),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.YAML")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.yml")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(ConfigFormat::from_path(Path::new("config.txt")), None);
    }

    #[test]
    fn test_load_json_config() {
        let temp_path = write_temp_config(
            "json",
            r#"
{
    "serve": true,
    "host": "0.0.0.0",
    "port": 8080,
    "history_capacity": 25,
    "timeout": 5,
    "output": "json"
}
            "#,
        );

        let config = Config::from_file(&temp_path).unwrap();
        assert_eq!(config.serve, Some(true));
        assert_eq!(config.host, Some("0.0.0.0".to_string()));
        assert_eq!(config.port, Some(8080));
        assert_eq!(config.history_capacity, Some(25));
        assert_eq!(config.timeout, Some(5));
        assert_eq!(config.output, Some("json".to_string()));

        fs::remove_file(temp_path).ok();
    }

    #[test]
    fn test_load_toml_config() {
        let temp_path = write_temp_config(
            "toml",
            r#"
url = "example.com"
port = 8080
timeout = 30
verbose = true
            "#,
        );

        let config = Config::from_file(&temp_path).unwrap();
        assert_eq!(config.url, Some("example.com".to_string()));
        assert_eq!(config.port, Some(8080));
        assert_eq!(config.timeout, Some(30));
        assert_eq!(config.verbose, Some(true));
        assert_eq!(config.host, None);

        fs::remove_file(temp_path).ok();
    }

    #[test]
    fn test_load_yaml_config() {
        let temp_path = write_temp_config(
            "yml",
            r#"
host: "0.0.0.0"
history_capacity: 3
save: "report.json"
            "#,
        );

        let config = Config::from_file(&temp_path).unwrap();
        assert_eq!(config.host, Some("0.0.0.0".to_string()));
        assert_eq!(config.history_capacity, Some(3));
        assert_eq!(config.save, Some("report.json".to_string()));

        fs::remove_file(temp_path).ok();
    }

    #[test]
    fn test_invalid_configs_are_errors() {
        for (ext, contents) in [
            ("json", "{ invalid json }"),
            ("toml", "[[[ invalid toml"),
            ("yaml", "port: \"unterminated\n  timeout: x"),
        ] {
            let temp_path = write_temp_config(ext, contents);
            assert!(
                Config::from_file(&temp_path).is_err(),
                "{} config should fail to parse",
                ext
            );
            fs::remove_file(temp_path).ok();
        }
    }

    #[test]
    fn test_unsupported_format() {
        let temp_path = write_temp_config("txt", "content");
        let result = Config::from_file(&temp_path);
        assert!(result.is_err());
        fs::remove_file(temp_path).ok();
    }

    #[test]
    fn test_load_explicit_path() {
        let temp_path = write_temp_config("json", r#"{"port": 9000}"#);

        let config = Config::load(temp_path.to_str()).unwrap().unwrap();
        assert_eq!(config.port, Some(9000));

        fs::remove_file(temp_path).ok();
    }

    #[test]
    fn test_load_missing_explicit_path_is_error() {
        assert!(Config::load(Some("/nonexistent/seo-tag-inspector.json")).is_err());
    }

    #[test]
    fn test_merge_with_cli_defaults() {
        let config = Config {
            url: Some("from-config.example".to_string()),
            serve: Some(true),
            port: Some(8080),
            history_capacity: Some(20),
            timeout: Some(5),
            output: Some("json".to_string()),
            ..Default::default()
        };

        let cli = Cli {
            url: None,
            ..default_cli()
        };

        let merged = config.merge_with_cli(&cli);
        assert_eq!(merged.url, Some("from-config.example".to_string())); // from config
        assert!(merged.serve); // from config
        assert_eq!(merged.host, "127.0.0.1"); // default
        assert_eq!(merged.port, 8080); // from config
        assert_eq!(merged.history_capacity, 20); // from config
        assert_eq!(merged.timeout, 5); // from config
        assert_eq!(merged.output, "json"); // from config
    }

    #[test]
    fn test_merge_with_cli_overrides() {
        let config = Config {
            url: Some("from-config.example".to_string()),
            host: Some("10.0.0.1".to_string()),
            port: Some(8080),
            timeout: Some(5),
            output: Some("json".to_string()),
            save: Some("config.json".to_string()),
            ..Default::default()
        };

        let cli = Cli {
            host: "0.0.0.0".to_string(),
            port: 3000,
            timeout: 60,
            output: "xml".to_string(),
            save: Some("report.json".to_string()),
            verbose: true,
            ..default_cli()
        };

        let merged = config.merge_with_cli(&cli);
        assert_eq!(merged.url, Some("https://example.com".to_string())); // CLI value
        assert_eq!(merged.host, "0.0.0.0"); // CLI override
        assert_eq!(merged.port, 3000); // CLI override
        assert_eq!(merged.timeout, 60); // CLI override
        assert_eq!(merged.output, "xml"); // CLI override
        assert_eq!(merged.save, Some("report.json".to_string())); // CLI value
        assert!(merged.verbose); // CLI value
    }

    #[test]
    fn test_default_paths_exists() {
        let paths = Config::default_paths();
        assert!(!paths.is_empty());

        for name in [
            "seo-tag-inspector.json",
            "seo-tag-inspector.toml",
            "seo-tag-inspector.yaml",
        ] {
            assert!(paths.iter().any(|p| p.to_string_lossy().contains(name)));
        }
    }

    #[test]
    #[serial]
    fn test_default_paths_with_xdg_config_home() {
        let custom_config = "/custom/config/path";
        unsafe {
            env::set_var("XDG_CONFIG_HOME", custom_config);
        }

        let paths = Config::default_paths();

        assert!(paths.iter().any(|p| {
            p.to_string_lossy()
                .contains("/custom/config/path/seo-tag-inspector")
        }));

        unsafe {
            env::remove_var("XDG_CONFIG_HOME");
        }
    }

    #[test]
    #[serial]
    fn test_default_paths_with_empty_xdg_config_home() {
        // Empty XDG_CONFIG_HOME falls back to ~/.config
        unsafe {
            env::set_var("XDG_CONFIG_HOME", "");
        }

        let paths = Config::default_paths();
        assert!(!paths.is_empty());
        if dirs::home_dir().is_some() {
            assert!(
                paths
                    .iter()
                    .any(|p| p.ends_with(".config/seo-tag-inspector/config.json"))
            );
        }

        unsafe {
            env::remove_var("XDG_CONFIG_HOME");
        }
    }

    #[test]
    #[serial]
    fn test_from_default_paths_priority_order() {
        let temp_dir = tempdir().unwrap();
        let original_dir = env::current_dir().unwrap();
        env::set_current_dir(temp_dir.path()).unwrap();

        let temp_config_dir = tempdir().unwrap();
        let app_dir = temp_config_dir.path().join("seo-tag-inspector");
        fs::create_dir_all(&app_dir).unwrap();
        unsafe {
            env::set_var("XDG_CONFIG_HOME", temp_config_dir.path());
        }

        fs::write(temp_dir.path().join("seo-tag-inspector.json"), r#"{"port": 7000}"#).unwrap();
        fs::write(app_dir.join("config.toml"), "port = 9000").unwrap();

        // Current directory wins over the user config directory
        let config = Config::from_default_paths().unwrap().unwrap();
        assert_eq!(config.port, Some(7000));

        env::set_current_dir(&original_dir).ok();
        unsafe {
            env::remove_var("XDG_CONFIG_HOME");
        }
    }

    #[test]
    #[serial]
    fn test_from_default_paths_finds_config_dir_config() {
        let temp_cwd = tempdir().unwrap();
        let original_dir = env::current_dir().unwrap();
        env::set_current_dir(temp_cwd.path()).unwrap();

        let temp_config_dir = tempdir().unwrap();
        let app_dir = temp_config_dir.path().join("seo-tag-inspector");
        fs::create_dir_all(&app_dir).unwrap();
        unsafe {
            env::set_var("XDG_CONFIG_HOME", temp_config_dir.path());
        }

        fs::write(app_dir.join("config.yaml"), "timeout: 45").unwrap();

        let config = Config::from_default_paths().unwrap().unwrap();
        assert_eq!(config.timeout, Some(45));

        env::set_current_dir(&original_dir).ok();
        unsafe {
            env::remove_var("XDG_CONFIG_HOME");
        }
    }

    #[test]
    #[serial]
    fn test_from_default_paths_returns_none_when_no_config_exists() {
        let temp_dir = tempdir().unwrap();
        let original_dir = env::current_dir().unwrap();
        env::set_current_dir(temp_dir.path()).unwrap();

        let temp_config_dir = tempdir().unwrap();
        unsafe {
            env::set_var("XDG_CONFIG_HOME", temp_config_dir.path());
        }

        let result = Config::from_default_paths();
        assert!(result.is_ok());
        assert!(result.unwrap().is_none());

        env::set_current_dir(&original_dir).ok();
        unsafe {
            env::remove_var("XDG_CONFIG_HOME");
        }
    }

    #[test]
    #[serial]
    fn test_from_default_paths_returns_error_on_invalid_config() {
        let temp_dir = tempdir().unwrap();
        let original_dir = env::current_dir().unwrap();
        env::set_current_dir(temp_dir.path()).unwrap();

        fs::write(
            temp_dir.path().join("seo-tag-inspector.json"),
            "{ invalid json syntax }",
        )
        .unwrap();

        assert!(Config::from_default_paths().is_err());

        env::set_current_dir(&original_dir).ok();
    }
}
