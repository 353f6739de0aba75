use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// The program that loads an ADL file and writes it back out. Defaults to an
/// absolute path under `~/epics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProducerConfig {
    pub program: PathBuf,
    /// Arguments placed before the input path.
    pub args: Vec<String>,
    /// Where the producer writes the regenerated file.
    pub output: PathBuf,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from(
                shellexpand::tilde("~/epics/qtedm/bin/Linux-x86_64/qtedm").as_ref(),
            ),
            args: vec!["-testSave".to_string()],
            output: PathBuf::from("/tmp/qtedmTest.adl"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            program: "diff".to_string(),
            args: vec!["-u".to_string(), "-w".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    pub width_widgets: Vec<String>,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            width_widgets: vec!["rectangle".to_string(), "polyline".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// File extension of the documents to check, without the dot.
    pub extension: String,
    pub producer: ProducerConfig,
    pub diff: DiffConfig,
    pub normalize: NormalizeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extension: "adl".to_string(),
            producer: ProducerConfig::default(),
            diff: DiffConfig::default(),
            normalize: NormalizeConfig::default(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded paths
        config.producer.program =
            Self::expand_path(&config.producer.program).unwrap_or(config.producer.program);
        config.producer.output =
            Self::expand_path(&config.producer.output).unwrap_or(config.producer.output);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/adl-roundtrip");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/adl-roundtrip/config.toml"));
    }

    #[test]
    fn test_defaults_match_the_display_editor() {
        let config = Config::default();

        assert_eq!(config.extension, "adl");
        assert!(config.producer.program.is_absolute());
        assert!(
            config
                .producer
                .program
                .ends_with("epics/qtedm/bin/Linux-x86_64/qtedm")
        );
        assert_eq!(config.producer.args, vec!["-testSave"]);
        assert_eq!(config.producer.output, PathBuf::from("/tmp/qtedmTest.adl"));
        assert_eq!(config.diff.program, "diff");
        assert_eq!(config.diff.args, vec!["-u", "-w"]);
        assert_eq!(config.normalize.width_widgets, vec!["rectangle", "polyline"]);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = Config {
            extension: "ADL".to_string(),
            ..Config::default()
        };

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
[producer]
program = "/opt/qtedm/bin/qtedm"

[normalize]
width_widgets = ["rectangle"]
"#,
        )
        .unwrap();

        assert_eq!(config.producer.program, PathBuf::from("/opt/qtedm/bin/qtedm"));
        assert_eq!(config.producer.args, vec!["-testSave"]);
        assert_eq!(config.normalize.width_widgets, vec!["rectangle"]);
        assert_eq!(config.diff, DiffConfig::default());
        assert_eq!(config.extension, "adl");
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("ADL_ROUNDTRIP_TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$ADL_ROUNDTRIP_TEST_VAR/qtedm");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/qtedm")));

        unsafe {
            env::remove_var("ADL_ROUNDTRIP_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_path_with_absolute_path() {
        let path = PathBuf::from("/absolute/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_config_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "extension = [").unwrap();

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let test_config = Config {
            producer: ProducerConfig {
                program: PathBuf::from("/opt/qtedm/bin/qtedm"),
                args: vec!["-testSave".to_string()],
                output: PathBuf::from("/tmp/out.adl"),
            },
            ..Config::default()
        };

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_loaded_paths_are_expanded() {
        unsafe {
            env::set_var("ADL_ROUNDTRIP_QTEDM", "/custom/qtedm");
        }
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            "[producer]\nprogram = \"$ADL_ROUNDTRIP_QTEDM/bin/qtedm\"\noutput = \"~/qtedmTest.adl\"\n",
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.producer.program, PathBuf::from("/custom/qtedm/bin/qtedm"));
        assert!(!config.producer.output.to_string_lossy().starts_with('~'));

        unsafe {
            env::remove_var("ADL_ROUNDTRIP_QTEDM");
        }
    }
}
