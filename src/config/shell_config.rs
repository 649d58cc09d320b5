use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use compio::fs;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::ext::PathDisplayExt;

const CONFIG_FILE_NAME: &str = "vfshell.yaml";

const VFS_KEY: &str = "vfs";
const SCRIPT_KEY: &str = "script";
const USER_KEY: &str = "user";
const HOST_KEY: &str = "host";

/// Settings read from the optional YAML configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellConfig {
    pub vfs: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub user: Option<String>,
    pub host: Option<String>,
}

impl ShellConfig {
    /// Reads an explicitly named file, or `vfshell.yaml` from the working
    /// directory when it exists. No file at all yields the defaults.
    pub async fn read(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_path(path).await,
            None => {
                let default_path = Path::new(CONFIG_FILE_NAME);
                if default_path.is_file() {
                    Self::from_path(default_path).await
                } else {
                    debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                    Ok(Self::default())
                }
            }
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self, ConfigError> {
        debug!("Opening config file: {}", path.path_display());
        let bytes = fs::read(path).await.context(ReadSnafu {
            file_path: path.path_display(),
        })?;
        debug!("Successfully read config file: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.path_display(),
        })?;
        contents.as_str().try_into()
    }

    fn string_value(
        top_level: &LinkedHashMap<Yaml, Yaml>,
        key: &'static str,
    ) -> Result<Option<String>, ConfigError> {
        match top_level.get(&Yaml::Value(Scalar::String(Cow::Borrowed(key)))) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(|s| Some(s.to_string()))
                .context(InvalidValueSnafu { key }),
        }
    }
}

impl TryFrom<&str> for ShellConfig {
    type Error = ConfigError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents.first().context(MalformedConfigSnafu)?;
        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;

        for key in top_level.keys() {
            match key.as_str() {
                Some(VFS_KEY | SCRIPT_KEY | USER_KEY | HOST_KEY) => {}
                other => debug!("Skipping unknown config key: {:?}", other),
            }
        }

        Ok(ShellConfig {
            vfs: Self::string_value(top_level, VFS_KEY)?.map(PathBuf::from),
            script: Self::string_value(top_level, SCRIPT_KEY)?.map(PathBuf::from),
            user: Self::string_value(top_level, USER_KEY)?,
            host: Self::string_value(top_level, HOST_KEY)?,
        })
    }
}

#[derive(Debug, Snafu)]
pub enum ConfigError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Config file {} is not valid UTF-8", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted config file"))]
    MalformedConfigError,
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMapError,
    #[snafu(display("Config value '{}' should be a string", key))]
    InvalidValueError { key: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[compio::test]
    async fn config_returns_error_on_nonexistent_file() {
        let result = ShellConfig::read(Some(Path::new("nonexistent.yaml"))).await;
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[compio::test]
    async fn config_reads_file_from_disk() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "vfs: fs.csv\nscript: start.txt").expect("Failed to write to temp file");

        let config = ShellConfig::read(Some(file.path())).await.unwrap();
        assert_eq!(config.vfs, Some(PathBuf::from("fs.csv")));
        assert_eq!(config.script, Some(PathBuf::from("start.txt")));
    }

    #[test]
    fn config_returns_error_on_invalid_yaml() {
        let result: Result<ShellConfig, _> = "invalid: yaml: content: [unclosed".try_into();
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn config_returns_error_on_empty_file() {
        let result: Result<ShellConfig, _> = "".try_into();
        assert!(matches!(result, Err(ConfigError::MalformedConfigError)));
    }

    #[test]
    fn config_returns_error_when_top_level_is_not_map() {
        let result: Result<ShellConfig, _> = "- item1\n- item2".try_into();
        assert!(matches!(result, Err(ConfigError::TopLevelNotMapError)));
    }

    #[test]
    fn config_returns_error_when_value_is_not_string() {
        let result: Result<ShellConfig, _> = "vfs:\n  - a\n  - b".try_into();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValueError { key: "vfs" })
        ));
    }

    #[test]
    fn config_reads_all_keys() {
        let yaml = r#"
vfs: /srv/manifest.csv
script: "scripts/startup.txt"
user: alice
host: workstation
"#;
        let config: ShellConfig = yaml.try_into().unwrap();
        assert_eq!(
            config,
            ShellConfig {
                vfs: Some(PathBuf::from("/srv/manifest.csv")),
                script: Some(PathBuf::from("scripts/startup.txt")),
                user: Some("alice".to_string()),
                host: Some("workstation".to_string()),
            }
        );
    }

    #[test]
    fn config_skips_unknown_keys() {
        let config: ShellConfig = "theme: dark\nuser: bob".try_into().unwrap();
        assert_eq!(config.user.as_deref(), Some("bob"));
        assert_eq!(config.vfs, None);
    }

    #[test]
    fn config_handles_unicode_values() {
        let config: ShellConfig = "user: \"пользователь\"".try_into().unwrap();
        assert_eq!(config.user.as_deref(), Some("пользователь"));
    }
}
