//! Configuration management module.
//!
//! This module handles loading and saving the application configuration:
//! backend location and token, list defaults, tree cascade policy, theme and
//! log level.

mod error;

pub use error::ConfigError;

use crate::debounce::DEFAULT_DEBOUNCE_MS;
use crate::error::AppError;
use crate::pagination::{DEFAULT_LIMIT, DEFAULT_PAGE_SIZE, LIMIT_OPTIONS, PAGE_SIZE_OPTIONS};
use crate::tree::CascadePolicy;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/hr-console";
const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";
const DEBOUNCE_RANGE_MS: (u64, u64) = (50, 5000);

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub access_token: Option<String>,
    pub base_url: String,
    pub page_size: usize,
    pub keyset_limit: usize,
    pub debounce_ms: u64,
    pub cascade: CascadePolicy,
    pub theme_name: String,
    pub log_level: String,
    base_url_override: Option<String>,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_keyset_limit")]
    pub keyset_limit: usize,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default)]
    pub cascade: CascadePolicy,
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_keyset_limit() -> usize {
    DEFAULT_LIMIT
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_theme_name() -> String {
    "slate".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl FileSpec {
    fn validate(&self) -> Result<(), ConfigError> {
        if !PAGE_SIZE_OPTIONS.contains(&self.page_size) {
            return Err(ConfigError::InvalidPageSize {
                value: self.page_size,
                options: &PAGE_SIZE_OPTIONS,
            });
        }
        if !LIMIT_OPTIONS.contains(&self.keyset_limit) {
            return Err(ConfigError::InvalidKeysetLimit {
                value: self.keyset_limit,
                options: &LIMIT_OPTIONS,
            });
        }
        let (min, max) = DEBOUNCE_RANGE_MS;
        if !(min..=max).contains(&self.debounce_ms) {
            return Err(ConfigError::InvalidDebounce {
                value: self.debounce_ms,
                min,
                max,
            });
        }
        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(ConfigError::InvalidLogLevel(self.log_level.clone()));
        }
        match reqwest::Url::parse(&self.base_url) {
            Ok(url) if !url.cannot_be_a_base() => Ok(()),
            Ok(_) => Err(ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: String::from("not a base URL"),
            }),
            Err(e) => Err(ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: e.to_string(),
            }),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance holding defaults.
    ///
    pub fn new() -> Config {
        Config {
            access_token: None,
            base_url: default_base_url(),
            page_size: default_page_size(),
            keyset_limit: default_keyset_limit(),
            debounce_ms: default_debounce_ms(),
            cascade: CascadePolicy::default(),
            theme_name: default_theme_name(),
            log_level: default_log_level(),
            base_url_override: None,
            file_path: None,
        }
    }

    /// Try to load an existing configuration from the disk using the custom
    /// directory if provided. A missing file leaves the defaults in place.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        let file_path = dir_path.join(Path::new(FILE_NAME));
        if file_path.exists() {
            let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::ReadFailed {
                path: file_path.clone(),
                source: e,
            })?;
            self.apply_yaml(&contents)?;
        }
        self.file_path = Some(file_path);

        Ok(())
    }

    /// Overwrite fields from the YAML text of a configuration file. Nothing
    /// is applied unless every value is valid.
    ///
    fn apply_yaml(&mut self, contents: &str) -> Result<(), ConfigError> {
        let data: FileSpec = serde_yaml::from_str(contents)
            .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
        data.validate()?;
        self.access_token = data.access_token;
        self.base_url = data.base_url;
        self.page_size = data.page_size;
        self.keyset_limit = data.keyset_limit;
        self.debounce_ms = data.debounce_ms;
        self.cascade = data.cascade;
        self.theme_name = data.theme_name;
        self.log_level = data.log_level;
        Ok(())
    }

    fn to_yaml(&self) -> Result<String, ConfigError> {
        let data = FileSpec {
            access_token: self.access_token.clone(),
            base_url: self.base_url.clone(),
            page_size: self.page_size,
            keyset_limit: self.keyset_limit,
            debounce_ms: self.debounce_ms,
            cascade: self.cascade,
            theme_name: self.theme_name.clone(),
            log_level: self.log_level.clone(),
        };
        serde_yaml::to_string(&data).map_err(|e| ConfigError::SerializationFailed(e.to_string()))
    }

    /// Save the current configuration to disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let content = self.to_yaml()?;

        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Use `url` as the backend for this session only. The saved file keeps
    /// its own `base_url`.
    ///
    pub fn override_base_url(&mut self, url: &str) {
        self.base_url_override = Some(url.to_owned());
    }

    /// The backend URL to connect to: the session override if any, else the
    /// configured one.
    ///
    pub fn effective_base_url(&self) -> &str {
        self.base_url_override.as_deref().unwrap_or(&self.base_url)
    }

    /// Return the access token or an error if none is configured.
    ///
    pub fn require_access_token(&self) -> Result<&str, ConfigError> {
        self.access_token
            .as_deref()
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::AccessTokenNotSet)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Parse the configured log level, defaulting to info.
    ///
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Info)
    }

    /// Returns the path buffer for the default configuration directory or an
    /// error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(Path::new(DEFAULT_DIRECTORY_PATH))),
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}
