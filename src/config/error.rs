//! Errors raised while reading, validating or writing `config.yml`.

use std::path::PathBuf;

/// Problems with the configuration file or one of its values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No configuration file has been loaded, nowhere to save")]
    FilePathNotSet,

    #[error("No access_token in config.yml; add one to reach the backend")]
    AccessTokenNotSet,

    #[error("Cannot locate the home directory for the default configuration")]
    HomeDirectoryNotFound,

    #[error("Cannot read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot write {path}: {source}")]
    SaveFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot create configuration directory {path}: {source}")]
    CreateDirectoryFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed config.yml: {0}")]
    DeserializationFailed(String),

    #[error("Cannot encode configuration: {0}")]
    SerializationFailed(String),

    /// `page_size` is not one of the sizes the offset lists offer
    #[error("page_size {value} is not offered, choose one of {options:?}")]
    InvalidPageSize {
        value: usize,
        options: &'static [usize],
    },

    /// `keyset_limit` is not one of the limits the keyset lists offer
    #[error("keyset_limit {value} is not offered, choose one of {options:?}")]
    InvalidKeysetLimit {
        value: usize,
        options: &'static [usize],
    },

    #[error("debounce_ms {value} is outside {min}..={max}")]
    InvalidDebounce { value: u64, min: u64, max: u64 },

    #[error("log_level '{0}' is not one of off, error, warn, info, debug, trace")]
    InvalidLogLevel(String),

    #[error("base_url '{url}' is not usable: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_errors_name_the_field_and_choices() {
        let error = ConfigError::InvalidPageSize {
            value: 15,
            options: &[10, 20],
        };
        assert_eq!(
            error.to_string(),
            "page_size 15 is not offered, choose one of [10, 20]"
        );

        let error = ConfigError::InvalidDebounce {
            value: 9000,
            min: 50,
            max: 5000,
        };
        assert_eq!(error.to_string(), "debounce_ms 9000 is outside 50..=5000");

        let error = ConfigError::InvalidLogLevel("chatty".to_string());
        assert!(error.to_string().contains("'chatty'"));
    }

    #[test]
    fn test_io_errors_carry_the_path() {
        let error = ConfigError::ReadFailed {
            path: PathBuf::from("/etc/hr-console/config.yml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = error.to_string();
        assert!(message.starts_with("Cannot read /etc/hr-console/config.yml"));
        assert!(message.ends_with("denied"));
    }
}
