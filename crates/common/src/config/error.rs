use std::error::Error as StdError;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("incorrect path: {0}")]
    IncorrectPath(String),
    #[error("parse error: {message}")]
    ParseError {
        message: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
    #[error("filesystem error: {message}")]
    PathError {
        message: String,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

impl ConfigError {
    pub fn incorrect_path(path: impl AsRef<Path>) -> Self {
        Self::IncorrectPath(format!(
            "Expected path '{}' to exist",
            path.as_ref().display()
        ))
    }

    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
            source: None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        let message = err.to_string();
        ConfigError::PathError {
            message,
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        let message = err.to_string();
        ConfigError::ParseError {
            message,
            source: Some(Box::new(err)),
        }
    }
}

impl From<walkdir::Error> for ConfigError {
    fn from(err: walkdir::Error) -> Self {
        let message = err.to_string();
        ConfigError::PathError {
            message,
            source: Some(Box::new(err)),
        }
    }
}
