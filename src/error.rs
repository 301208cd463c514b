use std::{io, path::StripPrefixError};

use serde::{Deserialize, Serialize};
use serde_json::Error as JsonError;
use thiserror::Error;

/// Failures of the collaborators around the validation core (reading notes, walking the vault,
/// loading configuration).
///
/// Content problems inside a note are never reported through this type; they are
/// [`Finding`](crate::codec::Finding)s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
pub enum LintError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("File System error: {0}")]
    Io(String),
    #[error("Item Not Found: {0}")]
    NotFound(String),
    #[error("You do not have permission to access this resource")]
    PermissionDenied,
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
}

impl From<StripPrefixError> for LintError {
    fn from(src: StripPrefixError) -> LintError {
        LintError::NotFound(format!("Strip prefix failed for path. Error: {src}"))
    }
}

impl From<toml::de::Error> for LintError {
    fn from(src: toml::de::Error) -> LintError {
        LintError::Serialization(format!("Toml deserialization error: {src}"))
    }
}

impl From<toml::ser::Error> for LintError {
    fn from(src: toml::ser::Error) -> LintError {
        LintError::Serialization(format!("Toml serialization error: {src}"))
    }
}

impl From<JsonError> for LintError {
    fn from(src: JsonError) -> LintError {
        LintError::Serialization(format!("JSON (de)serialization error: {src}"))
    }
}

impl From<io::Error> for LintError {
    fn from(x: io::Error) -> Self {
        match x.kind() {
            io::ErrorKind::NotFound => LintError::NotFound(format!("{x}")),
            io::ErrorKind::PermissionDenied => LintError::PermissionDenied,
            _ => LintError::Io(format!("IOError: {}", x.kind())),
        }
    }
}

impl From<walkdir::Error> for LintError {
    fn from(x: walkdir::Error) -> Self {
        let path = x.path().map(|p| format!("{p:?}")).unwrap_or_default();
        match x.into_io_error() {
            Some(io_error) => LintError::from(io_error),
            None => LintError::Io(format!("directory walk failed at {path}")),
        }
    }
}
