//! Errors surfaced to the user by the CLI

use crate::request::ValidationError;
use cmdline_config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unable to modify {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Unable to render report: {0}")]
    Report(#[from] serde_json::Error),
}

impl EditError {
    /// Usage problems exit with 2 like clap's own errors, everything else with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            EditError::Validation(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_message_names_file() {
        let err = EditError::Io {
            path: PathBuf::from("/boot/cmdline.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied"),
        };
        assert_eq!(
            err.to_string(),
            "Unable to modify /boot/cmdline.txt: Permission denied"
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_validation_exit_code() {
        let err = EditError::from(ValidationError::MissingTarget);
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "one of the following is required: key, atom");
    }
}
