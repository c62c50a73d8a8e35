//! Error types for Cairn operations.
//!
//! This module defines [`CairnError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - User-facing configuration failures carry a readable message and exit
//!   with the general failure code
//! - Server connectivity and integration failures are a distinct class so
//!   callers can tell "our config is wrong" from "the server is unreachable"
//! - Use `anyhow::Error` (via `CairnError::Other`) for unexpected errors

use thiserror::Error;

/// Process exit code for user-facing failures (bad configuration, invalid
/// options, missing required detectors).
pub const EXIT_GENERAL_FAILURE: u8 = 1;

/// Process exit code for server connectivity and integration failures.
pub const EXIT_SERVER_FAILURE: u8 = 2;

/// Core error type for Cairn operations.
#[derive(Debug, Error)]
pub enum CairnError {
    /// An option failed validation. Carries the first failing option's
    /// validation message.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Configuration processing failed (e.g. a malformed path value).
    #[error("Failed to process configuration: {message}")]
    ConfigProcessing { message: String },

    /// One or more required detector types did not apply to the source tree.
    #[error("Required detector types were not applicable: {missing}")]
    RequiredDetectorsMissing { missing: String },

    /// The Cairn server could not be reached.
    #[error("Could not reach the Cairn server: {message}")]
    Connectivity { message: String },

    /// Establishing the server session failed after connectivity was assumed.
    #[error("Cairn server integration error: {message}")]
    Integration { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CairnError {
    /// Exit code classification for this error.
    ///
    /// Connectivity and integration failures get their own code; everything
    /// else is a general failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            CairnError::Connectivity { .. } | CairnError::Integration { .. } => {
                EXIT_SERVER_FAILURE
            }
            _ => EXIT_GENERAL_FAILURE,
        }
    }
}

/// Result type alias for Cairn operations.
pub type Result<T> = std::result::Result<T, CairnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_configuration_displays_message() {
        let err = CairnError::InvalidConfiguration {
            message: "cairn.server.timeout must be an integer".into(),
        };
        assert!(err.to_string().contains("cairn.server.timeout"));
    }

    #[test]
    fn config_processing_displays_message() {
        let err = CairnError::ConfigProcessing {
            message: "unsupported path '~bob/scans'".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("process configuration"));
        assert!(msg.contains("~bob/scans"));
    }

    #[test]
    fn user_facing_errors_use_general_exit_code() {
        let err = CairnError::InvalidConfiguration {
            message: "bad".into(),
        };
        assert_eq!(err.exit_code(), EXIT_GENERAL_FAILURE);

        let err = CairnError::RequiredDetectorsMissing {
            missing: "MAVEN".into(),
        };
        assert_eq!(err.exit_code(), EXIT_GENERAL_FAILURE);
    }

    #[test]
    fn server_errors_use_distinct_exit_code() {
        let err = CairnError::Connectivity {
            message: "timed out".into(),
        };
        assert_eq!(err.exit_code(), EXIT_SERVER_FAILURE);

        let err = CairnError::Integration {
            message: "registration fetch failed".into(),
        };
        assert_eq!(err.exit_code(), EXIT_SERVER_FAILURE);
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: CairnError = io_err.into();
        assert!(matches!(err, CairnError::Io(_)));
        assert_eq!(err.exit_code(), EXIT_GENERAL_FAILURE);
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(CairnError::Integration {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
