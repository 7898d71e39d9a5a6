//! Store error types.

use std::path::PathBuf;

use qms_model::ModelError;
use thiserror::Error;

/// Storage operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A collection file exists but does not hold a JSON array of records.
    #[error("Collection file is corrupt: {path}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serialization error.
    #[error("Failed to serialize collection data")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The submitted record failed validation.
    #[error("Invalid record: {0}")]
    Invalid(#[from] ModelError),

    #[error("A user with {field} '{value}' already exists")]
    UserExists { field: &'static str, value: String },

    #[error("No user matches '{0}'")]
    UnknownUser(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

impl StoreError {
    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the data directory exists and is readable.")
                } else {
                    Some("Check that you have permission to write to the data directory.")
                }
            }
            Self::Corrupt { .. } => {
                Some("Restore the collection file from a backup or move it aside.")
            }
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or point --data-dir at another location.")
            }
            Self::UserExists { .. } => Some("Pick a different username or employee id."),
            Self::UnknownUser(_) => Some("Run `qms user list` to see registered users."),
            Self::Serialization { .. } | Self::Invalid(_) | Self::PasswordHash(_) => None,
        }
    }
}

/// Login failure.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username or wrong password. The two are not distinguished.
    #[error("Invalid credentials. Check username or password.")]
    InvalidCredentials,

    #[error("Account has been disabled. Contact a manager.")]
    AccountDisabled,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthError {
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidCredentials | Self::AccountDisabled => None,
            Self::Store(inner) => inner.suggestion(),
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
