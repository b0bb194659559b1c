//! Error types for livenote.
//!
//! This module defines all error types used throughout the livenote crate.
//! Validation failures are plain typed variants returned to the caller; the
//! presentation layer decides how to surface them.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for livenote operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Validation Errors ===
    /// A stream name was blank or whitespace-only.
    #[error("stream name cannot be empty")]
    EmptyStreamName,

    /// A note's text was blank or whitespace-only.
    #[error("note text cannot be empty")]
    EmptyNoteText,

    /// A note was added while the timer was stopped.
    #[error("the timer is not running; start it before adding notes")]
    TimerNotRunning,

    /// A stream with the same name already exists in the archive.
    #[error("a stream named '{name}' already exists")]
    DuplicateStreamName {
        /// The colliding name.
        name: String,
    },

    /// No archived stream matched the given identity.
    #[error("no archived stream matched '{lookup}'")]
    StreamNotFound {
        /// The name or id that failed to match.
        lookup: String,
    },

    /// A note index was out of range for the stream's note list.
    #[error("no note at index {index} (stream has {len} notes)")]
    NoteNotFound {
        /// The requested index.
        index: usize,
        /// The length of the note list.
        len: usize,
    },

    /// An export or save was attempted with no notes.
    #[error("there are no notes to {action}")]
    NoNotes {
        /// What was attempted ("save" or "export").
        action: &'static str,
    },

    // === Storage Errors ===
    /// Failed to open or create the state database.
    #[error("failed to open state database at {}: {source}", .path.display())]
    StoreOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    StoreQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("state database migration failed: {message}")]
    StoreMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Media Errors ===
    /// An image file could not be read or decoded.
    #[error("failed to decode image {}: {message}", .path.display())]
    ImageDecode {
        /// Path to the input image.
        path: PathBuf,
        /// Description of what went wrong.
        message: String,
    },

    /// Encoding the compressed image failed.
    #[error("failed to encode compressed image: {0}")]
    ImageEncode(String),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {}: {source}", .path.display())]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for livenote operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a duplicate-name error.
    #[must_use]
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateStreamName { name: name.into() }
    }

    /// Create a stream-not-found error.
    #[must_use]
    pub fn stream_not_found(lookup: impl Into<String>) -> Self {
        Self::StreamNotFound {
            lookup: lookup.into(),
        }
    }

    /// Create an image-decode error.
    #[must_use]
    pub fn image_decode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ImageDecode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check if this error is a user-input validation failure, as opposed
    /// to a storage or media fault.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyStreamName
                | Self::EmptyNoteText
                | Self::TimerNotRunning
                | Self::DuplicateStreamName { .. }
                | Self::StreamNotFound { .. }
                | Self::NoteNotFound { .. }
                | Self::NoNotes { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::TimerNotRunning;
        assert_eq!(
            err.to_string(),
            "the timer is not running; start it before adding notes"
        );

        let err = Error::EmptyStreamName;
        assert_eq!(err.to_string(), "stream name cannot be empty");
    }

    #[test]
    fn test_duplicate_name_display() {
        let err = Error::duplicate_name("Friday VOD");
        assert!(err.to_string().contains("Friday VOD"));
    }

    #[test]
    fn test_stream_not_found_display() {
        let err = Error::stream_not_found("missing stream");
        assert!(err.to_string().contains("missing stream"));
    }

    #[test]
    fn test_note_not_found_display() {
        let err = Error::NoteNotFound { index: 7, len: 3 };
        let msg = err.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_no_notes_display() {
        let err = Error::NoNotes { action: "export" };
        assert_eq!(err.to_string(), "there are no notes to export");
    }

    #[test]
    fn test_is_validation() {
        assert!(Error::EmptyStreamName.is_validation());
        assert!(Error::TimerNotRunning.is_validation());
        assert!(Error::duplicate_name("x").is_validation());
        assert!(Error::NoNotes { action: "save" }.is_validation());

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(!Error::from(io_err).is_validation());
    }

    #[test]
    fn test_image_decode_display() {
        let err = Error::image_decode("/tmp/broken.png", "unexpected EOF");
        let msg = err.to_string();
        assert!(msg.contains("/tmp/broken.png"));
        assert!(msg.contains("unexpected EOF"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert!(matches!(err, Error::Json(_)));
        }
    }

    #[test]
    fn test_from_rusqlite_error() {
        let result = rusqlite::Connection::open_with_flags(
            "/nonexistent/path/db.sqlite",
            rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY,
        );
        if let Err(sqlite_err) = result {
            let err: Error = sqlite_err.into();
            assert!(matches!(err, Error::StoreQuery(_)));
        }
    }

    #[test]
    fn test_store_migration_display() {
        let err = Error::StoreMigration {
            message: "version mismatch".to_string(),
        };
        assert!(err.to_string().contains("version mismatch"));
    }

    #[test]
    fn test_config_validation_display() {
        let err = Error::ConfigValidation {
            message: "invalid quality".to_string(),
        };
        assert!(err.to_string().contains("invalid quality"));
    }

    #[test]
    fn test_directory_create_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::DirectoryCreate {
            path: PathBuf::from("/root/forbidden"),
            source: io_err,
        };
        assert!(err.to_string().contains("/root/forbidden"));
    }
}
