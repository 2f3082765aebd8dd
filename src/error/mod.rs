use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or was invalid
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Error from the storage layer
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Error while exporting a report document
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Unexpected internal failure
    #[error("Internal error: {message}")]
    Internal {
        /// What went wrong
        message: String,
    },
}

/// Storage layer errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing database could not be opened
    #[error("Store connection failed: {message}")]
    Connection {
        /// What went wrong
        message: String,
    },

    /// No project with the given id exists in the collection
    #[error("Project not found: {project_id}")]
    ProjectNotFound {
        /// The id that was looked up
        project_id: String,
    },

    /// An update carried a version older than the stored one
    #[error("Stale write rejected for project {project_id}: expected version {expected}, found {found}")]
    VersionConflict {
        /// The contested project
        project_id: String,
        /// The version currently in the store
        expected: u64,
        /// The version the rejected write carried
        found: u64,
    },

    /// A record failed to serialize or deserialize as JSON
    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Error from the underlying database driver
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Document export errors
#[derive(Debug, Error)]
pub enum ExportError {
    /// The requested report format is not one of the supported names
    #[error("Unknown report format: {name}")]
    UnknownFormat {
        /// The unrecognized format name
        name: String,
    },

    /// The renderer failed to produce a document
    #[error("Render failed: {message}")]
    Render {
        /// What went wrong
        message: String,
    },

    /// Filesystem error while writing the document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Result type alias for export operations
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::Config {
            message: "missing key".to_string(),
        };
        assert_eq!(err.to_string(), "Configuration error: missing key");

        let err = AppError::Internal {
            message: "unexpected".to_string(),
        };
        assert_eq!(err.to_string(), "Internal error: unexpected");
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Connection {
            message: "failed to open".to_string(),
        };
        assert_eq!(err.to_string(), "Store connection failed: failed to open");

        let err = StorageError::ProjectNotFound {
            project_id: "proj-123".to_string(),
        };
        assert_eq!(err.to_string(), "Project not found: proj-123");

        let err = StorageError::VersionConflict {
            project_id: "proj-123".to_string(),
            expected: 4,
            found: 3,
        };
        assert_eq!(
            err.to_string(),
            "Stale write rejected for project proj-123: expected version 4, found 3"
        );
    }

    #[test]
    fn test_export_error_display() {
        let err = ExportError::UnknownFormat {
            name: "spreadsheet".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown report format: spreadsheet");

        let err = ExportError::Render {
            message: "renderer crashed".to_string(),
        };
        assert_eq!(err.to_string(), "Render failed: renderer crashed");
    }

    #[test]
    fn test_storage_error_conversion_to_app_error() {
        let storage_err = StorageError::ProjectNotFound {
            project_id: "test-123".to_string(),
        };
        let app_err: AppError = storage_err.into();
        assert!(matches!(app_err, AppError::Storage(_)));
    }

    #[test]
    fn test_export_error_conversion_to_app_error() {
        let export_err = ExportError::UnknownFormat {
            name: "test".to_string(),
        };
        let app_err: AppError = export_err.into();
        assert!(matches!(app_err, AppError::Export(_)));
        assert!(app_err.to_string().contains("Unknown report format"));
    }
}
