use crate::platform::PlatformError;

/// Custom error type for the tabby-grabby library
///
/// Using `thiserror` for automatic `Error` trait implementation and `From`
/// conversions. Messages carry a stable prefix naming the failing operation;
/// the underlying platform cause stays attached as `source()`.
#[derive(Debug, thiserror::Error)]
pub enum TabbyError {
    /// Reading native tabs failed; fatal to the export
    #[error("Failed to collect tabs: {0}")]
    TabCollection(#[source] PlatformError),

    /// Reading the native bookmark tree failed; fatal to the export
    #[error("Failed to collect bookmarks: {0}")]
    BookmarkCollection(#[source] PlatformError),

    /// Creating native tabs failed; caught per-branch during import
    #[error("Failed to restore tabs: {0}")]
    TabRestore(#[source] PlatformError),

    /// Creating native bookmark nodes failed; caught per-branch during import
    #[error("Failed to restore bookmarks: {0}")]
    BookmarkRestore(#[source] PlatformError),

    /// The download sink refused the assembled document
    #[error("Failed to download file: {0}")]
    Download(#[source] PlatformError),

    /// Any export failure, wrapping the original cause
    #[error("Failed to export data: {0}")]
    Export(#[source] Box<TabbyError>),

    /// Import bytes were not parseable JSON
    #[error("Invalid JSON format: {0}")]
    InvalidFormat(String),

    /// Parsed JSON does not match the document schema
    #[error("Invalid import data format")]
    InvalidSchema,

    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(String),
}

/// Result type alias using TabbyError
pub type Result<T> = std::result::Result<T, TabbyError>;

impl From<serde_json::Error> for TabbyError {
    fn from(err: serde_json::Error) -> Self {
        TabbyError::Json(err.to_string())
    }
}

impl From<simd_json::Error> for TabbyError {
    fn from(err: simd_json::Error) -> Self {
        TabbyError::Json(err.to_string())
    }
}
