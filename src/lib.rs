pub mod bookmarks;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod platform;
pub mod tabs;
pub mod validate;

// Re-export error types for convenience
pub use error::TabbyError;
