//! Import orchestration: parse and validate raw document bytes, then run the
//! tab and bookmark restore branches independently.

use log::warn;

use crate::bookmarks::{count_bookmarks, BookmarkTree};
use crate::config::Config;
use crate::error::{Result, TabbyError};
use crate::models::{ExportDocument, ExportInfo};
use crate::platform::BrowserPlatform;
use crate::tabs::TabSession;
use crate::validate;

/// Aggregated result of one import.
///
/// `tabs_imported` reports the document's tab count when the tab branch
/// succeeds, even if some entries were skipped by URL filtering during
/// restore.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    pub success: bool,
    pub tabs_imported: usize,
    pub bookmarks_imported: usize,
    pub errors: Vec<String>,
}

/// Parse-and-validate summary of a document, with no mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportPreview {
    pub valid: bool,
    pub tab_count: usize,
    pub bookmark_count: usize,
    pub export_info: Option<ExportInfo>,
    pub error: Option<String>,
}

/// Parse raw bytes into a typed document.
///
/// Unparsable bytes are an `InvalidFormat` error; parsable JSON that fails
/// the structural check is `InvalidSchema`. Nothing native happens here.
pub fn parse_document(mut bytes: Vec<u8>) -> Result<ExportDocument> {
    let value: serde_json::Value = simd_json::serde::from_slice(&mut bytes)
        .map_err(|e| TabbyError::InvalidFormat(e.to_string()))?;

    if !validate::is_valid_import(&value) {
        return Err(TabbyError::InvalidSchema);
    }
    // Shape already checked; a typed-model mismatch (e.g. an unknown node
    // tag) still counts as a schema failure
    serde_json::from_value(value).map_err(|_| TabbyError::InvalidSchema)
}

/// Preview a document: parse + validate only.
pub fn import_preview(bytes: Vec<u8>) -> ImportPreview {
    match parse_document(bytes) {
        Ok(document) => ImportPreview {
            valid: true,
            tab_count: document.open_tabs.len(),
            bookmark_count: count_bookmarks(&document.bookmarks),
            export_info: document.export_info,
            error: None,
        },
        Err(e) => ImportPreview {
            valid: false,
            tab_count: 0,
            bookmark_count: 0,
            export_info: None,
            error: Some(e.to_string()),
        },
    }
}

pub struct ImportService<'a> {
    platform: &'a dyn BrowserPlatform,
    config: Config,
}

impl<'a> ImportService<'a> {
    pub fn new(platform: &'a dyn BrowserPlatform) -> Self {
        Self::with_config(platform, Config::default())
    }

    pub fn with_config(platform: &'a dyn BrowserPlatform, config: Config) -> Self {
        Self { platform, config }
    }

    /// Parse, validate, and apply an exported document. Validation happens
    /// before any native mutation; past that point failures degrade to
    /// per-branch errors in the outcome.
    pub fn import_from_file(&self, bytes: Vec<u8>) -> Result<ImportOutcome> {
        let document = parse_document(bytes)?;
        Ok(self.process_import(&document))
    }

    /// Run the tab and bookmark branches independently. A failure in one is
    /// recorded as an error string and never prevents the other from
    /// running; this method itself does not fail.
    pub fn process_import(&self, document: &ExportDocument) -> ImportOutcome {
        let mut outcome = ImportOutcome {
            success: true,
            tabs_imported: 0,
            bookmarks_imported: 0,
            errors: Vec::new(),
        };

        if !document.open_tabs.is_empty() {
            match TabSession::new(self.platform).restore(&document.open_tabs) {
                Ok(()) => outcome.tabs_imported = document.open_tabs.len(),
                Err(e) => {
                    warn!("tab restore failed: {e}");
                    outcome.errors.push(format!("Failed to import tabs: {e}"));
                }
            }
        }

        if !document.bookmarks.is_empty() {
            match BookmarkTree::with_config(self.platform, &self.config).restore(&document.bookmarks)
            {
                Ok(()) => outcome.bookmarks_imported = count_bookmarks(&document.bookmarks),
                Err(e) => {
                    warn!("bookmark restore failed: {e}");
                    outcome
                        .errors
                        .push(format!("Failed to import bookmarks: {e}"));
                }
            }
        }

        outcome
    }
}
