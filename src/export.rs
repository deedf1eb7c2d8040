//! Export orchestration: snapshot tabs and bookmarks into one document and
//! hand it to the platform download sink.

use std::thread;

use chrono::{SecondsFormat, Utc};
use log::info;

use crate::bookmarks::{count_bookmarks, BookmarkTree};
use crate::config::Config;
use crate::error::{Result, TabbyError};
use crate::models::{ExportDocument, ExportInfo};
use crate::platform::BrowserPlatform;
use crate::tabs::TabSession;
use crate::validate;

pub const EXTENSION_NAME: &str = "Tabby Grabby";
pub const EXPORT_VERSION: &str = "1.0.0";

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub filename: String,
    pub tab_count: usize,
    pub bookmark_count: usize,
}

/// Counts of currently exportable items.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExportStats {
    pub tab_count: usize,
    pub bookmark_count: usize,
    pub total_items: usize,
}

pub struct ExportService<'a> {
    platform: &'a dyn BrowserPlatform,
    config: Config,
}

impl<'a> ExportService<'a> {
    pub fn new(platform: &'a dyn BrowserPlatform) -> Self {
        Self::with_config(platform, Config::default())
    }

    pub fn with_config(platform: &'a dyn BrowserPlatform, config: Config) -> Self {
        Self { platform, config }
    }

    /// Snapshot all open tabs and the whole bookmark tree into one JSON
    /// document and hand it to the download sink. Any failure along the way
    /// escalates as a single `Export` error and no file is produced.
    pub fn export_all(&self) -> Result<ExportSummary> {
        self.export_inner()
            .map_err(|e| TabbyError::Export(Box::new(e)))
    }

    fn export_inner(&self) -> Result<ExportSummary> {
        let tab_session = TabSession::new(self.platform);
        let bookmark_tree = BookmarkTree::with_config(self.platform, &self.config);

        // The two snapshots touch disjoint platform state and are taken
        // concurrently, one on a scoped thread and one right here.
        let (tabs, bookmarks) = thread::scope(|scope| {
            let tabs = scope.spawn(|| tab_session.flatten());
            let bookmarks = bookmark_tree.flatten();
            (tabs.join().expect("tab collection panicked"), bookmarks)
        });
        let (tabs, bookmarks) = (tabs?, bookmarks?);

        let bookmark_count = count_bookmarks(&bookmarks);
        let tab_count = tabs.len();
        let now = Utc::now();

        let document = ExportDocument {
            export_info: Some(ExportInfo {
                timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
                version: EXPORT_VERSION.to_string(),
                extension_name: EXTENSION_NAME.to_string(),
                tab_count,
                bookmark_count,
            }),
            open_tabs: tabs,
            bookmarks,
        };

        let value = serde_json::to_value(&document)?;
        if !validate::is_valid_export(&value) {
            return Err(TabbyError::InvalidSchema);
        }
        let bytes = serde_json::to_vec_pretty(&value)?;

        let filename = format!(
            "{}-{}.json",
            self.config.export_filename_prefix,
            now.format("%Y-%m-%dT%H-%M-%S")
        );
        self.platform
            .download(&bytes, &filename)
            .map_err(TabbyError::Download)?;

        info!("exported {tab_count} tabs and {bookmark_count} bookmarks to {filename}");
        Ok(ExportSummary {
            filename,
            tab_count,
            bookmark_count,
        })
    }

    /// Counts of exportable items for display. Collection errors collapse to
    /// all-zero stats; this never fails.
    pub fn stats(&self) -> ExportStats {
        let tabs = TabSession::new(self.platform).flatten();
        let bookmarks = BookmarkTree::with_config(self.platform, &self.config).flatten();

        match (tabs, bookmarks) {
            (Ok(tabs), Ok(bookmarks)) => {
                let tab_count = tabs.len();
                let bookmark_count = count_bookmarks(&bookmarks);
                ExportStats {
                    tab_count,
                    bookmark_count,
                    total_items: tab_count + bookmark_count,
                }
            }
            _ => ExportStats::default(),
        }
    }
}
