//! Abstraction over the host browser.
//!
//! Every native capability the snapshot engine needs is behind
//! [`BrowserPlatform`] so the engine can run against any binding (or a fake
//! in tests) without ambient globals. Implementations must be `Sync`: tab and
//! bookmark collection are issued concurrently during export.

/// Error reported by a platform binding.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct PlatformError(pub String);

impl PlatformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

pub type PlatformResult<T> = std::result::Result<T, PlatformError>;

/// One open tab as reported by the browser.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeTab {
    pub url: String,
    pub title: String,
    pub index: u32,
    pub pinned: bool,
    pub active: bool,
}

/// One open window with its tabs, in tab-index order.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeWindow {
    pub id: i64,
    pub tabs: Vec<NativeTab>,
}

/// One node of the native bookmark tree.
///
/// A node with `children` is a folder (possibly empty); a node with a `url`
/// is a leaf bookmark. This mirrors how Chromium-family browsers report
/// their tree.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeBookmarkNode {
    pub title: String,
    pub url: Option<String>,
    pub children: Option<Vec<NativeBookmarkNode>>,
}

impl NativeBookmarkNode {
    pub fn folder(title: impl Into<String>, children: Vec<NativeBookmarkNode>) -> Self {
        Self {
            title: title.into(),
            url: None,
            children: Some(children),
        }
    }

    pub fn bookmark(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: Some(url.into()),
            children: None,
        }
    }
}

/// Capabilities the snapshot engine consumes from the host browser.
pub trait BrowserPlatform: Sync {
    /// Every open window with its tabs, in enumeration order.
    fn all_windows(&self) -> PlatformResult<Vec<NativeWindow>>;

    /// Open a new focused window seeded with `url`; returns the window id.
    fn create_window(&self, url: &str) -> PlatformResult<i64>;

    /// Open a tab in an existing window.
    fn create_tab(&self, window_id: i64, url: &str, pinned: bool, active: bool)
        -> PlatformResult<()>;

    /// The native bookmark forest, browser-synthetic roots included.
    fn bookmark_tree(&self) -> PlatformResult<Vec<NativeBookmarkNode>>;

    /// Create a folder (`url` = `None`) or bookmark under `parent_id`;
    /// returns the id of the new node.
    fn create_bookmark_node(
        &self,
        parent_id: &str,
        title: &str,
        url: Option<&str>,
    ) -> PlatformResult<String>;

    /// Id of the default non-toolbar bookmark root ("Other Bookmarks").
    fn other_bookmarks_id(&self) -> String;

    /// Persist `bytes` under `filename` via the platform download mechanism.
    fn download(&self, bytes: &[u8], filename: &str) -> PlatformResult<()>;
}
