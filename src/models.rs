use serde::{Deserialize, Serialize};

/// One node of the portable bookmark tree.
///
/// `path` is the slash-joined chain of ancestor folder titles (root = empty
/// string). A folder's `path` includes its own title; a bookmark's `path` is
/// the path of its enclosing folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PortableBookmarkNode {
    Folder {
        title: String,
        #[serde(default)]
        path: String,
        #[serde(default)]
        children: Vec<PortableBookmarkNode>,
    },
    Bookmark {
        title: String,
        url: String,
        #[serde(default)]
        path: String,
    },
}

/// One open tab, flattened out of its window.
///
/// `window_id` records where the tab came from; restore collapses all tabs
/// into a single new window regardless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortableTab {
    pub url: String,
    pub title: String,
    #[serde(default)]
    pub window_id: i64,
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub active: bool,
}

/// Metadata block written at export time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportInfo {
    pub timestamp: String,
    pub version: String,
    pub extension_name: String,
    pub tab_count: usize,
    pub bookmark_count: usize,
}

/// The portable document: everything one export produces and one import
/// consumes. Immutable after assembly.
///
/// `export_info` is always present on documents we write; older or
/// hand-built documents may omit it and still import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_info: Option<ExportInfo>,
    pub open_tabs: Vec<PortableTab>,
    pub bookmarks: Vec<PortableBookmarkNode>,
}
