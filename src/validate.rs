//! Structural schema checks for import candidates.
//!
//! Purely shape-level: no URL validation, no recursion into folder children.
//! Both checks return a boolean and never error.

use serde_json::Value;

/// Check a parsed document against the import schema: `openTabs` and
/// `bookmarks` must be arrays, every tab entry must carry a non-empty `url`
/// and `title`, and every top-level bookmark entry must satisfy its tag's
/// required fields. Entries with an unknown `type` tag pass.
pub fn is_valid_import(document: &Value) -> bool {
    let Some(object) = document.as_object() else {
        return false;
    };
    let (Some(tabs), Some(bookmarks)) = (object.get("openTabs"), object.get("bookmarks")) else {
        return false;
    };
    let (Some(tabs), Some(bookmarks)) = (tabs.as_array(), bookmarks.as_array()) else {
        return false;
    };

    tabs.iter().all(valid_tab_entry) && bookmarks.iter().all(valid_bookmark_entry)
}

/// Export-time self-check: the import shape plus a present `exportInfo` key.
pub fn is_valid_export(document: &Value) -> bool {
    document.get("exportInfo").is_some() && is_valid_import(document)
}

fn non_empty_str(value: Option<&Value>) -> bool {
    value.and_then(Value::as_str).is_some_and(|s| !s.is_empty())
}

fn valid_tab_entry(entry: &Value) -> bool {
    non_empty_str(entry.get("url")) && non_empty_str(entry.get("title"))
}

fn valid_bookmark_entry(entry: &Value) -> bool {
    match entry.get("type").and_then(Value::as_str) {
        Some("bookmark") => non_empty_str(entry.get("url")) && non_empty_str(entry.get("title")),
        Some("folder") => non_empty_str(entry.get("title")),
        _ => true,
    }
}
