//! Bidirectional codec between the native bookmark tree and the portable,
//! path-addressed representation.

use std::collections::HashMap;

use chrono::Utc;
use log::{debug, warn};

use crate::config::Config;
use crate::error::{Result, TabbyError};
use crate::models::PortableBookmarkNode;
use crate::platform::{BrowserPlatform, NativeBookmarkNode};

pub struct BookmarkTree<'a> {
    platform: &'a dyn BrowserPlatform,
    import_folder_prefix: String,
}

impl<'a> BookmarkTree<'a> {
    pub fn new(platform: &'a dyn BrowserPlatform) -> Self {
        Self::with_config(platform, &Config::default())
    }

    pub fn with_config(platform: &'a dyn BrowserPlatform, config: &Config) -> Self {
        Self {
            platform,
            import_folder_prefix: config.import_folder_prefix.clone(),
        }
    }

    /// Flatten the native bookmark forest into portable nodes.
    ///
    /// Depth-first, sibling order preserved. Browser-synthetic forest roots
    /// are traversed transparently: their children are promoted to the top
    /// level instead of gaining an extra folder layer. Folders whose subtree
    /// contains no bookmark are pruned.
    pub fn flatten(&self) -> Result<Vec<PortableBookmarkNode>> {
        let forest = self
            .platform
            .bookmark_tree()
            .map_err(TabbyError::BookmarkCollection)?;

        let mut nodes = Vec::new();
        for root in &forest {
            if root.children.is_some() {
                collect_children(root, &mut nodes, "");
            }
        }
        debug!("flattened bookmark tree: {} bookmarks", count_bookmarks(&nodes));
        Ok(nodes)
    }

    /// Total bookmarks currently in the native tree.
    pub fn bookmark_count(&self) -> Result<usize> {
        Ok(count_bookmarks(&self.flatten()?))
    }

    /// Restore a portable tree under a fresh dated container folder placed in
    /// the browser's non-toolbar bookmark root.
    ///
    /// Two passes: all folders are created first (parent before child, each
    /// recorded in a path map), then every bookmark resolves its parent
    /// through that map. A bookmark may therefore appear ahead of its folder
    /// in the input ordering. Best-effort: folders already created when a
    /// later call fails are left in place.
    pub fn restore(&self, nodes: &[PortableBookmarkNode]) -> Result<()> {
        if nodes.is_empty() {
            return Ok(());
        }

        let title = format!("{} - {}", self.import_folder_prefix, Utc::now().format("%Y-%m-%d"));
        let container = self
            .platform
            .create_bookmark_node(&self.platform.other_bookmarks_id(), &title, None)
            .map_err(TabbyError::BookmarkRestore)?;

        let mut folder_ids: HashMap<String, String> = HashMap::new();
        folder_ids.insert(String::new(), container.clone());

        for node in nodes {
            if matches!(node, PortableBookmarkNode::Folder { .. }) {
                self.create_folders(node, &container, &mut folder_ids)?;
            }
        }
        self.create_bookmarks(nodes, &container, &folder_ids)
    }

    fn create_folders(
        &self,
        node: &PortableBookmarkNode,
        parent_id: &str,
        folder_ids: &mut HashMap<String, String>,
    ) -> Result<()> {
        let PortableBookmarkNode::Folder { title, path, children } = node else {
            return Ok(());
        };

        let id = self
            .platform
            .create_bookmark_node(parent_id, title, None)
            .map_err(TabbyError::BookmarkRestore)?;
        folder_ids.insert(path.clone(), id.clone());

        for child in children {
            if matches!(child, PortableBookmarkNode::Folder { .. }) {
                self.create_folders(child, &id, folder_ids)?;
            }
        }
        Ok(())
    }

    fn create_bookmarks(
        &self,
        nodes: &[PortableBookmarkNode],
        container: &str,
        folder_ids: &HashMap<String, String>,
    ) -> Result<()> {
        for node in nodes {
            match node {
                PortableBookmarkNode::Bookmark { title, url, path } => {
                    let parent = match folder_ids.get(path) {
                        Some(id) => id.as_str(),
                        None => {
                            warn!("no folder for path {path:?}, placing under import root");
                            container
                        }
                    };
                    self.platform
                        .create_bookmark_node(parent, title, Some(url.as_str()))
                        .map_err(TabbyError::BookmarkRestore)?;
                }
                PortableBookmarkNode::Folder { children, .. } => {
                    self.create_bookmarks(children, container, folder_ids)?;
                }
            }
        }
        Ok(())
    }
}

fn collect_children(
    node: &NativeBookmarkNode,
    out: &mut Vec<PortableBookmarkNode>,
    parent_path: &str,
) {
    let Some(children) = node.children.as_ref() else {
        return;
    };

    for child in children {
        if child.children.is_some() {
            let folder_path = if parent_path.is_empty() {
                child.title.clone()
            } else {
                format!("{parent_path}/{}", child.title)
            };

            let mut nested = Vec::new();
            collect_children(child, &mut nested, &folder_path);
            // Folders with no reachable bookmark are dropped entirely
            if !nested.is_empty() {
                out.push(PortableBookmarkNode::Folder {
                    title: child.title.clone(),
                    path: folder_path,
                    children: nested,
                });
            }
        } else if let Some(url) = &child.url {
            out.push(PortableBookmarkNode::Bookmark {
                title: child.title.clone(),
                url: url.clone(),
                path: parent_path.to_string(),
            });
        }
    }
}

/// Count `Bookmark` nodes reachable by recursive descent. Pure.
pub fn count_bookmarks(nodes: &[PortableBookmarkNode]) -> usize {
    nodes
        .iter()
        .map(|node| match node {
            PortableBookmarkNode::Bookmark { .. } => 1,
            PortableBookmarkNode::Folder { children, .. } => count_bookmarks(children),
        })
        .sum()
}
