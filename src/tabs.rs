//! Snapshot and reconstruction of open tabs.

use log::debug;

use crate::error::{Result, TabbyError};
use crate::models::PortableTab;
use crate::platform::BrowserPlatform;

/// URL schemes that cannot be reopened: browser-internal pages and
/// extension pages. Applied identically when snapshotting and when
/// restoring, so a round trip never reintroduces a filtered URL.
const INTERNAL_URL_PREFIXES: &[&str] = &[
    "chrome://",
    "chrome-extension://",
    "edge://",
    "about:",
    "moz-extension://",
];

/// False for empty URLs and for internal/extension pages.
pub fn is_restorable_url(url: &str) -> bool {
    !url.is_empty() && !INTERNAL_URL_PREFIXES.iter().any(|p| url.starts_with(p))
}

pub struct TabSession<'a> {
    platform: &'a dyn BrowserPlatform,
}

impl<'a> TabSession<'a> {
    pub fn new(platform: &'a dyn BrowserPlatform) -> Self {
        Self { platform }
    }

    /// Flatten every open window into one ordered tab list.
    ///
    /// Per-window tab order is kept; windows follow enumeration order.
    /// Non-restorable URLs are dropped here, at snapshot time.
    pub fn flatten(&self) -> Result<Vec<PortableTab>> {
        let windows = self
            .platform
            .all_windows()
            .map_err(TabbyError::TabCollection)?;

        let mut tabs = Vec::new();
        for window in &windows {
            for tab in &window.tabs {
                if is_restorable_url(&tab.url) {
                    tabs.push(PortableTab {
                        url: tab.url.clone(),
                        title: tab.title.clone(),
                        window_id: window.id,
                        index: tab.index,
                        pinned: tab.pinned,
                        active: tab.active,
                    });
                }
            }
        }
        debug!("flattened {} tabs from {} windows", tabs.len(), windows.len());
        Ok(tabs)
    }

    /// Number of tabs a snapshot would contain right now.
    pub fn tab_count(&self) -> Result<usize> {
        Ok(self.flatten()?.len())
    }

    /// Restore tabs into a single new window.
    ///
    /// The first entry seeds the window and stays foregrounded; the rest are
    /// opened in order as background tabs with their `pinned` flag. Entries
    /// with non-restorable URLs are skipped silently.
    pub fn restore(&self, tabs: &[PortableTab]) -> Result<()> {
        let Some((first, rest)) = tabs.split_first() else {
            return Ok(());
        };

        let window_id = self
            .platform
            .create_window(&first.url)
            .map_err(TabbyError::TabRestore)?;

        for tab in rest {
            if !is_restorable_url(&tab.url) {
                debug!("skipping non-restorable url {:?}", tab.url);
                continue;
            }
            self.platform
                .create_tab(window_id, &tab.url, tab.pinned, false)
                .map_err(TabbyError::TabRestore)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::fake::{Call, FakeBrowser};
    use crate::platform::{NativeTab, NativeWindow};
    use rstest::rstest;

    fn native_tab(url: &str, title: &str, index: u32) -> NativeTab {
        NativeTab {
            url: url.to_string(),
            title: title.to_string(),
            index,
            pinned: false,
            active: false,
        }
    }

    fn portable_tab(url: &str, pinned: bool) -> PortableTab {
        PortableTab {
            url: url.to_string(),
            title: url.to_string(),
            window_id: 0,
            index: 0,
            pinned,
            active: false,
        }
    }

    #[rstest]
    #[case("", false)]
    #[case("chrome://settings", false)]
    #[case("chrome-extension://abcdef/popup.html", false)]
    #[case("edge://flags", false)]
    #[case("about:blank", false)]
    #[case("moz-extension://abcdef/index.html", false)]
    #[case("https://example.com", true)]
    #[case("http://example.com/chrome://nested", true)]
    #[case("ftp://files.example", true)]
    fn test_is_restorable_url(#[case] url: &str, #[case] expected: bool) {
        assert_eq!(is_restorable_url(url), expected);
    }

    #[test]
    fn test_flatten_filters_and_preserves_order() {
        let mut browser = FakeBrowser::new();
        browser.windows = vec![
            NativeWindow {
                id: 1,
                tabs: vec![
                    native_tab("https://a.example", "A", 0),
                    native_tab("chrome://settings", "Settings", 1),
                    native_tab("https://b.example", "B", 2),
                ],
            },
            NativeWindow {
                id: 2,
                tabs: vec![native_tab("https://c.example", "C", 0)],
            },
        ];

        let tabs = TabSession::new(&browser).flatten().unwrap();
        let urls: Vec<_> = tabs.iter().map(|t| t.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a.example", "https://b.example", "https://c.example"]);
        assert_eq!(tabs[0].window_id, 1);
        assert_eq!(tabs[2].window_id, 2);
        assert_eq!(tabs[1].index, 2);
    }

    #[test]
    fn test_flatten_wraps_enumeration_failure() {
        let mut browser = FakeBrowser::new();
        browser.fail_enumerate = true;

        let err = TabSession::new(&browser).flatten().unwrap_err();
        assert!(matches!(err, TabbyError::TabCollection(_)));
        assert!(err.to_string().starts_with("Failed to collect tabs"));
    }

    #[test]
    fn test_restore_empty_makes_no_native_calls() {
        let browser = FakeBrowser::new();
        TabSession::new(&browser).restore(&[]).unwrap();
        assert!(browser.calls().is_empty());
    }

    #[test]
    fn test_restore_seeds_window_and_backgrounds_the_rest() {
        let browser = FakeBrowser::new();
        let tabs = vec![
            portable_tab("https://a.example", false),
            portable_tab("https://b.example", true),
            portable_tab("https://c.example", false),
        ];

        TabSession::new(&browser).restore(&tabs).unwrap();

        let calls = browser.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(
            calls[0],
            Call::CreateWindow {
                url: "https://a.example".to_string()
            }
        );
        // Remaining tabs inherit pinned and open in the background so the
        // seed tab stays foregrounded
        match &calls[1] {
            Call::CreateTab { url, pinned, active, .. } => {
                assert_eq!(url, "https://b.example");
                assert!(*pinned);
                assert!(!*active);
            }
            other => panic!("unexpected call {other:?}"),
        }
        match &calls[2] {
            Call::CreateTab { url, pinned, active, .. } => {
                assert_eq!(url, "https://c.example");
                assert!(!*pinned);
                assert!(!*active);
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[test]
    fn test_restore_skips_internal_urls() {
        let browser = FakeBrowser::new();
        let tabs = vec![
            portable_tab("https://a.example", false),
            portable_tab("chrome://settings", false),
        ];

        TabSession::new(&browser).restore(&tabs).unwrap();

        // Exactly one tab ends up created: the window seed
        let calls = browser.calls();
        assert_eq!(
            calls,
            vec![Call::CreateWindow {
                url: "https://a.example".to_string()
            }]
        );
    }

    #[test]
    fn test_restore_failure_surfaces_as_tab_restore() {
        let mut browser = FakeBrowser::new();
        browser.fail_tabs = true;

        let err = TabSession::new(&browser)
            .restore(&[portable_tab("https://a.example", false)])
            .unwrap_err();
        assert!(matches!(err, TabbyError::TabRestore(_)));
        assert!(err.to_string().starts_with("Failed to restore tabs"));
    }
}
