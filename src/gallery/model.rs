//! Gallery data model: [`TabId`], [`GalleryItem`], [`GalleryTab`], [`Gallery`].
//!
//! A gallery is defined once when the page is built and never mutated during a
//! session. Definitions can be loaded from JSON or taken from the built-in
//! [`Gallery::portfolio`] set.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TabId
// ---------------------------------------------------------------------------

/// String key identifying a gallery tab (e.g. `"wordpress"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(String);

impl TabId {
    /// Create a tab id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TabId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TabId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ---------------------------------------------------------------------------
// GalleryItem / GalleryTab
// ---------------------------------------------------------------------------

/// One image card in a gallery tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    /// Image URL.
    pub image: String,
    /// Display title shown under the card and in the lightbox.
    pub title: String,
}

impl GalleryItem {
    /// Create an item.
    pub fn new(image: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            title: title.into(),
        }
    }
}

/// A tab of the portfolio gallery and its ordered items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryTab {
    /// Tab key, also the id of the tab's content view.
    pub id: TabId,
    /// Button label in English.
    pub label_en: String,
    /// Button label in Arabic.
    pub label_ar: String,
    /// Cards shown in this tab's carousel, in display order.
    #[serde(default)]
    pub items: Vec<GalleryItem>,
}

impl GalleryTab {
    /// Create a tab with no items.
    pub fn new(id: impl Into<TabId>, label_en: impl Into<String>, label_ar: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label_en: label_en.into(),
            label_ar: label_ar.into(),
            items: Vec::new(),
        }
    }

    /// Append an item (builder).
    pub fn with_item(mut self, item: GalleryItem) -> Self {
        self.items.push(item);
        self
    }

    /// Append several items (builder).
    pub fn with_items(mut self, items: impl IntoIterator<Item = GalleryItem>) -> Self {
        self.items.extend(items);
        self
    }
}

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

/// Errors raised while building a gallery definition.
#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    /// The JSON document could not be parsed.
    #[error("invalid gallery definition: {0}")]
    Json(#[from] serde_json::Error),
    /// Two tabs share the same id.
    #[error("duplicate gallery tab `{0}`")]
    DuplicateTab(TabId),
    /// A tab has an empty id.
    #[error("gallery tab id must not be empty")]
    EmptyTabId,
}

/// The full, ordered set of gallery tabs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gallery {
    tabs: Vec<GalleryTab>,
}

impl Gallery {
    /// Build a gallery, validating that tab ids are non-empty and unique.
    pub fn new(tabs: Vec<GalleryTab>) -> Result<Self, GalleryError> {
        let mut seen = HashSet::new();
        for tab in &tabs {
            if tab.id.as_str().is_empty() {
                return Err(GalleryError::EmptyTabId);
            }
            if !seen.insert(&tab.id) {
                return Err(GalleryError::DuplicateTab(tab.id.clone()));
            }
        }
        Ok(Self { tabs })
    }

    /// Parse and validate a gallery from a JSON document of the form
    /// `{"tabs": [{"id": ..., "label_en": ..., "label_ar": ..., "items": [...]}]}`.
    pub fn from_json(json: &str) -> Result<Self, GalleryError> {
        let raw: Gallery = serde_json::from_str(json)?;
        Self::new(raw.tabs)
    }

    /// The built-in portfolio: WordPress, Salla, Zid and OpenCart work.
    pub fn portfolio() -> Self {
        const PHOTO: &str = "https://images.unsplash.com/photo-";
        const CROP: &str = "?w=600&h=400&fit=crop";

        let items = |platform: &str, photos: &[&str]| -> Vec<GalleryItem> {
            photos
                .iter()
                .enumerate()
                .map(|(i, photo)| {
                    GalleryItem::new(
                        format!("{PHOTO}{photo}{CROP}"),
                        format!("{platform} Project {}", i + 1),
                    )
                })
                .collect()
        };

        let tabs = vec![
            GalleryTab::new("wordpress", "WordPress", "ووردبريس").with_items(items(
                "WordPress",
                &[
                    "1432888498266-38ffec3eaf0a",
                    "1522202176988-66273c2fd55f",
                    "1556909114-f6e7ad7d3136",
                    "1551288049-bebda4e38f71",
                    "1460925895917-afdab827c52f",
                    "1486406146926-c627a92ad1ab",
                ],
            )),
            GalleryTab::new("salla", "Salla", "سلة").with_items(items(
                "Salla",
                &[
                    "1441986300917-64674bd600d8",
                    "1556742049-0cfed4f6a45d",
                    "1560472354-b33ff0c44a43",
                    "1542744173-8e7e53415bb0",
                ],
            )),
            GalleryTab::new("zid", "Zid", "زد").with_items(items(
                "Zid",
                &[
                    "1472851294608-062f824d29cc",
                    "1556909114-5ba7fbe78aca",
                    "1553062407-98eeb64c6a62",
                    "1517077304055-6e89abbf09b0",
                ],
            )),
            GalleryTab::new("opencart", "OpenCart", "أوبن كارت").with_items(items(
                "OpenCart",
                &["1507003211169-0a1dd7228f2d", "1581291518857-4e27b48ff24e"],
            )),
        ];

        Self { tabs }
    }

    /// All tabs in display order.
    pub fn tabs(&self) -> &[GalleryTab] {
        &self.tabs
    }

    /// Look up a tab by id.
    pub fn tab(&self, id: &TabId) -> Option<&GalleryTab> {
        self.tabs.iter().find(|tab| &tab.id == id)
    }

    /// Whether a tab with this id exists.
    pub fn contains(&self, id: &TabId) -> bool {
        self.tab(id).is_some()
    }

    /// The first tab, used as the default selection.
    pub fn first(&self) -> Option<&GalleryTab> {
        self.tabs.first()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tab_id_display_and_conversions() {
        let id: TabId = "salla".into();
        assert_eq!(id.as_str(), "salla");
        assert_eq!(id.to_string(), "salla");
        assert_eq!(TabId::from(String::from("salla")), id);
    }

    #[test]
    fn portfolio_has_four_tabs_in_order() {
        let gallery = Gallery::portfolio();
        let ids: Vec<_> = gallery.tabs().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["wordpress", "salla", "zid", "opencart"]);
        assert_eq!(gallery.first().map(|t| t.id.as_str()), Some("wordpress"));
    }

    #[test]
    fn portfolio_items_have_titles_and_images() {
        let gallery = Gallery::portfolio();
        let wordpress = gallery.tab(&"wordpress".into()).unwrap();
        assert_eq!(wordpress.items[0].title, "WordPress Project 1");
        assert!(wordpress.items[0].image.starts_with("https://images.unsplash.com/"));
        // OpenCart has fewer cards than the widest breakpoint shows at once.
        assert_eq!(gallery.tab(&"opencart".into()).unwrap().items.len(), 2);
    }

    #[test]
    fn duplicate_tab_rejected() {
        let err = Gallery::new(vec![
            GalleryTab::new("zid", "Zid", "زد"),
            GalleryTab::new("zid", "Zid", "زد"),
        ])
        .unwrap_err();
        assert!(matches!(err, GalleryError::DuplicateTab(id) if id.as_str() == "zid"));
    }

    #[test]
    fn empty_tab_id_rejected() {
        let err = Gallery::new(vec![GalleryTab::new("", "x", "y")]).unwrap_err();
        assert!(matches!(err, GalleryError::EmptyTabId));
    }

    #[test]
    fn from_json_parses_tabs_and_items() {
        let json = r#"{
            "tabs": [
                {"id": "shop", "label_en": "Shop", "label_ar": "متجر",
                 "items": [{"image": "a.png", "title": "A"}]},
                {"id": "blog", "label_en": "Blog", "label_ar": "مدونة"}
            ]
        }"#;
        let gallery = Gallery::from_json(json).unwrap();
        assert_eq!(gallery.tabs().len(), 2);
        assert_eq!(
            gallery.tab(&"shop".into()).unwrap().items,
            vec![GalleryItem::new("a.png", "A")]
        );
        assert!(gallery.tab(&"blog".into()).unwrap().items.is_empty());
    }

    #[test]
    fn from_json_reports_parse_errors() {
        let err = Gallery::from_json("{ not json").unwrap_err();
        assert!(matches!(err, GalleryError::Json(_)));
        assert!(err.to_string().starts_with("invalid gallery definition"));
    }

    #[test]
    fn from_json_validates_duplicates() {
        let json = r#"{"tabs": [
            {"id": "a", "label_en": "A", "label_ar": "A"},
            {"id": "a", "label_en": "A", "label_ar": "A"}
        ]}"#;
        assert!(matches!(
            Gallery::from_json(json),
            Err(GalleryError::DuplicateTab(_))
        ));
    }
}
