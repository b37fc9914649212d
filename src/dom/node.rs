//! Node types: NodeId, NodeData.

use slotmap::new_key_type;

use crate::gallery::{GalleryItem, TabId};

new_key_type! {
    /// Unique identifier for a page node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Data associated with a single page node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    /// Element tag (e.g. `"section"`, `"button"`).
    pub tag: String,
    /// Optional element id (`#id` selector).
    pub id: Option<String>,
    /// CSS classes (`.class` selector). The `active` class marks the visible tab.
    pub classes: Vec<String>,
    /// The `data-tab` attribute of tab buttons.
    pub data_tab: Option<TabId>,
    /// The gallery item rendered by a `.gallery-card` node.
    pub item: Option<GalleryItem>,
}

impl NodeData {
    /// Create a node for the given element tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: Vec::new(),
            data_tab: None,
            item: None,
        }
    }

    /// Set the element id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a CSS class (builder). Duplicates are ignored.
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Set the `data-tab` attribute (builder).
    pub fn with_data_tab(mut self, tab: TabId) -> Self {
        self.data_tab = Some(tab);
        self
    }

    /// Attach the gallery item this card displays (builder).
    pub fn with_item(mut self, item: GalleryItem) -> Self {
        self.item = Some(item);
        self
    }

    /// Whether the node carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add `class`. Returns `true` if it was not present before.
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        self.classes.push(class.to_owned());
        true
    }

    /// Remove `class`. Returns `true` if it was present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        self.classes.len() != before
    }
}
