//! The read-only catalog of lessons.

use std::collections::HashSet;

use crate::catalog::CatalogItem;
use crate::error::CommerceError;
use crate::ids::ItemId;
use serde::Serialize;

const THUMBNAIL_BASE: &str = "https://cdn.videoshop.example/thumbnails";

/// Ordered list of catalog items, in display order.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Build a catalog from externally supplied items.
    ///
    /// Returns an error if two items share an id or an item has a blank title.
    pub fn new(items: Vec<CatalogItem>) -> Result<Self, CommerceError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(CommerceError::DuplicateItemId(item.id));
            }
            if item.title.trim().is_empty() {
                return Err(CommerceError::Validation(format!(
                    "catalog item {} has an empty title",
                    item.id
                )));
            }
        }
        tracing::debug!(items = items.len(), "catalog loaded");
        Ok(Self { items })
    }

    /// The built-in lesson catalog.
    pub fn builtin() -> Self {
        let thumb = |name: &str| format!("{THUMBNAIL_BASE}/{name}.jpg");
        Self {
            items: vec![
                CatalogItem::new(1, "Video Editing Basics", 1299, "2:30:00", "Tutorial", thumb("editing-basics")),
                CatalogItem::new(2, "Creative Shooting", 1999, "1:45:00", "Masterclass", thumb("creative-shooting")),
                CatalogItem::new(3, "Color Grading Pro", 2499, "3:15:00", "Professional", thumb("color-grading")),
                CatalogItem::new(4, "Editing for Bloggers", 999, "1:20:00", "Tutorial", thumb("editing-bloggers")),
                CatalogItem::new(5, "Sound Design", 1499, "2:00:00", "Masterclass", thumb("sound-design")),
                CatalogItem::new(6, "Text Animation", 1799, "2:45:00", "Professional", thumb("text-animation")),
            ],
        }
    }

    /// All items in display order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Look up an item by id.
    pub fn get(&self, id: ItemId) -> Option<&CatalogItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Distinct categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for item in &self.items {
            if !categories.contains(&item.category.as_str()) {
                categories.push(&item.category);
            }
        }
        categories
    }

    /// Items grouped under their exact category label, groups in order of
    /// first appearance. Every item lands in exactly one group.
    pub fn grouped(&self) -> Vec<(&str, Vec<&CatalogItem>)> {
        let mut groups: Vec<(&str, Vec<&CatalogItem>)> = Vec::new();
        for item in &self.items {
            match groups.iter_mut().find(|(category, _)| *category == item.category) {
                Some((_, items)) => items.push(item),
                None => groups.push((&item.category, vec![item])),
            }
        }
        groups
    }

    /// Items in a category (case-insensitive match).
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a CatalogItem> + 'a {
        self.items
            .iter()
            .filter(move |i| i.category.eq_ignore_ascii_case(category))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
