//! Furniture catalog — read-only entries supplied by the catalog
//! collaborator.
//!
//! Name lookups are deliberately fuzzy: exact case-insensitive match,
//! else substring in either direction, first match wins. Near-duplicate
//! names are not disambiguated; that policy is preserved from the
//! source behavior on purpose.

use crate::id::CatalogId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One catalog row. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FurnitureEntry {
    pub id: CatalogId,
    pub name: String,
    pub category: String,
    pub image_url: String,
    pub style: String,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
}

/// The ordered furniture catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<FurnitureEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<FurnitureEntry>) -> Self {
        Self { entries }
    }

    /// Load a catalog from the collaborator's JSON list.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FurnitureEntry> {
        self.entries.iter()
    }

    /// Look up an entry by id.
    pub fn get(&self, id: CatalogId) -> Option<&FurnitureEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Fuzzy name lookup: exact case-insensitive, else substring either
    /// direction. First match wins.
    pub fn find_by_name(&self, name: &str) -> Option<&FurnitureEntry> {
        let needle = name.to_lowercase();
        self.entries.iter().find(|e| {
            let candidate = e.name.to_lowercase();
            candidate == needle || candidate.contains(&needle) || needle.contains(&candidate)
        })
    }

    /// Resolve a category keyword to the first entry whose category
    /// equals the keyword or whose name contains it.
    pub fn resolve_keyword(&self, keyword: &str) -> Option<&FurnitureEntry> {
        self.entries.iter().find(|e| {
            e.category.eq_ignore_ascii_case(keyword) || e.name.to_lowercase().contains(keyword)
        })
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> SmallVec<[&str; 8]> {
        let mut out: SmallVec<[&str; 8]> = SmallVec::new();
        for entry in &self.entries {
            if !out.contains(&entry.category.as_str()) {
                out.push(entry.category.as_str());
            }
        }
        out
    }

    /// All entries in a category, in catalog order.
    pub fn in_category(&self, category: &str) -> SmallVec<[&FurnitureEntry; 4]> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(id: &str, name: &str, category: &str) -> FurnitureEntry {
        FurnitureEntry {
            id: CatalogId::intern(id),
            name: name.to_string(),
            category: category.to_string(),
            image_url: format!("/assets/{id}.png"),
            style: "Moderno".to_string(),
            price: None,
            brand: Some("DecorAR".to_string()),
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(vec![
            entry("bed-1", "Cama RAMNEFJÄLL", "bed"),
            entry("bed-2", "Cama NEIDEN", "bed"),
            entry("desk-1", "Secretária ALEX", "desk"),
            entry("mirror-1", "Espelho LINDBYAN", "mirror"),
        ])
    }

    #[test]
    fn find_by_name_exact_and_substring() {
        let cat = catalog();
        assert_eq!(
            cat.find_by_name("cama ramnefjäll").unwrap().name,
            "Cama RAMNEFJÄLL"
        );
        // Needle is a substring of the entry name
        assert_eq!(cat.find_by_name("neiden").unwrap().name, "Cama NEIDEN");
        // Entry name is a substring of the needle
        assert_eq!(
            cat.find_by_name("the secretária alex in the corner")
                .unwrap()
                .name,
            "Secretária ALEX"
        );
        assert!(cat.find_by_name("sofá").is_none());
    }

    #[test]
    fn find_by_name_first_match_wins() {
        let cat = catalog();
        // "cama" is a substring of two entries; the first catalog entry wins
        assert_eq!(cat.find_by_name("cama").unwrap().name, "Cama RAMNEFJÄLL");
    }

    #[test]
    fn resolve_keyword_by_category_or_name() {
        let cat = catalog();
        assert_eq!(cat.resolve_keyword("bed").unwrap().name, "Cama RAMNEFJÄLL");
        // Portuguese keyword resolves through the name
        assert_eq!(cat.resolve_keyword("cama").unwrap().name, "Cama RAMNEFJÄLL");
        assert_eq!(
            cat.resolve_keyword("espelho").unwrap().name,
            "Espelho LINDBYAN"
        );
        assert!(cat.resolve_keyword("wardrobe").is_none());
    }

    #[test]
    fn categories_first_seen_order() {
        let cat = catalog();
        let cats = cat.categories();
        assert_eq!(cats.as_slice(), ["bed", "desk", "mirror"]);
        assert_eq!(cat.in_category("bed").len(), 2);
    }

    #[test]
    fn catalog_from_json() {
        let json = r#"[
            {
                "id": "lamp-1",
                "name": "Lâmpada FADO",
                "category": "lamp",
                "imageUrl": "/assets/lamp-1.png",
                "style": "Minimalista",
                "price": "24.99",
                "brand": "DecorAR"
            }
        ]"#;
        let cat = Catalog::from_json(json).unwrap();
        assert_eq!(cat.len(), 1);
        assert_eq!(cat.get(CatalogId::intern("lamp-1")).unwrap().name, "Lâmpada FADO");
    }
}
