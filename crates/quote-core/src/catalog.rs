//! Fixed renovation price catalog
//!
//! The catalog is built once at startup and only read afterwards. Lookups are
//! exact: no case folding, no trimming, no fuzzy matching.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::QuoteError;

/// One fixed-price renovation item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceCatalogEntry {
    pub code: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub unit_price: i64,
}

impl PriceCatalogEntry {
    pub fn new(code: impl Into<String>, description: impl Into<String>, unit_price: i64) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            unit_price,
        }
    }
}

/// Read-only mapping from catalog code to entry
#[derive(Debug, Clone, Default)]
pub struct PriceCatalog {
    entries: BTreeMap<String, PriceCatalogEntry>,
}

impl PriceCatalog {
    /// Build a catalog, rejecting duplicate codes and negative prices
    pub fn from_entries(
        entries: impl IntoIterator<Item = PriceCatalogEntry>,
    ) -> Result<Self, QuoteError> {
        let mut map = BTreeMap::new();
        for entry in entries {
            if entry.code.is_empty() {
                return Err(QuoteError::InvalidEntry {
                    code: entry.code,
                    reason: "empty code".to_string(),
                });
            }
            if entry.unit_price < 0 {
                return Err(QuoteError::InvalidEntry {
                    code: entry.code,
                    reason: format!("negative unit price {}", entry.unit_price),
                });
            }
            if map.contains_key(&entry.code) {
                return Err(QuoteError::DuplicateCode(entry.code));
            }
            map.insert(entry.code.clone(), entry);
        }
        Ok(Self { entries: map })
    }

    /// The company's standard price list
    pub fn standard() -> Self {
        let entries = [
            PriceCatalogEntry::new("K-01", "システムキッチン標準", 450_000),
            PriceCatalogEntry::new("K-02", "給排水取替", 80_000),
            PriceCatalogEntry::new("T-01", "便器交換（温水洗浄便座付）", 120_000),
            PriceCatalogEntry::new("W-01", "洗面化粧台交換（W=750）", 90_000),
            PriceCatalogEntry::new("B-01", "ユニットバス1216サイズ", 600_000),
        ];
        let entries = entries
            .into_iter()
            .map(|e| (e.code.clone(), e))
            .collect::<BTreeMap<_, _>>();
        Self { entries }
    }

    pub fn lookup(&self, code: &str) -> Option<&PriceCatalogEntry> {
        self.entries.get(code)
    }

    /// Entries in code order
    pub fn entries(&self) -> impl Iterator<Item = &PriceCatalogEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_prices() {
        let catalog = PriceCatalog::standard();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.lookup("K-01").unwrap().unit_price, 450_000);
        assert_eq!(catalog.lookup("T-01").unwrap().unit_price, 120_000);
        assert_eq!(catalog.lookup("B-01").unwrap().unit_price, 600_000);
    }

    #[test]
    fn test_lookup_is_exact() {
        let catalog = PriceCatalog::standard();
        assert!(catalog.lookup("k-01").is_none());
        assert!(catalog.lookup(" K-01").is_none());
        assert!(catalog.lookup("K01").is_none());
        assert!(catalog.lookup("X-99").is_none());
    }

    #[test]
    fn test_entries_in_code_order() {
        let catalog = PriceCatalog::standard();
        let codes: Vec<&str> = catalog.entries().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["B-01", "K-01", "K-02", "T-01", "W-01"]);
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let result = PriceCatalog::from_entries([
            PriceCatalogEntry::new("A-01", "first", 100),
            PriceCatalogEntry::new("A-01", "second", 200),
        ]);
        assert_eq!(result.unwrap_err(), QuoteError::DuplicateCode("A-01".into()));
    }

    #[test]
    fn test_negative_price_rejected() {
        let result = PriceCatalog::from_entries([PriceCatalogEntry::new("A-01", "bad", -1)]);
        assert!(matches!(result, Err(QuoteError::InvalidEntry { .. })));
    }

    #[test]
    fn test_entry_serializes_with_wire_names() {
        let entry = PriceCatalogEntry::new("K-02", "給排水取替", 80_000);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["code"], "K-02");
        assert_eq!(json["desc"], "給排水取替");
        assert_eq!(json["unit_price"], 80_000);
    }
}
