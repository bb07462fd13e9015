use std::collections::{BTreeMap, BTreeSet};

use super::types::{AttributeCode, ItemTypeCode};
use crate::parser::{ItemRecord, ItemSheet};

/// An attribute column and the code assigned to it
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub code: AttributeCode,
    pub name: String,
}

/// Item sheet with deterministic codes assigned
#[derive(Debug, Clone)]
pub struct SeedCatalog {
    /// Type name -> code, iterates in code order
    pub item_types: BTreeMap<String, ItemTypeCode>,
    /// Indexed the same way as [`ItemSheet::attribute_columns`]
    pub attributes: Vec<Attribute>,
    pub items: Vec<ItemRecord>,
    pub skipped_rows: usize,
}

impl SeedCatalog {
    pub fn build(sheet: ItemSheet) -> Self {
        let distinct: BTreeSet<&str> = sheet.items.iter().map(|i| i.item_type.as_str()).collect();
        let item_types = distinct
            .into_iter()
            .enumerate()
            .map(|(idx, name)| (name.to_string(), ItemTypeCode::from_rank(idx + 1)))
            .collect();

        let attributes = sheet
            .attribute_columns
            .into_iter()
            .enumerate()
            .map(|(idx, name)| Attribute {
                code: AttributeCode::from_position(idx + 1),
                name,
            })
            .collect();

        Self {
            item_types,
            attributes,
            items: sheet.items,
            skipped_rows: sheet.skipped_rows,
        }
    }

    /// Code of a type seen in the sheet
    pub fn type_code(&self, item_type: &str) -> Option<&ItemTypeCode> {
        self.item_types.get(item_type)
    }

    pub fn attribute(&self, idx: usize) -> Option<&Attribute> {
        self.attributes.get(idx)
    }

    /// Number of attribute value rows the seed file will contain
    pub fn attribute_value_count(&self) -> usize {
        self.items.iter().map(|i| i.attributes.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::read_item_sheet;

    fn catalog(csv: &str) -> SeedCatalog {
        SeedCatalog::build(read_item_sheet(csv.as_bytes(), b',').unwrap())
    }

    #[test]
    fn test_type_codes_sorted() {
        let c = catalog("Item Type,Component Name\nBoots,Greaves\nArmor,Plate\nBoots,Sandals\n");
        assert_eq!(c.item_types.len(), 2);
        assert_eq!(c.type_code("Armor").unwrap().as_str(), "type1");
        assert_eq!(c.type_code("Boots").unwrap().as_str(), "type2");
        assert!(c.type_code("Helm").is_none());
    }

    #[test]
    fn test_type_sort_is_case_sensitive() {
        let c = catalog("Item Type,Component Name\nboots,a\nBoots,b\n");
        assert_eq!(c.type_code("Boots").unwrap().as_str(), "type1");
        assert_eq!(c.type_code("boots").unwrap().as_str(), "type2");
    }

    #[test]
    fn test_attribute_codes_follow_columns() {
        let c = catalog("Item Type,Component Name,Power,Notes,Defense\nA,B,1,,x\n");
        assert_eq!(c.attribute(0).unwrap().code.as_str(), "attribute1");
        assert_eq!(c.attribute(0).unwrap().name, "Power");
        assert_eq!(c.attribute(1).unwrap().code.as_str(), "attribute2");
        assert_eq!(c.attribute(1).unwrap().name, "Defense");
        assert_eq!(c.attribute_value_count(), 1);
    }
}
