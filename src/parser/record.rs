use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use super::value::clean_value;

pub const ITEM_TYPE_COLUMN: &str = "Item Type";
pub const NAME_COLUMN: &str = "Component Name";
pub const NOTES_COLUMN: &str = "Notes";

/// Columns that never become attributes
const RESERVED_COLUMNS: &[&str] = &[ITEM_TYPE_COLUMN, NAME_COLUMN, NOTES_COLUMN];

/// A numeric attribute value of one item
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeValue {
    /// Index into [`ItemSheet::attribute_columns`]
    pub attribute: usize,
    pub value: f64,
}

/// One retained CSV row
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    pub item_type: String,
    pub name: String,
    /// Text of the `Notes` column, empty when absent
    pub description: String,
    /// Present values only, in attribute column order
    pub attributes: Vec<AttributeValue>,
}

/// Everything read from the item CSV
#[derive(Debug, Clone, Default)]
pub struct ItemSheet {
    /// Attribute column names in header order
    pub attribute_columns: Vec<String>,
    pub items: Vec<ItemRecord>,
    /// Rows dropped for lacking an item type or name
    pub skipped_rows: usize,
}

/// Where each known column sits in a record
struct SheetLayout {
    item_type: usize,
    name: usize,
    notes: Option<usize>,
    /// (record index, attribute column name)
    attributes: Vec<(usize, String)>,
}

impl SheetLayout {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let names: Vec<&str> = headers
            .iter()
            .enumerate()
            .map(|(idx, h)| {
                let h = if idx == 0 { h.trim_start_matches('\u{feff}') } else { h };
                h.trim()
            })
            .collect();

        let find = |wanted: &str| names.iter().position(|n| *n == wanted);

        let item_type = find(ITEM_TYPE_COLUMN)
            .with_context(|| format!("CSV header is missing the \"{}\" column", ITEM_TYPE_COLUMN))?;
        let name = find(NAME_COLUMN)
            .with_context(|| format!("CSV header is missing the \"{}\" column", NAME_COLUMN))?;
        let notes = find(NOTES_COLUMN);

        let mut attributes: Vec<(usize, String)> = Vec::new();
        for (idx, column) in names.iter().enumerate() {
            if column.is_empty() || RESERVED_COLUMNS.contains(column) {
                continue;
            }
            if attributes.iter().any(|(_, seen)| seen == column) {
                debug!(column = %column, "ignoring repeated attribute column");
                continue;
            }
            attributes.push((idx, column.to_string()));
        }

        Ok(Self {
            item_type,
            name,
            notes,
            attributes,
        })
    }

    /// Turn a record into an item, or `None` when type or name is blank
    fn parse_row(&self, record: &StringRecord) -> Option<ItemRecord> {
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();

        let item_type = cell(self.item_type);
        let name = cell(self.name);
        if item_type.is_empty() || name.is_empty() {
            return None;
        }

        let description = self.notes.map(cell).unwrap_or("");

        let attributes = self
            .attributes
            .iter()
            .enumerate()
            .filter_map(|(attribute, (idx, _))| {
                clean_value(cell(*idx)).map(|value| AttributeValue { attribute, value })
            })
            .collect();

        Some(ItemRecord {
            item_type: item_type.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            attributes,
        })
    }
}

/// Read an item sheet from any CSV source
pub fn read_item_sheet<R: Read>(source: R, delimiter: u8) -> Result<ItemSheet> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(source);

    let headers = reader
        .headers()
        .context("Failed to read CSV header")?
        .clone();
    let layout = SheetLayout::from_headers(&headers)?;

    let mut sheet = ItemSheet {
        attribute_columns: layout.attributes.iter().map(|(_, n)| n.clone()).collect(),
        ..Default::default()
    };

    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read CSV row {}", row + 1))?;

        match layout.parse_row(&record) {
            Some(item) => sheet.items.push(item),
            None => {
                let line = record.position().map(|p| p.line()).unwrap_or(0);
                debug!(line, "skipping row without item type or name");
                sheet.skipped_rows += 1;
            }
        }
    }

    info!(
        items = sheet.items.len(),
        attributes = sheet.attribute_columns.len(),
        skipped = sheet.skipped_rows,
        "read item sheet"
    );

    Ok(sheet)
}

/// Read an item sheet from a CSV file
pub fn read_item_sheet_path(path: &Path, delimiter: u8) -> Result<ItemSheet> {
    let file = File::open(path).with_context(|| format!("Failed to open: {:?}", path))?;
    read_item_sheet(file, delimiter).with_context(|| format!("Failed to parse: {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(csv: &str) -> ItemSheet {
        read_item_sheet(csv.as_bytes(), b',').unwrap()
    }

    #[test]
    fn test_rows_without_type_or_name_are_skipped() {
        let sheet = read(
            "Item Type,Component Name,Power\n\
             Weapon,Sword,10\n\
             Weapon,,11\n\
             ,Orphan,12\n\
             Armor,Plate,13\n\
             Boots,Greaves,14\n\
             Armor,Mail,15\n",
        );
        assert_eq!(sheet.items.len(), 4);
        assert_eq!(sheet.skipped_rows, 2);
    }

    #[test]
    fn test_attribute_columns_follow_header_order() {
        let sheet = read("Item Type,Component Name,Power,Notes,Defense\nA,B,1,n,2\n");
        assert_eq!(sheet.attribute_columns, vec!["Power", "Defense"]);
        assert_eq!(sheet.items[0].description, "n");
    }

    #[test]
    fn test_missing_cells_are_dropped() {
        let sheet = read("Item Type,Component Name,Power,Defense,Speed\nBoots,Fast Boots,,N/A,20%\n");
        let item = &sheet.items[0];
        assert_eq!(
            item.attributes,
            vec![AttributeValue {
                attribute: 2,
                value: 20.0
            }]
        );
        assert_eq!(item.description, "");
    }

    #[test]
    fn test_short_rows_and_whitespace() {
        let sheet = read("Item Type,Component Name,Notes,Power\n  Helm , Iron Cap \n");
        let item = &sheet.items[0];
        assert_eq!(item.item_type, "Helm");
        assert_eq!(item.name, "Iron Cap");
        assert!(item.attributes.is_empty());
    }

    #[test]
    fn test_header_cleanup() {
        let sheet = read("\u{feff}Item Type, Component Name ,Power,,Power\nA,B,1,2,3\n");
        assert_eq!(sheet.attribute_columns, vec!["Power"]);
        assert_eq!(sheet.items[0].attributes[0].value, 1.0);
    }

    #[test]
    fn test_quoted_fields() {
        let sheet = read("Item Type,Component Name,Notes\nShield,\"O'Brien's Shield\",\"Heavy, but sturdy\"\n");
        assert_eq!(sheet.items[0].name, "O'Brien's Shield");
        assert_eq!(sheet.items[0].description, "Heavy, but sturdy");
    }

    #[test]
    fn test_missing_required_column() {
        let err = read_item_sheet("Item Type,Name\nA,B\n".as_bytes(), b',').unwrap_err();
        assert!(err.to_string().contains("Component Name"));
    }

    #[test]
    fn test_custom_delimiter() {
        let sheet = read_item_sheet("Item Type;Component Name;Power\nA;B;7\n".as_bytes(), b';').unwrap();
        assert_eq!(sheet.items[0].attributes[0].value, 7.0);
    }
}
