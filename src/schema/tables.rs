//! Target tables of the generated seed file

use super::types::*;

pub static ITEM_TYPES: TableSchema = TableSchema {
    name: "item_types",
    columns: &["type_code", "type_display_name", "type_description"],
    foreign_keys: &[],
};

pub static ITEM_ATTRIBUTES: TableSchema = TableSchema {
    name: "item_attributes",
    columns: &[
        "attribute_code",
        "attribute_display_name",
        "attribute_description",
    ],
    foreign_keys: &[],
};

pub static ITEM_RARITY: TableSchema = TableSchema {
    name: "item_rarity",
    columns: &[
        "rarity_code",
        "rarity_display_name",
        "rarity_stat_multiplier_percentage",
        "rarity_drop_chance",
    ],
    foreign_keys: &[],
};

pub static ITEM_LIST: TableSchema = TableSchema {
    name: "item_list",
    columns: &[
        "item_name",
        "item_description",
        "item_type_id",
        "item_rarity_id",
    ],
    foreign_keys: &[
        ForeignKey::new("item_type_id", "item_types"),
        ForeignKey::new("item_rarity_id", "item_rarity"),
    ],
};

pub static ITEM_ATTRIBUTE_VALUES: TableSchema = TableSchema {
    name: "item_attribute_values",
    columns: &["item_id", "attribute_id", "attribute_value"],
    foreign_keys: &[
        ForeignKey::new("item_id", "item_list"),
        ForeignKey::new("attribute_id", "item_attributes"),
    ],
};

/// All seeded tables in the order their sections are written (parents first)
pub static ALL_TABLES: &[&TableSchema] = &[
    &ITEM_TYPES,
    &ITEM_ATTRIBUTES,
    &ITEM_RARITY,
    &ITEM_LIST,
    &ITEM_ATTRIBUTE_VALUES,
];
