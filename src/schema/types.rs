use std::collections::HashSet;
use std::fmt;

/// Foreign key reference to another seeded table
#[derive(Debug, Clone)]
pub struct ForeignKey {
    pub column: &'static str,
    pub references_table: &'static str,
}

impl ForeignKey {
    pub const fn new(column: &'static str, references_table: &'static str) -> Self {
        Self {
            column,
            references_table,
        }
    }
}

/// Target table definition
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub name: &'static str,
    /// Columns written by the seed file, in statement order
    pub columns: &'static [&'static str],
    pub foreign_keys: &'static [ForeignKey],
}

impl TableSchema {
    /// Get all tables this table depends on (FK parents)
    pub fn dependencies(&self) -> HashSet<&'static str> {
        self.foreign_keys
            .iter()
            .map(|fk| fk.references_table)
            .collect()
    }

    /// `INSERT INTO <table> (<columns>)` without the values clause
    pub fn insert_into(&self) -> String {
        format!("INSERT INTO {} ({})", self.name, self.columns.join(", "))
    }
}

/// Stable join key for an item type: `type<N>`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemTypeCode(String);

impl ItemTypeCode {
    /// `rank` is 1-based
    pub fn from_rank(rank: usize) -> Self {
        Self(format!("type{}", rank))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemTypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stable join key for an attribute column: `attribute<N>`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttributeCode(String);

impl AttributeCode {
    /// `position` is the 1-based attribute column position
    pub fn from_position(position: usize) -> Self {
        Self(format!("attribute{}", position))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttributeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rarity row inserted ahead of the items
#[derive(Debug, Clone, PartialEq)]
pub struct Rarity {
    pub code: &'static str,
    pub display_name: &'static str,
    pub stat_multiplier_percentage: u32,
    pub drop_chance: u32,
}

/// The only rarity the seed file creates. Guarded with `ON CONFLICT` so an
/// existing row is left untouched.
pub const DEFAULT_RARITY: Rarity = Rarity {
    code: "rarity1",
    display_name: "Common",
    stat_multiplier_percentage: 100,
    drop_chance: 100,
};
