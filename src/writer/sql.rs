use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::format::{banner, comment_text, sql_number, sql_string};
use crate::parser::{read_item_sheet, read_item_sheet_path, ItemRecord};
use crate::schema::{
    SeedCatalog, DEFAULT_RARITY, ITEM_ATTRIBUTES, ITEM_ATTRIBUTE_VALUES, ITEM_LIST, ITEM_RARITY,
    ITEM_TYPES,
};

/// Default output file name
pub const DEFAULT_OUTPUT: &str = "item-seed.sql";

/// Settings for one conversion
#[derive(Debug, Clone)]
pub struct SeedOptions {
    /// Rarity code every item references
    pub rarity_code: String,
    /// CSV field delimiter
    pub delimiter: u8,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            rarity_code: DEFAULT_RARITY.code.to_string(),
            delimiter: b',',
        }
    }
}

/// Row counts of a generated seed file
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeedCounts {
    pub item_types: usize,
    pub attributes: usize,
    pub items: usize,
    pub attribute_values: usize,
    pub skipped_rows: usize,
}

impl SeedCounts {
    fn of(catalog: &SeedCatalog) -> Self {
        Self {
            item_types: catalog.item_types.len(),
            attributes: catalog.attributes.len(),
            items: catalog.items.len(),
            attribute_values: catalog.attribute_value_count(),
            skipped_rows: catalog.skipped_rows,
        }
    }
}

/// Seed SQL rendered in memory
#[derive(Debug, Clone)]
pub struct RenderedSeed {
    pub sql: String,
    pub counts: SeedCounts,
}

/// Result of writing a seed file
#[derive(Debug, Clone, Serialize)]
pub struct SeedSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(flatten)]
    pub counts: SeedCounts,
}

/// Writes the five seed sections in dependency order
pub struct SeedSqlWriter<'a, W: Write> {
    out: W,
    catalog: &'a SeedCatalog,
    rarity_code: &'a str,
}

impl<'a, W: Write> SeedSqlWriter<'a, W> {
    pub fn new(out: W, catalog: &'a SeedCatalog, rarity_code: &'a str) -> Self {
        Self {
            out,
            catalog,
            rarity_code,
        }
    }

    /// Write the whole file and hand back the sink
    pub fn write_seed(mut self, source: &str) -> Result<W> {
        writeln!(self.out, "-- # AUTO-GENERATED SEED FILE")?;
        writeln!(self.out, "-- Generated from: {}\n", comment_text(source))?;

        self.write_item_types()?;
        self.write_attributes()?;
        self.write_rarity()?;
        self.write_items()?;
        self.write_attribute_values()?;

        self.out.flush()?;
        Ok(self.out)
    }

    fn write_item_types(&mut self) -> Result<()> {
        write!(self.out, "{}", banner("ITEM TYPES"))?;

        let catalog = self.catalog;
        for (name, code) in &catalog.item_types {
            writeln!(self.out, "{}", ITEM_TYPES.insert_into())?;
            writeln!(
                self.out,
                "VALUES ({}, {}, {});\n",
                sql_string(code.as_str()),
                sql_string(name),
                sql_string(&format!("{} equipment slot", name))
            )?;
        }
        Ok(())
    }

    fn write_attributes(&mut self) -> Result<()> {
        write!(self.out, "{}", banner("ITEM ATTRIBUTES"))?;

        let catalog = self.catalog;
        for attribute in &catalog.attributes {
            writeln!(self.out, "{}", ITEM_ATTRIBUTES.insert_into())?;
            writeln!(
                self.out,
                "VALUES ({}, {}, {});\n",
                sql_string(attribute.code.as_str()),
                sql_string(&attribute.name),
                sql_string(&format!("{} stat", attribute.name))
            )?;
        }
        Ok(())
    }

    fn write_rarity(&mut self) -> Result<()> {
        write!(self.out, "{}", banner("ITEM RARITY (default)"))?;

        let rarity = &DEFAULT_RARITY;
        writeln!(self.out, "{}", ITEM_RARITY.insert_into())?;
        writeln!(
            self.out,
            "VALUES ({}, {}, {}, {})",
            sql_string(rarity.code),
            sql_string(rarity.display_name),
            rarity.stat_multiplier_percentage,
            rarity.drop_chance
        )?;
        writeln!(self.out, "ON CONFLICT (rarity_code) DO NOTHING;\n")?;
        Ok(())
    }

    fn write_items(&mut self) -> Result<()> {
        write!(self.out, "{}", banner("ITEMS"))?;

        let catalog = self.catalog;
        for item in &catalog.items {
            let type_code = catalog
                .type_code(&item.item_type)
                .with_context(|| format!("No code assigned to item type {:?}", item.item_type))?;

            writeln!(self.out, "-- {}", comment_text(&item.name))?;
            writeln!(self.out, "{}", ITEM_LIST.insert_into())?;
            writeln!(self.out, "VALUES (")?;
            writeln!(self.out, "    {},", sql_string(&item.name))?;
            writeln!(self.out, "    {},", sql_string(&item.description))?;
            writeln!(
                self.out,
                "    (SELECT id FROM {} WHERE type_code = {}),",
                ITEM_TYPES.name,
                sql_string(type_code.as_str())
            )?;
            writeln!(
                self.out,
                "    (SELECT id FROM {} WHERE rarity_code = {})",
                ITEM_RARITY.name,
                sql_string(self.rarity_code)
            )?;
            writeln!(self.out, ");\n")?;
        }
        Ok(())
    }

    fn write_attribute_values(&mut self) -> Result<()> {
        write!(self.out, "{}", banner("ITEM ATTRIBUTE VALUES"))?;

        let catalog = self.catalog;
        for item in &catalog.items {
            if item.attributes.is_empty() {
                continue;
            }

            writeln!(self.out, "-- {} attributes", comment_text(&item.name))?;
            self.write_item_values(item)?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn write_item_values(&mut self, item: &ItemRecord) -> Result<()> {
        let catalog = self.catalog;
        for value in &item.attributes {
            let attribute = catalog
                .attribute(value.attribute)
                .with_context(|| format!("Unknown attribute column {}", value.attribute))?;

            writeln!(self.out, "{}", ITEM_ATTRIBUTE_VALUES.insert_into())?;
            writeln!(self.out, "VALUES (")?;
            writeln!(
                self.out,
                "    (SELECT id FROM {} WHERE item_name = {} LIMIT 1),",
                ITEM_LIST.name,
                sql_string(&item.name)
            )?;
            writeln!(
                self.out,
                "    (SELECT id FROM {} WHERE attribute_code = {}),",
                ITEM_ATTRIBUTES.name,
                sql_string(attribute.code.as_str())
            )?;
            writeln!(self.out, "    {}", sql_number(value.value))?;
            writeln!(self.out, ");")?;
        }
        Ok(())
    }
}

fn render_catalog(catalog: &SeedCatalog, source: &str, options: &SeedOptions) -> Result<String> {
    if options.rarity_code != DEFAULT_RARITY.code {
        warn!(
            rarity = %options.rarity_code,
            "items reference a rarity this seed file does not create"
        );
    }

    let buf = SeedSqlWriter::new(Vec::new(), catalog, &options.rarity_code)
        .write_seed(source)?;
    String::from_utf8(buf).context("Generated SQL is not valid UTF-8")
}

/// Convert CSV from any reader into seed SQL held in memory.
/// `source` is only used for the file header comment.
pub fn render_seed_sql<R: Read>(
    input: R,
    source: &str,
    options: &SeedOptions,
) -> Result<RenderedSeed> {
    let sheet = read_item_sheet(input, options.delimiter)?;
    let catalog = SeedCatalog::build(sheet);
    let sql = render_catalog(&catalog, source, options)?;

    Ok(RenderedSeed {
        sql,
        counts: SeedCounts::of(&catalog),
    })
}

/// Convert a CSV file into a seed SQL file.
///
/// The whole file is rendered before the output is created, so a failed
/// read never leaves a truncated seed file behind.
pub fn generate_seed_sql(input: &Path, output: &Path, options: &SeedOptions) -> Result<SeedSummary> {
    let sheet = read_item_sheet_path(input, options.delimiter)?;
    let catalog = SeedCatalog::build(sheet);
    let sql = render_catalog(&catalog, &input.display().to_string(), options)?;

    std::fs::write(output, sql).with_context(|| format!("Failed to write: {:?}", output))?;

    let counts = SeedCounts::of(&catalog);
    info!(
        output = %output.display(),
        items = counts.items,
        values = counts.attribute_values,
        "wrote seed file"
    );

    Ok(SeedSummary {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        counts,
    })
}
