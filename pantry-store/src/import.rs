//! Bulk item import from CSV.
//!
//! Expected header (column order is free, optional columns may be absent):
//! name,category,purchase_date,quantity,notes,manufactured_date

use anyhow::{Context, Result, bail};
use pantry_core::NewFoodItem;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    category: String,
    purchase_date: String,
    #[serde(default)]
    quantity: Option<u32>,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    manufactured_date: Option<String>,
}

/// Parse a CSV file of items. Every row is validated; the first bad row fails
/// the whole import with the physical line it starts on.
pub fn parse_items_csv(path: impl AsRef<Path>) -> Result<Vec<NewFoodItem>> {
    let file = std::fs::File::open(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    read_items_csv(file)
}

pub fn read_items_csv(reader: impl Read) -> Result<Vec<NewFoodItem>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().context("reading csv header")?.clone();
    let mut items = Vec::new();
    for result in rdr.records() {
        let record = result.context("reading csv row")?;
        let line = record.position().map_or(0, |p| p.line());
        let row: CsvRow = record
            .deserialize(Some(&headers))
            .with_context(|| format!("line {line}"))?;
        let item = NewFoodItem {
            name: row.name,
            category: row.category,
            purchase_date: row.purchase_date,
            quantity: row.quantity.unwrap_or(1),
            notes: row.notes.filter(|s| !s.is_empty()),
            manufactured_date: row.manufactured_date.filter(|s| !s.is_empty()),
        };
        if let Err(e) = item.validate() {
            bail!("line {line}: {} ({e})", item.name);
        }
        items.push(item);
    }

    Ok(items)
}
