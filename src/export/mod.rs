//! Export Engine
//!
//! Handles exporting the product catalog to CSV and JSON formats.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::store::catalog::Product;

/// Flattened product row for CSV/JSON export.
#[derive(Serialize)]
struct ExportRow<'a> {
    id: u32,
    name: &'a str,
    description: &'a str,
    price: u32,
    original_price: Option<u32>,
    quantity: u32,
    rating: Option<f32>,
    reviews: u32,
    badge: Option<&'a str>,
    image: &'a str,
}

impl<'a> From<&'a Product> for ExportRow<'a> {
    fn from(p: &'a Product) -> Self {
        Self {
            id: p.id,
            name: &p.name,
            description: &p.description,
            price: p.price,
            original_price: p.original_price,
            quantity: p.quantity,
            rating: p.rating,
            reviews: p.reviews,
            badge: p.badge.as_deref(),
            image: &p.image,
        }
    }
}

/// Export engine functions
pub struct ExportEngine;

impl ExportEngine {
    /// Export the catalog to CSV, one row per product.
    pub fn export_catalog_to_csv(products: &[Product], path: &Path) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path).context("Failed to create CSV writer")?;

        for product in products {
            wtr.serialize(ExportRow::from(product))
                .context("Failed to serialize product to CSV")?;
        }

        wtr.flush().context("Failed to flush CSV writer")?;
        Ok(())
    }

    /// Export the catalog to pretty-printed JSON.
    pub fn export_catalog_to_json(products: &[Product], path: &Path) -> Result<()> {
        let rows: Vec<ExportRow> = products.iter().map(ExportRow::from).collect();

        let file = File::create(path).context("Failed to create JSON file")?;
        serde_json::to_writer_pretty(file, &rows).context("Failed to write JSON data")?;

        Ok(())
    }

    /// Date-stamped default file name, e.g. `catalog-2025-11-30.csv`.
    pub fn default_file_name(extension: &str) -> String {
        format!(
            "catalog-{}.{}",
            chrono::Local::now().format("%Y-%m-%d"),
            extension
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::catalog::Catalog;

    #[test]
    fn csv_export_writes_header_and_one_row_per_product() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");
        let catalog = Catalog::seed();

        ExportEngine::export_catalog_to_csv(catalog.products(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(
            header,
            "id,name,description,price,original_price,quantity,rating,reviews,badge,image"
        );
        assert_eq!(content.lines().count(), 1 + catalog.len());
        assert!(content.contains("Henyle Acetate Premium"));
    }

    #[test]
    fn json_export_contains_every_product() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let catalog = Catalog::seed();

        ExportEngine::export_catalog_to_json(catalog.products(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let rows: serde_json::Value = serde_json::from_str(&content).unwrap();
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], 1);
        assert_eq!(rows[1]["name"], "Benzyl Benzoate Pure");
    }

    #[test]
    fn default_file_name_is_date_stamped() {
        let name = ExportEngine::default_file_name("csv");
        assert!(name.starts_with("catalog-"));
        assert!(name.ends_with(".csv"));
        // catalog-YYYY-MM-DD.csv
        assert_eq!(name.len(), "catalog-0000-00-00.csv".len());
    }
}
