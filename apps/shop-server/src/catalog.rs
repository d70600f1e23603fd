//! # Catalog Loader
//!
//! Reads the startup inventory and promotion catalogs from TOML files.
//!
//! ## File Format
//! ```toml
//! # stock.toml
//! [[product]]
//! sku = "A1234"
//! name = "Carrot"
//! price = 1.1
//! stock = 10
//!
//! # promotions.toml
//! [[promotion]]
//! name = "Free stick with every carrot"
//! sku = "FREEBIE"
//! category = "freebie"
//! requires = { sku = "A1234", count = 1 }
//! rule = { sku = "B1234", count = 1 }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use fakeshop_core::{ProductLine, Promotion};

/// Catalog loading errors. Both are fatal at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {kind} file {path}: {source}")]
    Read {
        kind: &'static str,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {kind} file: {source}")]
    Parse {
        kind: &'static str,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
struct StockFile {
    #[serde(default, rename = "product")]
    products: Vec<ProductLine>,
}

#[derive(Debug, Default, Deserialize)]
struct PromotionsFile {
    #[serde(default, rename = "promotion")]
    promotions: Vec<Promotion>,
}

/// Loads the inventory catalog.
pub fn load_inventory(path: &Path) -> Result<Vec<ProductLine>, CatalogError> {
    let contents = read("inventory", path)?;
    let products = parse_inventory(&contents)?;
    info!(path = %path.display(), products = products.len(), "Inventory catalog loaded");
    Ok(products)
}

/// Loads the promotion catalog.
pub fn load_promotions(path: &Path) -> Result<Vec<Promotion>, CatalogError> {
    let contents = read("promotions", path)?;
    let promotions = parse_promotions(&contents)?;
    info!(path = %path.display(), promotions = promotions.len(), "Promotion catalog loaded");
    Ok(promotions)
}

pub fn parse_inventory(contents: &str) -> Result<Vec<ProductLine>, CatalogError> {
    toml::from_str::<StockFile>(contents)
        .map(|file| file.products)
        .map_err(|source| CatalogError::Parse {
            kind: "inventory",
            source,
        })
}

pub fn parse_promotions(contents: &str) -> Result<Vec<Promotion>, CatalogError> {
    toml::from_str::<PromotionsFile>(contents)
        .map(|file| file.promotions)
        .map_err(|source| CatalogError::Parse {
            kind: "promotions",
            source,
        })
}

fn read(kind: &'static str, path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|source| CatalogError::Read {
        kind,
        path: path.display().to_string(),
        source,
    })
}
