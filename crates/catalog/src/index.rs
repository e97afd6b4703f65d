//! CatalogIndex: the in-memory product store.
//!
//! Holds one product table per brand. Built either from the static
//! tables or from a JSON catalog file, then shared read-only behind an
//! `Arc` by every collector.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{CatalogError, Result};
use crate::tables;
use crate::types::{Brand, Product};

/// Per-brand product tables.
///
/// `BTreeMap` keeps brands in canonical order for listing.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    tables: BTreeMap<Brand, Vec<Product>>,
}

impl CatalogIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// The static mock tables for every supported brand.
    pub fn builtin() -> Self {
        let mut index = Self::new();
        for brand in Brand::ALL {
            for product in tables::builtin_products(brand) {
                index.insert_product(product);
            }
        }
        index
    }

    /// Load a catalog from a JSON array of products.
    ///
    /// Products are validated in parallel; the first invalid entry
    /// aborts the load. File order is preserved within each brand.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading catalog from {:?}", path);

        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let products: Vec<Product> =
            serde_json::from_str(&content).map_err(|source| CatalogError::Json {
                path: path.display().to_string(),
                source,
            })?;

        products.par_iter().try_for_each(Product::validate)?;

        let index = Self::from_products(products);
        let (brands, total) = index.counts();
        info!("Loaded {} products across {} brands", total, brands);
        Ok(index)
    }

    /// Group an already-validated product list by brand.
    pub fn from_products(products: impl IntoIterator<Item = Product>) -> Self {
        let mut index = Self::new();
        for product in products {
            index.insert_product(product);
        }
        index
    }

    pub fn insert_product(&mut self, product: Product) {
        debug!("Indexing {} / {}", product.brand, product.name);
        self.tables.entry(product.brand).or_default().push(product);
    }

    /// All products of one brand, in insertion order.
    pub fn products(&self, brand: Brand) -> &[Product] {
        self.tables.get(&brand).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Exact, case-sensitive lookup by identity.
    pub fn find(&self, brand: Brand, name: &str) -> Option<&Product> {
        self.products(brand).iter().find(|p| p.name == name)
    }

    /// Brands that have at least one product.
    pub fn brands(&self) -> impl Iterator<Item = Brand> + '_ {
        self.tables
            .iter()
            .filter(|(_, products)| !products.is_empty())
            .map(|(brand, _)| *brand)
    }

    /// Every product, brand by brand.
    pub fn iter(&self) -> impl Iterator<Item = &Product> + '_ {
        self.tables.values().flatten()
    }

    /// (brands with products, total products)
    pub fn counts(&self) -> (usize, usize) {
        let brands = self.brands().count();
        let total = self.tables.values().map(Vec::len).sum();
        (brands, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Demographic;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Catalog file removed when the handle drops.
    fn write_temp_catalog(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_builtin_index() {
        let index = CatalogIndex::builtin();
        assert_eq!(index.counts(), (3, 12));
        assert_eq!(index.products(Brand::Nike).len(), 4);
        assert_eq!(index.products(Brand::Nike)[0].name, "Nike Air Max 270");
    }

    #[test]
    fn test_find_is_exact() {
        let index = CatalogIndex::builtin();
        assert!(index.find(Brand::Nike, "Nike Air Force 1").is_some());
        assert!(index.find(Brand::Nike, "nike air force 1").is_none());
        assert!(index.find(Brand::Adidas, "Nike Air Force 1").is_none());
    }

    #[test]
    fn test_empty_queries() {
        let index = CatalogIndex::new();
        assert!(index.products(Brand::Puma).is_empty());
        assert!(index.find(Brand::Puma, "Puma RS-X Efekt").is_none());
        assert_eq!(index.counts(), (0, 0));
        assert_eq!(index.brands().count(), 0);
    }

    #[test]
    fn test_load_from_file() {
        let file = write_temp_catalog(
            r#"[
                {"brand": "Puma", "name": "Puma Speedcat", "price": 90.0, "url": "https://puma.com/speedcat",
                 "gender": "female", "description": "Low-profile racing heritage."},
                {"brand": "Nike", "name": "Nike Dunk Low", "price": 115.0, "url": "https://nike.com/dunklow",
                 "gender": "male", "description": "Court classic.", "image_url": "https://nike.com/dunk.png"}
            ]"#,
        );

        let index = CatalogIndex::load_from_file(file.path()).unwrap();

        assert_eq!(index.counts(), (2, 2));
        let speedcat = index.find(Brand::Puma, "Puma Speedcat").unwrap();
        assert_eq!(speedcat.demographic, Demographic::Female);
        assert!(speedcat.image_url.is_none());
        assert_eq!(index.brands().collect::<Vec<_>>(), vec![Brand::Nike, Brand::Puma]);
    }

    #[test]
    fn test_load_rejects_negative_price() {
        let file = write_temp_catalog(
            r#"[{"brand": "Nike", "name": "Broken", "price": -1.0, "url": "https://nike.com/x",
                 "gender": "male", "description": ""}]"#,
        );

        let result = CatalogIndex::load_from_file(file.path());

        assert!(matches!(result, Err(CatalogError::InvalidValue { .. })));
    }

    #[test]
    fn test_load_rejects_unknown_brand() {
        let file = write_temp_catalog(
            r#"[{"brand": "Reebok", "name": "Club C", "price": 80.0, "url": "https://reebok.com/clubc",
                 "gender": "male", "description": ""}]"#,
        );

        let result = CatalogIndex::load_from_file(file.path());

        assert!(matches!(result, Err(CatalogError::Json { .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let result = CatalogIndex::load_from_file(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }
}
