//! Merging per-brand results into one candidate list.
//!
//! `BrandResultSet` accumulates what each collector returned;
//! `Aggregator` flattens it and removes duplicate `(brand, name)` pairs.

use std::collections::{BTreeMap, HashSet};

use catalog::{Brand, Product};
use tracing::{debug, info};

/// Products collected per brand for one request.
///
/// Inserting a brand twice extends its list rather than replacing it, so
/// collectors can report in any order and more than once without losing
/// data. Iteration follows canonical brand order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrandResultSet {
    results: BTreeMap<Brand, Vec<Product>>,
}

impl BrandResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a collector's output, extending any existing entry.
    pub fn insert(&mut self, brand: Brand, products: Vec<Product>) {
        self.results.entry(brand).or_default().extend(products);
    }

    /// Key-wise union with another set.
    pub fn merge(&mut self, other: BrandResultSet) {
        for (brand, products) in other.results {
            self.insert(brand, products);
        }
    }

    pub fn get(&self, brand: Brand) -> Option<&[Product]> {
        self.results.get(&brand).map(Vec::as_slice)
    }

    pub fn brands(&self) -> impl Iterator<Item = Brand> + '_ {
        self.results.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Brand, &[Product])> + '_ {
        self.results.iter().map(|(brand, products)| (*brand, products.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Total products across all brands, duplicates included.
    pub fn total_products(&self) -> usize {
        self.results.values().map(Vec::len).sum()
    }
}

/// Flattens a `BrandResultSet` into a deduplicated product list.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator;

impl Aggregator {
    pub fn new() -> Self {
        Self
    }

    /// Concatenate all brand lists and deduplicate.
    pub fn aggregate(&self, results: &BrandResultSet) -> Vec<Product> {
        for (brand, products) in results.iter() {
            debug!("Aggregator: received {} products from {}", products.len(), brand);
        }

        let aggregated = self.dedupe(results.iter().flat_map(|(_, products)| products.iter().cloned()));

        info!(
            "Aggregated {} products into {} unique products",
            results.total_products(),
            aggregated.len()
        );
        aggregated
    }

    /// Deduplicate by `(brand, name)`, exact and case-sensitive.
    /// The first occurrence wins and relative order is preserved.
    pub fn dedupe(&self, products: impl IntoIterator<Item = Product>) -> Vec<Product> {
        let mut seen: HashSet<(Brand, String)> = HashSet::new();
        products
            .into_iter()
            .filter(|product| {
                let (brand, name) = product.key();
                seen.insert((brand, name.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Demographic;

    fn product(brand: Brand, name: &str, price: f64) -> Product {
        Product::new(brand, name, price, format!("https://example.com/{}", name), Demographic::Male, "")
    }

    #[test]
    fn test_insert_extends_existing_brand() {
        let mut results = BrandResultSet::new();
        results.insert(Brand::Nike, vec![product(Brand::Nike, "A", 1.0)]);
        results.insert(Brand::Nike, vec![product(Brand::Nike, "B", 2.0)]);

        assert_eq!(results.get(Brand::Nike).unwrap().len(), 2);
        assert_eq!(results.total_products(), 2);
    }

    #[test]
    fn test_merge_is_order_independent() {
        let mut nike = BrandResultSet::new();
        nike.insert(Brand::Nike, vec![product(Brand::Nike, "A", 1.0)]);
        let mut puma = BrandResultSet::new();
        puma.insert(Brand::Puma, vec![product(Brand::Puma, "P", 3.0)]);

        let mut left = BrandResultSet::new();
        left.merge(nike.clone());
        left.merge(puma.clone());
        let mut right = BrandResultSet::new();
        right.merge(puma);
        right.merge(nike);

        assert_eq!(left, right);
        assert_eq!(left.brands().collect::<Vec<_>>(), vec![Brand::Nike, Brand::Puma]);
    }

    #[test]
    fn test_aggregate_empty() {
        let aggregated = Aggregator::new().aggregate(&BrandResultSet::new());
        assert!(aggregated.is_empty());

        let mut results = BrandResultSet::new();
        results.insert(Brand::Nike, vec![]);
        results.insert(Brand::Adidas, vec![]);
        assert!(Aggregator::new().aggregate(&results).is_empty());
    }

    #[test]
    fn test_aggregate_follows_canonical_brand_order() {
        let mut results = BrandResultSet::new();
        results.insert(Brand::Puma, vec![product(Brand::Puma, "P", 3.0)]);
        results.insert(Brand::Nike, vec![product(Brand::Nike, "N", 1.0)]);
        results.insert(Brand::Adidas, vec![product(Brand::Adidas, "A", 2.0)]);

        let names: Vec<_> = Aggregator::new()
            .aggregate(&results)
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["N", "A", "P"]);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let mut results = BrandResultSet::new();
        results.insert(
            Brand::Nike,
            vec![product(Brand::Nike, "Air Max", 150.0), product(Brand::Nike, "Air Max", 99.0)],
        );

        let aggregated = Aggregator::new().aggregate(&results);
        assert_eq!(aggregated.len(), 1);
        assert_eq!(aggregated[0].price, 150.0);
    }

    #[test]
    fn test_dedupe_key_includes_brand_and_case() {
        let aggregated = Aggregator::new().dedupe(vec![
            product(Brand::Nike, "Classic", 1.0),
            product(Brand::Puma, "Classic", 2.0),
            product(Brand::Nike, "classic", 3.0),
            product(Brand::Nike, "Classic", 4.0),
        ]);

        let prices: Vec<_> = aggregated.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![1.0, 2.0, 3.0]);
        assert_eq!(aggregated[1].key(), (Brand::Puma, "Classic"));
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let aggregator = Aggregator::new();
        let once = aggregator.dedupe(vec![
            product(Brand::Nike, "A", 1.0),
            product(Brand::Nike, "A", 2.0),
            product(Brand::Adidas, "B", 3.0),
        ]);
        let twice = aggregator.dedupe(once.clone());
        assert_eq!(once, twice);
    }
}
