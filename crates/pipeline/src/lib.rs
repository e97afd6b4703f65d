//! Candidate collection for sneaker recommendations.
//!
//! This crate provides:
//! - Filter trait and the demographic / budget filters
//! - FilterPipeline for composing filters
//! - BrandCollector, one per brand, running the catalog filter
//! - BrandSelector for deciding which collectors run
//! - BrandResultSet and Aggregator for merging collector output
//!
//! ## Architecture
//! A request moves through these stages:
//! 1. BrandSelector picks the brands to query
//! 2. One BrandCollector per selected brand filters its table
//! 3. Aggregator flattens and deduplicates the per-brand results
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{Aggregator, BrandCollector, BrandResultSet, BrandSelector};
//!
//! let brands = BrandSelector::new().select(&preferences.preferred_brands);
//! let mut results = BrandResultSet::new();
//! for brand in brands {
//!     let collector = BrandCollector::new(brand, index.clone());
//!     results.insert(brand, collector.collect(&preferences)?);
//! }
//! let candidates = Aggregator::new().aggregate(&results);
//! ```

pub mod aggregator;
pub mod collector;
pub mod filter_pipeline;
pub mod filters;
pub mod selector;
pub mod traits;

// Re-export main types
pub use aggregator::{Aggregator, BrandResultSet};
pub use collector::BrandCollector;
pub use filter_pipeline::FilterPipeline;
pub use selector::BrandSelector;
pub use traits::Filter;
