//! # Food Resolver
//!
//! File: cli/src/assistant/resolver.rs
//!
//! ## Overview
//!
//! Turns free text ("how many calories in chicken rice") into a nutrient
//! record:
//! 1. exact match of the lowercased query against the local food names
//! 2. first local food (file order) whose name contains the query or is
//!    contained in it
//! 3. the external lookup with the raw query
//!
//! Step 3 never fails the caller: network errors, timeouts, bad status codes
//! and empty results all come back as `None`.
//!
use super::records::FoodRecord;
use super::store::{FoodTable, LexicalStore};
use super::usda::NutritionLookup;
use std::sync::Arc;
use tracing::{debug, warn};

/// Local-first food lookup with an external fallback.
#[derive(Clone)]
pub struct FoodResolver {
    store: LexicalStore,
    external: Arc<dyn NutritionLookup>,
}

impl FoodResolver {
    pub fn new(store: LexicalStore, external: Arc<dyn NutritionLookup>) -> Self {
        Self { store, external }
    }

    pub async fn resolve(&self, query: &str) -> Option<FoodRecord> {
        if let Some(food) = find_local(&self.store.load_foods(), query) {
            debug!("Resolved '{}' locally as '{}'", query, food.name);
            return Some(food);
        }
        match self.external.search(query).await {
            Ok(Some(food)) => {
                debug!("Resolved '{}' externally as '{}'", query, food.name);
                Some(food)
            }
            Ok(None) => {
                debug!("No external match for '{}'", query);
                None
            }
            Err(e) => {
                warn!("External nutrition lookup failed for '{}': {:#}", query, e);
                None
            }
        }
    }
}

/// Local half of the resolution: exact key, then first substring match either way.
pub fn find_local(foods: &FoodTable, query: &str) -> Option<FoodRecord> {
    let query = query.to_lowercase();
    if let Some(food) = foods.get(&query) {
        return Some(food.clone());
    }
    foods
        .iter()
        .find(|(name, _)| query.contains(name) || name.contains(query.as_str()))
        .map(|(_, food)| food.clone())
}
