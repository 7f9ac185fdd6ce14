//! # USDA FoodData Central Client
//!
//! File: cli/src/assistant/usda.rs
//!
//! ## Overview
//!
//! The external half of food resolution. Dishes missing from the local
//! database are looked up on the FoodData Central `foods/search` endpoint,
//! asking for the single best match (`pageSize=1`) and converting its nutrient
//! list with [`map_nutrients`](super::nutrients::map_nutrients).
//!
//! ## Architecture
//!
//! - `NutritionLookup`: the trait the resolver depends on, so tests can swap in
//!   canned results without a network.
//! - `UsdaClient`: the `reqwest` implementation with a bounded request timeout.
//!
//! `UsdaClient::search` reports failures as errors (`Ok(None)` means the
//! service answered with no matches). Turning those errors into "not found" is
//! the resolver's job.
//!
use super::nutrients::map_nutrients;
use super::records::FoodRecord;
use crate::core::config::ApiConfig;
use crate::core::error::{NutribotError, Result};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// A query-by-name nutrition source.
#[async_trait]
pub trait NutritionLookup: Send + Sync {
    /// Returns the best match for `query`, or `None` when there is no match.
    async fn search(&self, query: &str) -> Result<Option<FoodRecord>>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<SearchFood>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchFood {
    description: Option<String>,
    #[serde(default)]
    food_nutrients: Vec<SearchNutrient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchNutrient {
    #[serde(default)]
    nutrient_name: String,
    #[serde(default)]
    value: Option<f64>,
}

/// Client for the FoodData Central search API.
#[derive(Debug, Clone)]
pub struct UsdaClient {
    client: Client,
    url: String,
    api_key: String,
}

impl UsdaClient {
    pub fn new(api: &ApiConfig) -> Result<Self> {
        let timeout = Duration::from_secs(api.timeout_secs);
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client for USDA lookups")?;
        Ok(Self {
            client,
            url: api.usda_url.clone(),
            api_key: api.usda_key.clone(),
        })
    }
}

#[async_trait]
impl NutritionLookup for UsdaClient {
    async fn search(&self, query: &str) -> Result<Option<FoodRecord>> {
        let url = Url::parse_with_params(
            &self.url,
            &[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("pageSize", "1"),
            ],
        )
        .with_context(|| format!("Invalid USDA search URL: {}", self.url))?;

        debug!("USDA search for '{}'", query);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| NutribotError::Lookup(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(NutribotError::LookupStatus {
                status: response.status().as_u16(),
                query: query.to_string(),
            }
            .into());
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| NutribotError::Lookup(format!("invalid response body: {}", e)))?;

        Ok(body.foods.into_iter().next().map(|food| {
            let name = food.description.as_deref().unwrap_or("this food");
            map_nutrients(
                name,
                food.food_nutrients
                    .iter()
                    .map(|n| (n.nutrient_name.as_str(), n.value)),
            )
        }))
    }
}
