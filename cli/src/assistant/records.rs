//! # NutriBot Data Records
//!
//! File: cli/src/assistant/records.rs
//!
//! ## Overview
//!
//! The three record shapes stored one-per-line in the JSON-lines data files:
//!
//! ```text
//! {"name": "chicken rice", "calories": 607, "protein": 25, "sodium": 1287}
//! {"keywords": ["carbs bad"], "myth": "...", "truth": "...", "tip": "..."}
//! {"category": "diabetes", "unhealthy": "Teh", "healthy": "Teh-C kosong", "benefit": "..."}
//! ```
//!
//! Nutrient values are optional. A value that is not in the file stays `None`
//! and renders as `N/A`; it is never treated as a measured zero.
//!
use serde::Deserialize;
use std::fmt;

/// Where a [`FoodRecord`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FoodSource {
    #[default]
    Local,
    External,
}

impl fmt::Display for FoodSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoodSource::Local => write!(f, "local"),
            FoodSource::External => write!(f, "external"),
        }
    }
}

/// Nutrient profile of one dish, per serving.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct FoodRecord {
    pub name: String,
    /// kcal
    #[serde(default)]
    pub calories: Option<f64>,
    /// g
    #[serde(default)]
    pub protein: Option<f64>,
    /// g
    #[serde(default)]
    pub carbs: Option<f64>,
    /// g
    #[serde(default)]
    pub fat: Option<f64>,
    /// mg
    #[serde(default)]
    pub sodium: Option<f64>,
    /// g
    #[serde(default)]
    pub fiber: Option<f64>,
    /// g
    #[serde(default)]
    pub sugar: Option<f64>,
    #[serde(skip)]
    pub source: FoodSource,
}

/// Formats an optional nutrient value the way it appears in answers.
///
/// Whole numbers print without a fractional part (`607`, not `607.0`);
/// absent values print as `N/A`.
pub fn display_quantity(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{}", v as i64),
        Some(v) => format!("{}", v),
        None => "N/A".to_string(),
    }
}

/// A common diet misconception and its correction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MythRecord {
    /// Phrases matched case-insensitively as substrings of the message.
    #[serde(default)]
    pub keywords: Vec<String>,
    pub myth: String,
    pub truth: String,
    pub tip: String,
}

impl MythRecord {
    /// Returns `true` if any keyword occurs in `message_lower`.
    ///
    /// `message_lower` must already be lowercased.
    pub fn matches(&self, message_lower: &str) -> bool {
        self.keywords
            .iter()
            .any(|kw| message_lower.contains(&kw.to_lowercase()))
    }
}

/// Health condition a swap is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SwapCategory {
    Diabetes,
    BloodPressure,
    Cholesterol,
    #[default]
    #[serde(other)]
    Uncategorized,
}

/// A healthier replacement for a common dish or drink.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SwapRecord {
    #[serde(default)]
    pub category: SwapCategory,
    pub unhealthy: String,
    pub healthy: String,
    #[serde(default)]
    pub benefit: String,
}
