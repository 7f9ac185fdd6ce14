//! # Provider Nutrient Mapping
//!
//! File: cli/src/assistant/nutrients.rs
//!
//! ## Overview
//!
//! External providers report nutrients as free-form `(name, value)` pairs
//! ("Energy", "Total lipid (fat)", "Sugars, total including NLEA", ...). This
//! module maps them onto [`FoodRecord`] fields with an ordered rule table.
//!
//! Each nutrient is tested against the rules top to bottom and takes the field
//! of the first rule that matches. A field keeps the first value assigned to
//! it. Nutrients that match no rule are dropped.
//!
use super::records::{FoodRecord, FoodSource};

/// A [`FoodRecord`] field that a provider nutrient can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NutrientField {
    Calories,
    Protein,
    Carbs,
    Fat,
    Sodium,
    Fiber,
    Sugar,
}

/// One row of the mapping table.
#[derive(Debug)]
pub struct NutrientRule {
    /// Substring that must appear in the lowercased nutrient name.
    pub contains: &'static str,
    /// Substring that must not appear.
    pub excludes: Option<&'static str>,
    pub field: NutrientField,
}

impl NutrientRule {
    fn matches(&self, name_lower: &str) -> bool {
        name_lower.contains(self.contains)
            && self.excludes.map_or(true, |ex| !name_lower.contains(ex))
    }
}

const fn rule(contains: &'static str, excludes: Option<&'static str>, field: NutrientField) -> NutrientRule {
    NutrientRule {
        contains,
        excludes,
        field,
    }
}

/// Mapping rules in precedence order.
pub const NUTRIENT_RULES: &[NutrientRule] = &[
    rule("energy", None, NutrientField::Calories),
    rule("calorie", None, NutrientField::Calories),
    rule("protein", None, NutrientField::Protein),
    rule("carbohydrate", None, NutrientField::Carbs),
    rule("total lipid", None, NutrientField::Fat),
    rule("fat", Some("fatty"), NutrientField::Fat),
    rule("sodium", None, NutrientField::Sodium),
    rule("fiber", None, NutrientField::Fiber),
    rule("sugar", Some("added"), NutrientField::Sugar),
];

/// The field a provider nutrient name maps to, if any.
pub fn classify_nutrient(name: &str) -> Option<NutrientField> {
    let name_lower = name.to_lowercase();
    NUTRIENT_RULES
        .iter()
        .find(|r| r.matches(&name_lower))
        .map(|r| r.field)
}

/// Builds an external [`FoodRecord`] from a provider description and nutrient list.
///
/// Nutrients reported without a value are ignored rather than recorded as zero.
pub fn map_nutrients<'a, I>(name: &str, nutrients: I) -> FoodRecord
where
    I: IntoIterator<Item = (&'a str, Option<f64>)>,
{
    let mut food = FoodRecord {
        name: name.to_string(),
        source: FoodSource::External,
        ..FoodRecord::default()
    };
    for (nutrient_name, value) in nutrients {
        let (Some(field), Some(value)) = (classify_nutrient(nutrient_name), value) else {
            continue;
        };
        let slot = match field {
            NutrientField::Calories => &mut food.calories,
            NutrientField::Protein => &mut food.protein,
            NutrientField::Carbs => &mut food.carbs,
            NutrientField::Fat => &mut food.fat,
            NutrientField::Sodium => &mut food.sodium,
            NutrientField::Fiber => &mut food.fiber,
            NutrientField::Sugar => &mut food.sugar,
        };
        slot.get_or_insert(value);
    }
    food
}
