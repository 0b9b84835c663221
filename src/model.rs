use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A recipe record as returned by the recipe API.
///
/// Only the fields the viewer reads are typed. Every other field
/// (ingredient and measure slots, category, area, tags, ...) is kept
/// verbatim so the record can be serialized back in full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl Recipe {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            thumbnail: None,
            instructions: None,
            fields: BTreeMap::new(),
        }
    }

    /// String value of an untyped field; `None` when absent, null or not a string
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// Ingredient in the 1-indexed slot
    pub fn ingredient(&self, slot: usize) -> Option<&str> {
        self.field(&format!("strIngredient{slot}"))
    }

    /// Measure in the 1-indexed slot
    pub fn measure(&self, slot: usize) -> Option<&str> {
        self.field(&format!("strMeasure{slot}"))
    }
}

/// Envelope shared by the random and search endpoints
#[derive(Debug, Deserialize)]
pub struct MealsResponse {
    #[serde(default)]
    pub meals: Option<Vec<Recipe>>,
}

impl MealsResponse {
    /// First recipe of the envelope, if any
    pub fn into_first(self) -> Option<Recipe> {
        self.meals.and_then(|meals| meals.into_iter().next())
    }
}
