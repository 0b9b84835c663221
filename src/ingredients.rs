use crate::model::Recipe;

/// Number of ingredient/measure slot pairs a recipe record carries
pub const INGREDIENT_SLOTS: usize = 20;

/// Build the ingredient display lines of a recipe.
///
/// Slots are scanned in index order. A slot is kept only when its
/// ingredient is a non-blank string; the measure is prefixed with a single
/// space separator when it is non-blank as well.
pub fn extract_ingredients(recipe: &Recipe) -> Vec<String> {
    (1..=INGREDIENT_SLOTS)
        .filter_map(|slot| {
            let ingredient = recipe.ingredient(slot).map(str::trim)?;
            if ingredient.is_empty() {
                return None;
            }
            match recipe.measure(slot).map(str::trim) {
                Some(measure) if !measure.is_empty() => Some(format!("{measure} {ingredient}")),
                _ => Some(ingredient.to_string()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn recipe_from(value: Value) -> Recipe {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_skips_blank_slots_and_missing_measures() {
        let recipe = recipe_from(json!({
            "strMeal": "Bread",
            "strIngredient1": "Flour",
            "strMeasure1": "2 cups",
            "strIngredient2": "",
            "strIngredient3": "Egg",
            "strMeasure3": null
        }));

        assert_eq!(extract_ingredients(&recipe), vec!["2 cups Flour", "Egg"]);
    }

    #[test]
    fn test_keeps_slot_order() {
        let recipe = recipe_from(json!({
            "strMeal": "Salad",
            "strIngredient20": "Zucchini",
            "strIngredient2": "Apple",
            "strIngredient11": "Lettuce",
            "strMeasure11": "1 head"
        }));

        assert_eq!(
            extract_ingredients(&recipe),
            vec!["Apple", "1 head Lettuce", "Zucchini"]
        );
    }

    #[test]
    fn test_whitespace_only_values() {
        let recipe = recipe_from(json!({
            "strMeal": "Soup",
            "strIngredient1": "   ",
            "strMeasure1": "1 tsp",
            "strIngredient2": " Salt ",
            "strMeasure2": "  "
        }));

        assert_eq!(extract_ingredients(&recipe), vec!["Salt"]);
    }

    #[test]
    fn test_ignores_slots_beyond_twenty_and_non_strings() {
        let recipe = recipe_from(json!({
            "strMeal": "Odd",
            "strIngredient1": 42,
            "strIngredient21": "Ghost",
            "strIngredient5": "Water",
            "strMeasure5": 3
        }));

        assert_eq!(extract_ingredients(&recipe), vec!["Water"]);
    }

    #[test]
    fn test_empty_recipe_and_repeat_calls() {
        let recipe = Recipe::new("Nothing");
        assert!(extract_ingredients(&recipe).is_empty());

        let recipe = recipe_from(json!({"strMeal": "Tea", "strIngredient1": "Tea"}));
        assert_eq!(extract_ingredients(&recipe), extract_ingredients(&recipe));
    }
}
