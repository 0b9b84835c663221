use crate::error::Result;
use crate::model::Recipe;

/// The system role sent with every remix request.
pub const REMIX_SYSTEM_PROMPT: &str =
    "You are a creative chef AI that remixes recipes in fun, doable ways.";

const REMIX_INSTRUCTIONS: &str = "Give a short, fun, creative, and doable remix. Highlight any changed ingredients or instructions.";

/// Build the user message embedding the theme and the full recipe record.
pub fn build_remix_prompt(recipe: &Recipe, theme: &str) -> Result<String> {
    let recipe_json = serde_json::to_string_pretty(recipe)?;
    Ok(format!(
        "Remix this recipe with the theme: \"{theme}\".\n\nRecipe JSON:\n{recipe_json}\n\n{REMIX_INSTRUCTIONS}"
    ))
}
