mod chat;
mod prompt;

pub use chat::ChatRemixer;
pub use prompt::{build_remix_prompt, REMIX_SYSTEM_PROMPT};

use crate::error::Result;
use crate::model::Recipe;
use async_trait::async_trait;

/// Returned when the generation service answers without any text
pub const FALLBACK_REMIX_TEXT: &str = "Sorry, I couldn't remix the recipe this time.";

/// Remote text generation service that rewrites a recipe around a theme
#[async_trait]
pub trait Remixer: Send + Sync {
    /// Generated remix text, possibly markdown
    async fn remix(&self, recipe: &Recipe, theme: &str) -> Result<String>;
}
