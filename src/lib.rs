//! # recipe-remix
//!
//! A recipe viewer that shows random recipes from TheMealDB, keeps a list of
//! saved favorites in durable storage, and asks a chat completion service for
//! themed "remixes" of the current recipe.
//!
//! ## Quick Start
//!
//! ```no_run
//! use recipe_remix::{AppConfig, HtmlPageDisplay, Pipeline};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let display = HtmlPageDisplay::new(&config.output.page_path);
//! let mut pipeline = Pipeline::from_config(&config, display);
//! pipeline.start().await;
//! pipeline.remix("Make it spicy").await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod favorites;
pub mod fetcher;
pub mod ingredients;
pub mod model;
pub mod pipeline;
pub mod remix;
pub mod render;

pub use config::AppConfig;
pub use display::{Display, HtmlPageDisplay, MemoryDisplay, Region};
pub use error::{RecipeError, Result};
pub use favorites::{FavoritesStore, FavoritesView, FileStore, KeyValueStore, MemoryStore};
pub use fetcher::{MealDbClient, RecipeSource};
pub use ingredients::extract_ingredients;
pub use model::Recipe;
pub use pipeline::{Action, Pipeline, RecipeState, RemixState};
pub use remix::{ChatRemixer, Remixer, FALLBACK_REMIX_TEXT};

/// Fetch one random recipe using configuration from file and environment
///
/// # Example
/// ```no_run
/// # async fn example() -> Result<(), recipe_remix::RecipeError> {
/// let recipe = recipe_remix::random_recipe().await?;
/// for line in recipe_remix::extract_ingredients(&recipe) {
///     println!("{line}");
/// }
/// # Ok(())
/// # }
/// ```
pub async fn random_recipe() -> Result<Recipe> {
    let config = AppConfig::load()?;
    MealDbClient::new(&config.recipes).fetch_random().await
}

/// Fetch a recipe by exact name using configuration from file and environment
///
/// # Example
/// ```no_run
/// # async fn example() -> Result<(), recipe_remix::RecipeError> {
/// match recipe_remix::recipe_by_name("Spicy Arrabiata Penne").await {
///     Ok(recipe) => println!("{}", recipe.name),
///     Err(e) if e.is_not_found() => println!("No such recipe"),
///     Err(e) => return Err(e),
/// }
/// # Ok(())
/// # }
/// ```
pub async fn recipe_by_name(name: &str) -> Result<Recipe> {
    let config = AppConfig::load()?;
    MealDbClient::new(&config.recipes).fetch_by_name(name).await
}

/// Remix a recipe around `theme` using configuration from file and environment
///
/// # Example
/// ```no_run
/// # async fn example() -> Result<(), recipe_remix::RecipeError> {
/// let recipe = recipe_remix::random_recipe().await?;
/// let remix = recipe_remix::remix_recipe(&recipe, "Make it spicy").await?;
/// println!("{remix}");
/// # Ok(())
/// # }
/// ```
pub async fn remix_recipe(recipe: &Recipe, theme: &str) -> Result<String> {
    let config = AppConfig::load()?;
    ChatRemixer::new(&config.remix).remix(recipe, theme).await
}
