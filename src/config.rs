use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Remote recipe source
    #[serde(default)]
    pub recipes: RecipesConfig,
    /// Remote remix (text generation) source
    #[serde(default)]
    pub remix: RemixConfig,
    /// Durable key-value storage for favorites
    #[serde(default)]
    pub storage: StorageConfig,
    /// Where the rendered page is written
    #[serde(default)]
    pub output: OutputConfig,
}

/// Configuration for the recipe API
#[derive(Debug, Deserialize, Clone)]
pub struct RecipesConfig {
    /// Base URL of the API, without trailing slash
    #[serde(default = "default_recipes_base_url")]
    pub base_url: String,
    /// Path of the random recipe endpoint
    #[serde(default = "default_random_path")]
    pub random_path: String,
    /// Path of the search-by-name endpoint
    #[serde(default = "default_search_path")]
    pub search_path: String,
}

impl Default for RecipesConfig {
    fn default() -> Self {
        Self {
            base_url: default_recipes_base_url(),
            random_path: default_random_path(),
            search_path: default_search_path(),
        }
    }
}

/// Configuration for the remix endpoint
#[derive(Debug, Deserialize, Clone)]
pub struct RemixConfig {
    /// Full URL of the chat completion endpoint
    #[serde(default = "default_remix_endpoint")]
    pub endpoint: String,
    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Bearer token, sent only when set (RECIPE_REMIX__REMIX__API_KEY)
    pub api_key: Option<String>,
    /// Theme options offered to the user
    #[serde(default = "default_themes")]
    pub themes: Vec<String>,
    /// Convert remix markdown to HTML; plain-text line breaks otherwise
    #[serde(default = "default_render_markdown")]
    pub render_markdown: bool,
}

impl Default for RemixConfig {
    fn default() -> Self {
        Self {
            endpoint: default_remix_endpoint(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            api_key: None,
            themes: default_themes(),
            render_markdown: default_render_markdown(),
        }
    }
}

/// Configuration for favorites persistence
#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// JSON file holding every stored key
    #[serde(default = "default_storage_path")]
    pub path: String,
    /// Key of the favorites slot
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            key: default_storage_key(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_page_path")]
    pub page_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            page_path: default_page_path(),
        }
    }
}

// Default value functions
fn default_recipes_base_url() -> String {
    "https://www.themealdb.com/api/json/v1/1".to_string()
}

fn default_random_path() -> String {
    "/random.php".to_string()
}

fn default_search_path() -> String {
    "/search.php".to_string()
}

fn default_remix_endpoint() -> String {
    "https://openai.jtgibson.workers.dev/".to_string()
}

fn default_model() -> String {
    "gpt-4.1".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_themes() -> Vec<String> {
    vec![
        "Make it spicy".to_string(),
        "Vegan version".to_string(),
        "Kid-friendly".to_string(),
        "Fancy dinner party".to_string(),
        "Budget-friendly".to_string(),
    ]
}

fn default_render_markdown() -> bool {
    true
}

fn default_storage_path() -> String {
    "recipe-remix-storage.json".to_string()
}

fn default_storage_key() -> String {
    "savedRecipes".to_string()
}

fn default_page_path() -> String {
    "recipe-remix.html".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_REMIX__ prefix
    /// 2. recipe-remix.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_REMIX__REMIX__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the precedence rules.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-remix").required(false))
        // Use double underscore for nested: RECIPE_REMIX__REMIX__MODEL
        .add_source(
            Environment::with_prefix("RECIPE_REMIX")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_model(), "gpt-4.1");
        assert_eq!(default_max_tokens(), 500);
        assert_eq!(default_storage_key(), "savedRecipes");
        assert!(default_render_markdown());
    }

    #[test]
    fn test_app_config_default_structure() {
        let config = AppConfig::default();
        assert_eq!(
            config.recipes.base_url,
            "https://www.themealdb.com/api/json/v1/1"
        );
        assert_eq!(config.recipes.random_path, "/random.php");
        assert_eq!(config.recipes.search_path, "/search.php");
        assert!(config.remix.api_key.is_none());
        assert_eq!(config.remix.themes.len(), 5);
        assert_eq!(config.output.page_path, "recipe-remix.html");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let settings = Config::builder()
            .add_source(File::from_str(
                "[remix]\nmodel = \"gpt-4o-mini\"\nthemes = [\"Breakfast\"]\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: AppConfig = settings.try_deserialize().unwrap();

        assert_eq!(config.remix.model, "gpt-4o-mini");
        assert_eq!(config.remix.themes, vec!["Breakfast".to_string()]);
        assert_eq!(config.remix.max_tokens, 500);
        assert_eq!(config.storage.path, "recipe-remix-storage.json");
    }

    #[test]
    fn test_load_config_without_file() {
        let config = load_config().unwrap();
        assert!(!config.recipes.base_url.is_empty());
        assert!(!config.storage.key.is_empty());
    }
}
