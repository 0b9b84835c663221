use crate::config::RecipesConfig;
use crate::error::{RecipeError, Result};
use crate::model::{MealsResponse, Recipe};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;

/// Remote source of recipe records
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// One randomly selected recipe
    async fn fetch_random(&self) -> Result<Recipe>;

    /// First recipe whose name matches `name`
    async fn fetch_by_name(&self, name: &str) -> Result<Recipe>;
}

/// Client for TheMealDB-compatible recipe APIs.
///
/// One attempt per call: no retry and no client-side timeout.
pub struct MealDbClient {
    client: Client,
    base_url: String,
    random_path: String,
    search_path: String,
}

impl MealDbClient {
    pub fn new(config: &RecipesConfig) -> Self {
        MealDbClient {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            random_path: config.random_path.clone(),
            search_path: config.search_path.clone(),
        }
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        Self::new(&RecipesConfig {
            base_url,
            ..RecipesConfig::default()
        })
    }

    async fn get_meals(&self, request: reqwest::RequestBuilder) -> Result<MealsResponse> {
        let response = request.send().await?.error_for_status()?;
        let meals: MealsResponse = response.json().await?;
        debug!(
            "Recipe API returned {} meal(s)",
            meals.meals.as_ref().map_or(0, Vec::len)
        );
        Ok(meals)
    }
}

#[async_trait]
impl RecipeSource for MealDbClient {
    async fn fetch_random(&self) -> Result<Recipe> {
        let url = format!("{}{}", self.base_url, self.random_path);
        debug!("Fetching random recipe from {}", url);

        self.get_meals(self.client.get(&url))
            .await?
            .into_first()
            .ok_or_else(|| RecipeError::MalformedResponse("no meals in random response".into()))
    }

    async fn fetch_by_name(&self, name: &str) -> Result<Recipe> {
        let url = format!("{}{}", self.base_url, self.search_path);
        debug!("Searching recipe '{}' at {}", name, url);

        self.get_meals(self.client.get(&url).query(&[("s", name)]))
            .await?
            .into_first()
            .ok_or_else(|| RecipeError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    const MEALS_BODY: &str = r#"{
        "meals": [
            {"strMeal": "Corba", "strMealThumb": "https://example.com/corba.jpg", "strInstructions": "Boil."},
            {"strMeal": "Second", "strInstructions": "Ignored."}
        ]
    }"#;

    #[tokio::test]
    async fn test_fetch_random_takes_first_meal() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/random.php")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(MEALS_BODY)
            .create_async()
            .await;

        let client = MealDbClient::with_base_url(server.url());
        let recipe = client.fetch_random().await.unwrap();

        assert_eq!(recipe.name, "Corba");
        assert_eq!(recipe.instructions.as_deref(), Some("Boil."));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_random_null_meals_is_malformed() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/random.php")
            .with_status(200)
            .with_body(r#"{"meals": null}"#)
            .create_async()
            .await;

        let client = MealDbClient::with_base_url(server.url());
        let result = client.fetch_random().await;

        assert!(matches!(result, Err(RecipeError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_fetch_by_name_escapes_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/search.php")
            .match_query(Matcher::UrlEncoded("s".into(), "Chicken & Rice".into()))
            .with_status(200)
            .with_body(MEALS_BODY)
            .create_async()
            .await;

        let client = MealDbClient::with_base_url(server.url());
        let recipe = client.fetch_by_name("Chicken & Rice").await.unwrap();

        assert_eq!(recipe.name, "Corba");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_by_name_not_found() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/search.php")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"meals": null}"#)
            .create_async()
            .await;

        let client = MealDbClient::with_base_url(server.url());
        let err = client.fetch_by_name("Nonexistent").await.unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_invalid_json_is_transport_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/search.php")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>oops</html>")
            .create_async()
            .await;

        let client = MealDbClient::with_base_url(server.url());
        let err = client.fetch_by_name("Corba").await.unwrap_err();

        assert!(matches!(err, RecipeError::Transport(_)));
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/random.php")
            .with_status(503)
            .create_async()
            .await;

        let client = MealDbClient::with_base_url(server.url());
        assert!(matches!(
            client.fetch_random().await,
            Err(RecipeError::Transport(_))
        ));
    }
}
