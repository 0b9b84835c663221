use crate::config::RemixConfig;
use crate::error::Result;
use crate::model::Recipe;
use crate::remix::{build_remix_prompt, Remixer, FALLBACK_REMIX_TEXT, REMIX_SYSTEM_PROMPT};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde_json::{json, Value};

/// Remixer backed by an OpenAI-compatible chat completion endpoint
pub struct ChatRemixer {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
}

impl ChatRemixer {
    /// Create a remixer from configuration
    pub fn new(config: &RemixConfig) -> Self {
        // Only an explicitly configured key is sent; the default endpoint is a proxy
        ChatRemixer {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        }
    }

    #[doc(hidden)]
    pub fn with_endpoint(endpoint: String, model: String) -> Self {
        ChatRemixer {
            client: Client::new(),
            endpoint,
            api_key: None,
            model,
            max_tokens: 500,
        }
    }
}

/// Text of the first generated message, or the fallback when the shape differs
fn extract_content(body: &Value) -> String {
    match body["choices"][0]["message"]["content"].as_str() {
        Some(content) => content.to_string(),
        None => {
            warn!("Remix response has no message content, using fallback text");
            FALLBACK_REMIX_TEXT.to_string()
        }
    }
}

#[async_trait]
impl Remixer for ChatRemixer {
    async fn remix(&self, recipe: &Recipe, theme: &str) -> Result<String> {
        let prompt = build_remix_prompt(recipe, theme)?;

        let mut request = self.client.post(&self.endpoint).json(&json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": REMIX_SYSTEM_PROMPT},
                {"role": "user", "content": prompt}
            ],
            "max_tokens": self.max_tokens
        }));
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            warn!("Remix endpoint answered with status {}", response.status());
        }

        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);

        Ok(extract_content(&response_body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn recipe() -> Recipe {
        let mut recipe = Recipe::new("Fish pie");
        recipe.instructions = Some("Bake it.".to_string());
        recipe
    }

    #[tokio::test]
    async fn test_remix() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(Matcher::AllOf(vec![
                Matcher::PartialJson(json!({"model": "gpt-4.1", "max_tokens": 500})),
                Matcher::Regex("creative chef AI".into()),
                Matcher::Regex("Make it spicy".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "choices": [{
                        "message": {
                            "content": "**Spicy Fish Pie**\n\nAdd chili flakes."
                        }
                    }]
                }"#,
            )
            .create_async()
            .await;

        let remixer = ChatRemixer::with_endpoint(format!("{}/", server.url()), "gpt-4.1".into());
        let result = remixer.remix(&recipe(), "Make it spicy").await.unwrap();

        assert_eq!(result, "**Spicy Fish Pie**\n\nAdd chili flakes.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_remix_without_choices_returns_fallback() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Invalid request"}"#)
            .create_async()
            .await;

        let remixer = ChatRemixer::with_endpoint(format!("{}/", server.url()), "gpt-4.1".into());
        let result = remixer.remix(&recipe(), "Vegan version").await.unwrap();

        assert_eq!(result, FALLBACK_REMIX_TEXT);
    }

    #[tokio::test]
    async fn test_remix_non_json_envelope_is_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(502)
            .with_body("Bad gateway")
            .create_async()
            .await;

        let remixer = ChatRemixer::with_endpoint(format!("{}/", server.url()), "gpt-4.1".into());
        assert!(remixer.remix(&recipe(), "Kid-friendly").await.is_err());
    }

    #[tokio::test]
    async fn test_remix_sends_bearer_token_when_configured() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .match_header("authorization", "Bearer secret")
            .with_status(200)
            .with_body(r#"{"choices": [{"message": {"content": "ok"}}]}"#)
            .create_async()
            .await;

        let config = RemixConfig {
            endpoint: format!("{}/v1/chat/completions", server.url()),
            api_key: Some("secret".to_string()),
            ..RemixConfig::default()
        };
        let remixer = ChatRemixer::new(&config);

        assert_eq!(remixer.remix(&recipe(), "Budget-friendly").await.unwrap(), "ok");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_remix_ignores_openai_api_key_env() {
        std::env::set_var("OPENAI_API_KEY", "sk-user-secret");

        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"choices": [{"message": {"content": "ok"}}]}"#)
            .create_async()
            .await;

        let config = RemixConfig {
            endpoint: format!("{}/", server.url()),
            ..RemixConfig::default()
        };
        let remixer = ChatRemixer::new(&config);

        assert_eq!(remixer.remix(&recipe(), "Fancy dinner party").await.unwrap(), "ok");
        mock.assert_async().await;
    }

    #[test]
    fn test_extract_content_non_string() {
        let body = json!({"choices": [{"message": {"content": null}}]});
        assert_eq!(extract_content(&body), FALLBACK_REMIX_TEXT);
    }
}
