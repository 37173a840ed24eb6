use crate::config::Config;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Text-generation provider used by the problem and feedback generators.
///
/// One instance is built at startup and shared by every request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Sends a single-turn prompt and returns the raw text the provider produced.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(client: Client, api_key: Option<String>, model: String, endpoint: String) -> Self {
        Self {
            client,
            api_key,
            model,
            endpoint,
        }
    }

    pub fn from_config(config: &Config, client: Client) -> Self {
        Self::new(
            client,
            config.google_api_key.clone(),
            config.gemini_model.clone(),
            config.gemini_endpoint.clone(),
        )
    }

    fn build_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

fn response_text(body: GenerateContentResponse) -> Result<String> {
    if let Some(err) = body.error {
        return Err(Error::ProviderCall(format!("Gemini API error: {}", err.message)));
    }

    let text: String = body
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(Error::ProviderCall("Gemini returned no text".to_string()));
    }
    Ok(text)
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Config("GOOGLE_API_KEY is not configured".to_string()))?;

        let payload = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };

        tracing::debug!(model = %self.model, "Sending request to Gemini");
        let res = self
            .client
            .post(self.build_url())
            .header("x-goog-api-key", api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Error::ProviderCall(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(Error::ProviderCall(format!("Gemini API Error {}: {}", status, text)));
        }

        let body: GenerateContentResponse = res
            .json()
            .await
            .map_err(|e| Error::ProviderCall(format!("Unreadable Gemini response: {}", e)))?;

        response_text(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(api_key: Option<&str>) -> GeminiClient {
        GeminiClient::new(
            Client::new(),
            api_key.map(str::to_string),
            "gemini-2.5-flash-lite".to_string(),
            // Nothing listens here; reaching it would surface as ProviderCall.
            "http://127.0.0.1:9/v1beta/".to_string(),
        )
    }

    #[test]
    fn url_targets_generate_content_for_the_model() {
        let url = client(Some("k")).build_url();
        assert_eq!(
            url,
            "http://127.0.0.1:9/v1beta/models/gemini-2.5-flash-lite:generateContent"
        );
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let err = client(None).generate("hello").await.unwrap_err();
        assert!(matches!(err, Error::Config(_)), "got {err:?}");
    }

    #[test]
    fn joins_text_parts_of_first_candidate() {
        let body: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "Here you go: "}, {"text": "{\"a\":1}"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }))
        .unwrap();
        assert_eq!(response_text(body).unwrap(), "Here you go: {\"a\":1}");
    }

    #[test]
    fn empty_or_error_bodies_are_provider_failures() {
        let blocked: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": [{"finishReason": "SAFETY"}]})).unwrap();
        assert!(matches!(response_text(blocked), Err(Error::ProviderCall(_))));

        let failed: GenerateContentResponse =
            serde_json::from_value(json!({"error": {"code": 400, "message": "bad key"}})).unwrap();
        assert!(matches!(response_text(failed), Err(Error::ProviderCall(msg)) if msg.contains("bad key")));
    }
}
