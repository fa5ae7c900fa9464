//! HTTP client for a generateContent-style text-completion endpoint.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

use domains::{AppError, Result, TextAssist};

pub struct HttpAssistGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: SecretString,
}

impl HttpAssistGateway {
    pub fn new(endpoint: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key,
        }
    }
}

#[async_trait]
impl TextAssist for HttpAssistGateway {
    async fn complete(&self, instruction: &str, payload: &str) -> Result<String> {
        let body = json!({
            "contents": [{
                "parts": [{ "text": format!("{instruction}: {payload}") }]
            }]
        });

        let response = self
            .client
            .post(self.endpoint.as_str())
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|err| AppError::Backend(err.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Backend(format!(
                "assist endpoint returned {}",
                response.status()
            )));
        }

        let value: serde_json::Value = response
            .json()
            .await
            .map_err(|err| AppError::Backend(err.to_string()))?;
        let text = value
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(|part| part.as_str())
            .unwrap_or_default();
        Ok(text.to_string())
    }
}
