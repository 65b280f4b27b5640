//! Low-level Gemini `generateContent` client.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// One conversation entry as the API expects it: a role plus text parts.
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new("user", text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new("model", text)
    }

    fn new(role: &str, text: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Part {
    pub text: String,
}

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: serde_json::Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Client for the Gemini REST API.
///
/// Holds the credential it was built with; the base URL is injectable so
/// tests can point it at a local mock server.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Overrides the endpoint after construction. Tests point this at a
    /// mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The credential this client was built with.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// POST one `generateContent` request and extract the response text.
    pub(crate) async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<String, GatewayError> {
        let url = format!(
            "{}/{model}:generateContent?key={key}",
            self.base_url,
            key = self.api_key
        );

        let response = self.http.post(url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorWrapper>(&body)
                .ok()
                .and_then(|w| w.error)
                .and_then(|e| e.message)
                .unwrap_or(body);
            return Err(GatewayError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        extract_text(parsed)
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Result<String, GatewayError> {
    let text: String = response
        .candidates
        .into_iter()
        .flatten()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(GatewayError::InvalidResponse(
            "response contained no text candidates".into(),
        ));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_expected_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content::user("hello")],
            system_instruction: Some(Content::new("system", "be brief")),
            generation_config: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["system_instruction"]["parts"][0]["text"], "be brief");
        assert!(json.get("generation_config").is_none());
    }

    #[test]
    fn extract_text_joins_parts_of_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "Take a "}, {"text": "break."}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "Take a break.");
    }

    #[test]
    fn empty_candidates_are_an_invalid_response() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(matches!(
            extract_text(response),
            Err(GatewayError::InvalidResponse(_))
        ));
    }
}
