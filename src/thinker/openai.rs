use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::Thinker;
use crate::auth::Credential;
use crate::error::{EvalError, Result};

/// Zero temperature: the same expression should always give the same answer.
const TEMPERATURE: f32 = 0.0;

/// A thinker backed by the OpenAI Responses API.
pub struct OpenAiThinker {
    client: reqwest::Client,
    url: String,
    model: String,
}

impl OpenAiThinker {
    pub fn new(url: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url, model)
    }

    pub fn with_client(
        client: reqwest::Client,
        url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl Thinker for OpenAiThinker {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, credential: &Credential, prompt: &str) -> Result<String> {
        let body = ApiRequest {
            model: &self.model,
            input: prompt,
            temperature: TEMPERATURE,
        };

        debug!(url = %self.url, model = %self.model, "sending completion request");

        let resp = self
            .client
            .post(&self.url)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {}", credential.expose()))
            .json(&body)
            .send()
            .await
            .map_err(EvalError::CompletionUnreachable)?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %text, "completion endpoint error");
            return Err(EvalError::CompletionTransport {
                status: status.as_u16(),
                body: text,
            });
        }

        let text = resp
            .text()
            .await
            .map_err(EvalError::CompletionUnreachable)?;
        debug!(body = %text, "completion response");

        ResponseText::from_body(&text)?.into_text()
    }
}

/// Where the model's text was found in a completion response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseText {
    /// Top-level `output_text`.
    Aggregated(String),
    /// `output[0].content[0].text`.
    Structured(String),
    /// Neither location held any text.
    Missing,
}

impl ResponseText {
    /// Decode a success body and locate its text.
    ///
    /// `output_text` wins when it is non-empty; the structured location is
    /// only consulted otherwise.
    pub fn from_body(body: &str) -> Result<Self> {
        let resp: ApiResponse = serde_json::from_str(body)
            .map_err(|e| EvalError::CompletionSchema(format!("body is not a response ({e})")))?;

        if let Some(text) = resp.output_text.filter(|t| !t.is_empty()) {
            return Ok(ResponseText::Aggregated(text));
        }

        let nested = resp
            .output
            .and_then(|items| items.into_iter().next())
            .and_then(|item| item.content)
            .and_then(|blocks| blocks.into_iter().next())
            .and_then(|block| block.text)
            .filter(|t| !t.is_empty());

        Ok(match nested {
            Some(text) => ResponseText::Structured(text),
            None => ResponseText::Missing,
        })
    }

    pub fn into_text(self) -> Result<String> {
        match self {
            ResponseText::Aggregated(text) | ResponseText::Structured(text) => Ok(text),
            ResponseText::Missing => Err(EvalError::CompletionSchema(
                "no text in response".to_string(),
            )),
        }
    }
}

// --- API types ---

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    input: &'a str,
    temperature: f32,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Option<Vec<OutputItem>>,
}

#[derive(Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Option<Vec<ContentBlock>>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}
