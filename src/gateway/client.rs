use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::sse::fragment_stream;
use super::{FragmentStream, ModelGateway};
use crate::transcript::{Role, Turn};

// Use Cow to avoid cloning strings that are only borrowed for serialization
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: Cow<'a, str>,
}

impl<'a> WireMessage<'a> {
    fn from_turn(turn: &'a Turn) -> Self {
        let role = match turn.role {
            Role::Human => "user",
            Role::Assistant => "assistant",
        };
        Self {
            role,
            content: Cow::Borrowed(&turn.text),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

/// Chat-completions client for OpenAI-compatible endpoints.
pub struct ChatClient {
    http: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl ChatClient {
    /// Builds the underlying HTTP client. Fails if the TLS backend cannot
    /// be initialized, which is fatal at startup.
    pub fn new(endpoint: String, model: String, api_key: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to initialize HTTP client")?;
        Ok(Self {
            http,
            endpoint,
            model,
            api_key,
        })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.endpoint.trim_end_matches('/')
        )
    }

    async fn post_completions(
        &self,
        turns: &[Turn],
        stream: bool,
    ) -> Result<reqwest::Response> {
        let url = self.completions_url();

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: turns.iter().map(WireMessage::from_turn).collect(),
            stream,
        };

        let mut http_request = self.http.post(&url).json(&request);

        if let Some(api_key) = &self.api_key {
            http_request = http_request.header("Authorization", format!("Bearer {api_key}"));
        }

        let response = http_request
            .send()
            .await
            .with_context(|| format!("Failed to connect to API endpoint: {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API request failed with status {status}: {body}");
        }

        Ok(response)
    }
}

#[async_trait]
impl ModelGateway for ChatClient {
    async fn invoke(&self, turns: &[Turn]) -> Result<Turn> {
        let response = self.post_completions(turns, false).await?;

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .context("Failed to parse chat completion response")?;

        // A missing or null content field is a degenerate response, not an
        // error; the response engine decides what to do with blank text.
        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        Ok(Turn::assistant(text))
    }

    async fn stream(&self, turns: &[Turn]) -> Result<FragmentStream> {
        let response = self.post_completions(turns, true).await?;
        Ok(Box::pin(fragment_stream(response.bytes_stream())))
    }
}
