//! HTTP client for the EduGen generation service.

use anyhow::{Context, Result};
use std::time::Duration;

use crate::files::Attachment;
use crate::models::{ChatRequest, ChatResponse, Message};

/// Shown to the user when the generation service fails; the user's own
/// outgoing message is preserved regardless.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Errors from a generation call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("service returned {status}: {body}")]
    Service {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Client for the chat endpoint of the generation service.
pub struct GenerationClient {
    client: reqwest::Client,
    base_url: String,
}

impl GenerationClient {
    /// Build a client for `base_url` (e.g. `http://localhost:8000/api/v1`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Send the full message history plus any staged attachments and return
    /// the assistant reply text.
    pub async fn send(
        &self,
        messages: &[Message],
        attachments: &[Attachment],
    ) -> Result<String, ApiError> {
        let request = ChatRequest {
            messages: messages.to_vec(),
            files_data: (!attachments.is_empty())
                .then(|| attachments.iter().map(|a| a.data.clone()).collect()),
            file_types: (!attachments.is_empty())
                .then(|| attachments.iter().map(|a| a.media_type.clone()).collect()),
        };

        let response = self
            .client
            .post(format!("{}/chat", self.base_url))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error body".to_string());
            return Err(ApiError::Service { status, body });
        }

        let reply: ChatResponse = response.json().await?;
        Ok(reply.response)
    }
}
