// src/client/fetch.rs

use std::fmt;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;
use url::Url;

use crate::models::{
    generation::{GenerateParams, ModelTier},
    question_set::{QuestionSet, ShapeError},
};

#[derive(Debug)]
pub enum ClientError {
    /// The request never produced a response.
    Transport(String),
    /// Non-success status. `message` is the server's `error` field when
    /// readable, otherwise a message derived from the status.
    Api { status: u16, message: String },
    /// Success status, but the body is not JSON.
    InvalidBody(String),
    /// Body decoded but failed shape validation.
    Shape(ShapeError),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Transport(msg) => write!(f, "Network error: {}", msg),
            ClientError::Api { message, .. } => f.write_str(message),
            ClientError::InvalidBody(msg) => {
                write!(f, "Failed to parse response from backend: {}", msg)
            }
            ClientError::Shape(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<ShapeError> for ClientError {
    fn from(err: ShapeError) -> Self {
        ClientError::Shape(err)
    }
}

/// Anything the application shell can pull a question set from.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn fetch(&self, model: ModelTier) -> Result<QuestionSet, ClientError>;
}

/// Calls `POST /api/generate` and validates the result independently of
/// the gateway.
#[derive(Debug, Clone)]
pub struct QuestionClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl QuestionClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Issues one request. Never returns a partial result.
    pub async fn fetch_question_set(&self, model: ModelTier) -> Result<QuestionSet, ClientError> {
        tracing::debug!("Sending request to backend API ({})...", self.endpoint);

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .json(&GenerateParams { model })
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status();
        tracing::debug!("Received response from backend. Status: {}", status);

        if !status.is_success() {
            let fallback = format!("API request failed with status {}", status.as_u16());
            let message = match response.json::<Value>().await {
                Ok(body) => body
                    .get("error")
                    .and_then(Value::as_str)
                    .filter(|msg| !msg.is_empty())
                    .map(str::to_string)
                    .unwrap_or(fallback),
                Err(e) => {
                    tracing::warn!("Could not parse error response body as JSON: {}", e);
                    fallback
                }
            };
            tracing::error!("API Error - {}", message);
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidBody(e.to_string()))?;

        QuestionSet::from_json_value(body).map_err(|e| {
            tracing::error!("{}", e);
            ClientError::from(e)
        })
    }
}

#[async_trait]
impl QuestionSource for QuestionClient {
    async fn fetch(&self, model: ModelTier) -> Result<QuestionSet, ClientError> {
        self.fetch_question_set(model).await
    }
}
