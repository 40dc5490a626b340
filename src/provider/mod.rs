// src/provider/mod.rs

//! Seam between the gateway and the hosted model. The gateway only sees
//! `ContentProvider`; each request gets its own client from a
//! `ProviderConnector`, so tests can swap in a fake.

pub mod gemini;

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::models::{
    generation::ModelTier,
    schema::{GENERATION_PROMPT, QUESTION_SCHEMA},
};

/// Hazard categories whose filter threshold is overridden on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarmCategory {
    Harassment,
    HateSpeech,
    SexuallyExplicit,
    DangerousContent,
}

impl HarmCategory {
    pub const ALL: [HarmCategory; 4] = [
        HarmCategory::Harassment,
        HarmCategory::HateSpeech,
        HarmCategory::SexuallyExplicit,
        HarmCategory::DangerousContent,
    ];
}

/// What the gateway asks the provider for.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Output must be JSON matching this descriptor.
    pub response_schema: Value,
    /// Categories with safety blocking disabled.
    pub unblocked_categories: Vec<HarmCategory>,
}

impl GenerationRequest {
    /// The fixed question-set request. Nothing in it comes from the caller.
    pub fn question_set() -> Self {
        Self {
            prompt: GENERATION_PROMPT.clone(),
            response_schema: QUESTION_SCHEMA.clone(),
            unblocked_categories: HarmCategory::ALL.to_vec(),
        }
    }
}

/// A provider reply, reduced to the cases the gateway distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderReply {
    /// Safety filter rejected the prompt or output.
    Blocked {
        reason: String,
        message: Option<String>,
    },
    /// Generation stopped for a reason other than a normal stop.
    AbnormalFinish {
        reason: String,
        message: Option<String>,
    },
    Empty,
    Text(String),
}

#[derive(Debug)]
pub enum ProviderError {
    Transport(String),
    Status { status: u16, body: String },
    Decode(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Transport(msg) => write!(f, "Request to model provider failed: {}", msg),
            ProviderError::Status { status, body } => {
                write!(f, "Model provider returned status {}: {}", status, body)
            }
            ProviderError::Decode(msg) => {
                write!(f, "Failed to decode model provider response: {}", msg)
            }
        }
    }
}

impl std::error::Error for ProviderError {}

#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// One generate-content call. No retries.
    async fn generate_content(
        &self,
        request: &GenerationRequest,
    ) -> Result<ProviderReply, ProviderError>;
}

/// Builds a request-scoped provider client for a credential and model tier.
pub trait ProviderConnector: Send + Sync {
    fn connect(&self, api_key: &str, model: ModelTier) -> Box<dyn ContentProvider>;
}
