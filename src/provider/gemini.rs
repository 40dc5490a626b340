// src/provider/gemini.rs

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use super::{
    ContentProvider, GenerationRequest, HarmCategory, ProviderConnector, ProviderError,
    ProviderReply,
};
use crate::{models::generation::ModelTier, utils::text::preview};

const NORMAL_FINISH_REASON: &str = "STOP";
const BLOCK_NONE: &str = "BLOCK_NONE";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    safety_settings: Vec<SafetySetting>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    role: &'static str,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
}

impl<'a> GeminiRequest<'a> {
    fn from_request(request: &'a GenerationRequest) -> Self {
        Self {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiPart {
                    text: &request.prompt,
                }],
            }],
            safety_settings: request
                .unblocked_categories
                .iter()
                .map(|category| SafetySetting {
                    category: category_name(*category),
                    threshold: BLOCK_NONE,
                })
                .collect(),
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &request.response_schema,
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
    finish_reason: Option<String>,
    finish_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
    block_reason_message: Option<String>,
}

impl GeminiResponse {
    /// Joined text of the first candidate, if any.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        (!text.is_empty()).then_some(text)
    }

    fn into_reply(self) -> ProviderReply {
        if let Some(text) = self.text() {
            return ProviderReply::Text(text);
        }

        if let Some(feedback) = self.prompt_feedback {
            if let Some(reason) = feedback.block_reason {
                return ProviderReply::Blocked {
                    reason,
                    message: feedback.block_reason_message,
                };
            }
        }

        if let Some(candidate) = self.candidates.into_iter().next() {
            if let Some(reason) = candidate.finish_reason {
                if reason != NORMAL_FINISH_REASON {
                    return ProviderReply::AbnormalFinish {
                        reason,
                        message: candidate.finish_message,
                    };
                }
            }
        }

        ProviderReply::Empty
    }
}

fn category_name(category: HarmCategory) -> &'static str {
    match category {
        HarmCategory::Harassment => "HARM_CATEGORY_HARASSMENT",
        HarmCategory::HateSpeech => "HARM_CATEGORY_HATE_SPEECH",
        HarmCategory::SexuallyExplicit => "HARM_CATEGORY_SEXUALLY_EXPLICIT",
        HarmCategory::DangerousContent => "HARM_CATEGORY_DANGEROUS_CONTENT",
    }
}

/// Hands out Gemini clients that share one HTTP connection pool.
#[derive(Clone)]
pub struct GeminiConnector {
    http: reqwest::Client,
    base_url: Url,
}

impl GeminiConnector {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }
}

impl ProviderConnector for GeminiConnector {
    fn connect(&self, api_key: &str, model: ModelTier) -> Box<dyn ContentProvider> {
        Box::new(GeminiClient {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            api_key: api_key.to_string(),
            model,
        })
    }
}

/// Request-scoped client bound to one credential and model.
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    model: ModelTier,
}

impl GeminiClient {
    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent",
            self.base_url.as_str().trim_end_matches('/'),
            self.model.model_id()
        )
    }
}

#[async_trait]
impl ContentProvider for GeminiClient {
    async fn generate_content(
        &self,
        request: &GenerationRequest,
    ) -> Result<ProviderReply, ProviderError> {
        let body = GeminiRequest::from_request(request);

        // The key travels in a header so it can never show up in an error URL.
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status,
                body: preview(&text, 500),
            });
        }

        let json: GeminiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.without_url().to_string()))?;

        Ok(json.into_reply())
    }
}
