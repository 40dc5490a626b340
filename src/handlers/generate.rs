// src/handlers/generate.rs

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use serde::de::IgnoredAny;
use serde_json::Value;

use crate::{
    config::Config,
    error::{AppError, ErrorBody},
    models::{
        generation::{GenerateParams, ModelTier},
        question_set::QuestionSet,
    },
    provider::{ContentProvider, GenerationRequest, ProviderConnector, ProviderReply},
    utils::text::preview,
};

/// Generates one question set.
///
/// * Fails with 500 when no provider credential is configured.
/// * Calls the provider once with the fixed prompt and schema.
/// * Returns the provider's JSON text verbatim once it parses.
#[utoipa::path(
    post,
    path = "/api/generate",
    request_body(
        content = GenerateParams,
        description = "Optional. An empty body selects the fast model.",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Generated question set", body = QuestionSet),
        (status = 400, description = "Unknown model id", body = ErrorBody),
        (status = 500, description = "Configuration or unexpected server error", body = ErrorBody),
        (status = 502, description = "Provider blocked, aborted or returned invalid output", body = ErrorBody)
    )
)]
pub async fn generate(
    State(config): State<Config>,
    State(connector): State<Arc<dyn ProviderConnector>>,
    body: Bytes,
) -> Result<Response, AppError> {
    let api_key = config
        .gemini_api_key
        .as_deref()
        .ok_or(AppError::MissingApiKey)?;

    let params = parse_params(&body)?;

    let provider = connector.connect(api_key, params.model);
    let json_text = run_generation(provider.as_ref(), params.model).await?;

    Ok(([(header::CONTENT_TYPE, "application/json")], json_text).into_response())
}

/// Reads the optional model selection.
///
/// Only a string `model` naming an unsupported id is rejected. Any other
/// content is ignored and the default model is used.
fn parse_params(body: &[u8]) -> Result<GenerateParams, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(GenerateParams::default());
    }

    let value: Value = match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Ignoring request body that is not JSON: {}", e);
            return Ok(GenerateParams::default());
        }
    };

    match value.get("model") {
        Some(Value::String(id)) => {
            let model = id.parse::<ModelTier>().map_err(AppError::BadRequest)?;
            Ok(GenerateParams { model })
        }
        None | Some(Value::Null) => Ok(GenerateParams::default()),
        Some(other) => {
            tracing::warn!("Ignoring non-string model selection: {}", other);
            Ok(GenerateParams::default())
        }
    }
}

/// Runs a single generation and checks the reply is parseable JSON.
///
/// The text is not reshaped; clients do their own shape validation.
pub async fn run_generation(
    provider: &dyn ContentProvider,
    model: ModelTier,
) -> Result<String, AppError> {
    tracing::info!("Sending request to Gemini API (model: {})...", model);
    let reply = provider
        .generate_content(&GenerationRequest::question_set())
        .await?;
    tracing::info!("Received response from Gemini API.");

    let json_text = match reply {
        ProviderReply::Text(text) => text,
        ProviderReply::Blocked { reason, message } => {
            return Err(AppError::UpstreamBlocked { reason, message });
        }
        ProviderReply::AbnormalFinish { reason, message } => {
            return Err(AppError::UpstreamAbnormalFinish { reason, message });
        }
        ProviderReply::Empty => return Err(AppError::UpstreamEmpty),
    };

    tracing::info!("Raw JSON text from Gemini: {}", preview(&json_text, 100));

    if let Err(e) = serde_json::from_str::<IgnoredAny>(&json_text) {
        return Err(AppError::UpstreamInvalidJson {
            error: e.to_string(),
            raw: json_text,
        });
    }

    tracing::info!("Returning successful response to client.");
    Ok(json_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderError;
    use async_trait::async_trait;

    struct Canned(ProviderReply);

    #[async_trait]
    impl ContentProvider for Canned {
        async fn generate_content(
            &self,
            _request: &GenerationRequest,
        ) -> Result<ProviderReply, ProviderError> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    #[async_trait]
    impl ContentProvider for Failing {
        async fn generate_content(
            &self,
            _request: &GenerationRequest,
        ) -> Result<ProviderReply, ProviderError> {
            Err(ProviderError::Transport("connection reset".to_string()))
        }
    }

    #[tokio::test]
    async fn valid_text_passes_through_verbatim() {
        let text = "{ \"Theme\" : \"Silk Road\" }".to_string();
        let out = run_generation(&Canned(ProviderReply::Text(text.clone())), ModelTier::Flash)
            .await
            .unwrap();
        assert_eq!(out, text);
    }

    #[tokio::test]
    async fn each_reply_kind_maps_to_its_error() {
        let blocked = ProviderReply::Blocked {
            reason: "SAFETY".to_string(),
            message: None,
        };
        assert!(matches!(
            run_generation(&Canned(blocked), ModelTier::Flash).await,
            Err(AppError::UpstreamBlocked { .. })
        ));

        let aborted = ProviderReply::AbnormalFinish {
            reason: "MAX_TOKENS".to_string(),
            message: None,
        };
        assert!(matches!(
            run_generation(&Canned(aborted), ModelTier::Pro).await,
            Err(AppError::UpstreamAbnormalFinish { .. })
        ));

        assert!(matches!(
            run_generation(&Canned(ProviderReply::Empty), ModelTier::Flash).await,
            Err(AppError::UpstreamEmpty)
        ));

        let garbage = ProviderReply::Text("not json".to_string());
        assert!(matches!(
            run_generation(&Canned(garbage), ModelTier::Flash).await,
            Err(AppError::UpstreamInvalidJson { .. })
        ));
    }

    #[tokio::test]
    async fn provider_failure_becomes_internal_error() {
        let err = run_generation(&Failing, ModelTier::Flash).await.unwrap_err();
        match err {
            AppError::InternalServerError(msg) => assert!(msg.contains("connection reset")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn blank_body_selects_default_model() {
        assert_eq!(parse_params(b"").unwrap().model, ModelTier::Flash);
        assert_eq!(parse_params(b"  \n").unwrap().model, ModelTier::Flash);
        assert_eq!(
            parse_params(b"{\"model\":\"gemini-1.5-pro\"}").unwrap().model,
            ModelTier::Pro
        );
    }

    #[test]
    fn unusable_bodies_fall_back_to_default_model() {
        for body in [
            "hello",
            "null",
            "[]",
            r#"{"model":null}"#,
            r#"{"model":7}"#,
            r#"{"prompt":"x"}"#,
        ] {
            assert_eq!(parse_params(body.as_bytes()).unwrap().model, ModelTier::Flash);
        }
    }

    #[test]
    fn only_unknown_model_id_is_rejected() {
        match parse_params(b"{\"model\":\"unknown\"}") {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Unsupported model: unknown"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
