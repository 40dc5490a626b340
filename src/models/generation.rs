// src/models/generation.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The two model tiers offered to callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ModelTier {
    /// Fast tier, used when the caller does not choose.
    #[default]
    #[serde(rename = "gemini-1.5-flash")]
    Flash,
    /// High-quality tier.
    #[serde(rename = "gemini-1.5-pro")]
    Pro,
}

impl ModelTier {
    pub const ALL: [ModelTier; 2] = [ModelTier::Flash, ModelTier::Pro];

    /// Provider-side model identifier.
    pub fn model_id(self) -> &'static str {
        match self {
            ModelTier::Flash => "gemini-1.5-flash",
            ModelTier::Pro => "gemini-1.5-pro",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ModelTier::Flash => "Gemini 1.5 Flash (fast)",
            ModelTier::Pro => "Gemini 1.5 Pro (high quality)",
        }
    }
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.model_id())
    }
}

impl FromStr for ModelTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModelTier::ALL
            .into_iter()
            .find(|tier| tier.model_id() == s.trim())
            .ok_or_else(|| format!("Unsupported model: {}", s))
    }
}

/// Optional JSON body accepted by `POST /api/generate`.
///
/// Any other field is ignored; the prompt is fixed server-side.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct GenerateParams {
    #[serde(default)]
    pub model: ModelTier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_default_to_flash() {
        let params: GenerateParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.model, ModelTier::Flash);
    }

    #[test]
    fn params_accept_pro_and_ignore_extra_fields() {
        let params: GenerateParams =
            serde_json::from_str(r#"{"model":"gemini-1.5-pro","prompt":"ignored"}"#).unwrap();
        assert_eq!(params.model, ModelTier::Pro);
    }

    #[test]
    fn unknown_model_is_rejected() {
        assert!(serde_json::from_str::<GenerateParams>(r#"{"model":"gpt-4"}"#).is_err());
        assert!("gpt-4".parse::<ModelTier>().is_err());
        assert_eq!("gemini-1.5-pro".parse::<ModelTier>(), Ok(ModelTier::Pro));
    }
}
