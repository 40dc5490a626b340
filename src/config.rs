// src/config.rs

use std::{env, fmt};

use dotenvy::dotenv;
use url::Url;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Clone)]
pub struct Config {
    /// Provider credential. Optional at startup: requests fail with 500 without it.
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: Url,
    pub port: u16,
    /// Endpoint the browser page's fetch client calls.
    pub gateway_url: Url,
    pub allowed_origins: Vec<String>,
    pub rust_log: String,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let gemini_api_key = env::var("GEMINI_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let gemini_base_url = env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string())
            .parse()
            .expect("GEMINI_BASE_URL must be a valid URL");

        let port = env::var("PORT")
            .map(|p| p.parse().expect("PORT must be a number"))
            .unwrap_or(DEFAULT_PORT);

        let gateway_url = env::var("GATEWAY_URL")
            .unwrap_or_else(|_| format!("http://127.0.0.1:{}/api/generate", port))
            .parse()
            .expect("GATEWAY_URL must be a valid URL");

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|origins| parse_origins(&origins))
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://127.0.0.1:3000".to_string(),
                ]
            });

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        Self {
            gemini_api_key,
            gemini_base_url,
            port,
            gateway_url,
            allowed_origins,
            rust_log,
            log_dir,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

// The credential must never reach logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("gemini_base_url", &self.gemini_base_url.as_str())
            .field("port", &self.port)
            .field("gateway_url", &self.gateway_url.as_str())
            .field("allowed_origins", &self.allowed_origins)
            .field("rust_log", &self.rust_log)
            .field("log_dir", &self.log_dir)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_split_and_trimmed() {
        let origins = parse_origins(" http://a.test ,http://b.test,, ");
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = Config {
            gemini_api_key: Some("super-secret".to_string()),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.parse().unwrap(),
            port: DEFAULT_PORT,
            gateway_url: "http://127.0.0.1:3000/api/generate".parse().unwrap(),
            allowed_origins: vec![],
            rust_log: "info".to_string(),
            log_dir: "logs".to_string(),
        };

        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
