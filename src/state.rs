use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    client::QuestionClient,
    config::Config,
    provider::{ProviderConnector, gemini::GeminiConnector},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub connector: Arc<dyn ProviderConnector>,
    pub question_client: QuestionClient,
}

impl AppState {
    /// State wired to the real Gemini API.
    pub fn new(config: Config) -> Self {
        let connector = Arc::new(GeminiConnector::new(config.gemini_base_url.clone()));
        Self::with_connector(config, connector)
    }

    pub fn with_connector(config: Config, connector: Arc<dyn ProviderConnector>) -> Self {
        let question_client = QuestionClient::new(config.gateway_url.clone());
        Self {
            config,
            connector,
            question_client,
        }
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<dyn ProviderConnector> {
    fn from_ref(state: &AppState) -> Self {
        state.connector.clone()
    }
}

impl FromRef<AppState> for QuestionClient {
    fn from_ref(state: &AppState) -> Self {
        state.question_client.clone()
    }
}
