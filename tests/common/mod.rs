// tests/common/mod.rs

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use history_quiz::{
    config::Config,
    models::generation::ModelTier,
    provider::{
        ContentProvider, GenerationRequest, ProviderConnector, ProviderError, ProviderReply,
    },
    routes,
    state::AppState,
};

/// What the fake provider answers with.
#[derive(Clone)]
pub enum Scripted {
    Reply(ProviderReply),
    Fail(String),
}

/// One provider call as seen by the fake.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub api_key: String,
    pub model: ModelTier,
    pub request: GenerationRequest,
}

#[derive(Clone)]
pub struct FakeConnector {
    script: Scripted,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

struct FakeProvider {
    script: Scripted,
    api_key: String,
    model: ModelTier,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl ProviderConnector for FakeConnector {
    fn connect(&self, api_key: &str, model: ModelTier) -> Box<dyn ContentProvider> {
        Box::new(FakeProvider {
            script: self.script.clone(),
            api_key: api_key.to_string(),
            model,
            calls: self.calls.clone(),
        })
    }
}

#[async_trait]
impl ContentProvider for FakeProvider {
    async fn generate_content(
        &self,
        request: &GenerationRequest,
    ) -> Result<ProviderReply, ProviderError> {
        self.calls.lock().unwrap().push(RecordedCall {
            api_key: self.api_key.clone(),
            model: self.model,
            request: request.clone(),
        });
        match &self.script {
            Scripted::Reply(reply) => Ok(reply.clone()),
            Scripted::Fail(msg) => Err(ProviderError::Transport(msg.clone())),
        }
    }
}

pub struct TestApp {
    /// Base URL, e.g. "http://127.0.0.1:12345".
    pub address: String,
    pub calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl TestApp {
    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.address)
    }

    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

pub const TEST_API_KEY: &str = "test-key-not-real";

/// Spawns the app on a random port with a fake provider behind it.
pub async fn spawn_app(api_key: Option<&str>, script: Scripted) -> TestApp {
    // Bind first so the page's fetch client can point back at this server.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let config = Config {
        gemini_api_key: api_key.map(str::to_string),
        gemini_base_url: "http://127.0.0.1:9/unused".parse().unwrap(),
        port,
        gateway_url: format!("{}/api/generate", address).parse().unwrap(),
        allowed_origins: vec!["http://localhost:3000".to_string()],
        rust_log: "error".to_string(),
        log_dir: "logs".to_string(),
    };

    let calls = Arc::new(Mutex::new(Vec::new()));
    let connector = FakeConnector {
        script,
        calls: calls.clone(),
    };

    let state = AppState::with_connector(config, Arc::new(connector));
    let app = routes::create_router(state);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp { address, calls }
}

pub fn text_reply(text: &str) -> Scripted {
    Scripted::Reply(ProviderReply::Text(text.to_string()))
}

pub const SAMPLE_SET_JSON: &str = r#"{"Leading Sentence":"In 1453 Constantinople fell.","Questions":["Which empire captured the city?","Who was its sultan?"],"Answers":["Ottoman Empire","Mehmed II"],"different_answers":["Seljuk","Suleiman"],"Explanation":"The conquest ended the Byzantine Empire.","Theme":"Fall of Constantinople"}"#;
