// src/routes.rs

use std::any::Any;

use axum::{
    Json, Router,
    http::{HeaderValue, Method, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::{
    error::{AppError, ErrorBody},
    handlers::{generate, page},
    models::{
        generation::{GenerateParams, ModelTier},
        question_set::QuestionSet,
    },
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    paths(generate::generate),
    components(schemas(QuestionSet, GenerateParams, ModelTier, ErrorBody))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Panics inside a handler become the same 500 body as any other
/// unexpected error.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown server error occurred.".to_string()
    };
    AppError::InternalServerError(detail).into_response()
}

/// Assembles the main application router.
///
/// * `POST /api/generate`: the generation gateway.
/// * `GET /` and `POST /`: the browser page.
/// * `GET /api-docs/openapi.json`: the gateway's OpenAPI document.
/// * Applies global middleware (Trace, CORS, panic catching).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::ACCEPT, header::CONTENT_TYPE]);

    let api_routes = Router::new().route("/generate", post(generate::generate));

    Router::new()
        .route("/", get(page::index).post(page::generate_page))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api", api_routes)
        // Global middleware, outermost first
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
        .with_state(state)
}
