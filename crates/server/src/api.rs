//! HTTP surface.
//!
//! - `GET /` and `GET /healthz`
//! - `POST /generate-path`: onboarding data in, learning path out
//! - `POST /translate`: always 200, falls back to the original text

use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::{Json, State};
use axum::http::{HeaderValue, Method, Request, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument, warn};

use agents::{Agent, AgentOutput};
use domain::{DomainError, LearningPath, PathRequest, TranslationRequest, TranslationResponse, UserOnboardingInput};

use crate::config::Settings;
use crate::context::AppContext;
use crate::orchestrator::OrchestrationError;

// =============================================================================
// Errors
// =============================================================================

/// Errors surfaced to HTTP callers as `{"detail": "..."}`
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] DomainError),

    #[error(transparent)]
    Pipeline(#[from] OrchestrationError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Pipeline(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

// =============================================================================
// Payloads
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratePathResponse {
    pub learning_path: LearningPath,
}

// =============================================================================
// Router
// =============================================================================

pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(|| async { StatusCode::OK }))
        .route("/generate-path", post(generate_path))
        .route("/translate", post(translate))
}

pub fn build_app(settings: &Settings, context: AppContext) -> Result<Router> {
    let allow_origin = if settings.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origins = settings
            .cors_origins
            .iter()
            .map(|origin| {
                origin
                    .trim()
                    .parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin '{}'", origin))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(routes()
        .layer(
            CorsLayer::new()
                .allow_origin(allow_origin)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::ACCEPT, header::CONTENT_TYPE])
                .max_age(Duration::from_secs(3600)),
        )
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .with_state(context))
}

/// Bind, serve and wait for Ctrl-C / SIGTERM.
pub async fn serve(settings: &Settings, context: AppContext) -> Result<()> {
    let app = build_app(settings, context)?;
    let listener = TcpListener::bind(&settings.host)
        .await
        .with_context(|| format!("Failed to bind {}", settings.host))?;

    info!("http listening on {}", settings.host);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("http server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}

// =============================================================================
// Handlers
// =============================================================================

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Welcome to the Madrasa AI Backend!" }))
}

/// Validate onboarding data and run the agent pipeline.
#[instrument(skip_all, fields(user = tracing::field::Empty))]
async fn generate_path(
    State(context): State<AppContext>,
    Json(input): Json<UserOnboardingInput>,
) -> Result<Json<GeneratePathResponse>, ApiError> {
    let request = PathRequest::try_from(input).map_err(|e| {
        warn!("Rejected onboarding data: {}", e);
        ApiError::from(e)
    })?;
    tracing::Span::current().record("user", request.telegram_user_id);
    info!("Received onboarding data for user: {}", request.telegram_user_id);

    let learning_path = context
        .orchestrator
        .generate_learning_path(&request)
        .await
        .map_err(|e| {
            error!("Error generating path: {}", e);
            ApiError::from(e)
        })?;

    info!("Successfully generated path with {} steps.", learning_path.len());
    Ok(Json(GeneratePathResponse { learning_path }))
}

/// Translate text. Translation faults still answer 200 with the original text.
#[instrument(skip_all)]
async fn translate(
    State(context): State<AppContext>,
    Json(request): Json<TranslationRequest>,
) -> Json<TranslationResponse> {
    info!("Received translation request to '{}'", request.target_language);
    let original_text = request.text.clone();
    let result = context.translator.process(request).await;

    if let Some(err) = result.error() {
        error!("Translation error: {}", err);
        return Json(TranslationResponse {
            translated_text: original_text.clone(),
            original_text,
            error: Some(err.to_string()),
        });
    }

    info!("Translation successful.");
    Json(TranslationResponse {
        original_text,
        translated_text: result.translated_text,
        error: None,
    })
}
