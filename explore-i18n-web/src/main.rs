use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use explore_i18n_mt::{
    ErrorResponse, GatewayConfig, MISSING_PARAMETERS, MtError, TRANSLATE_PATH, TranslateRequest,
    TranslateResponse, TranslationGateway, UsageResponse,
};

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<TranslationGateway>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = GatewayConfig::from_env()
        .map_err(|e| format!("Failed to load gateway configuration: {}", e))?;
    info!(
        "Primary: {}, fallback: {}",
        config.primary_provider_url, config.secondary_provider_url
    );

    let gateway = TranslationGateway::from_config(config)
        .map_err(|e| format!("Failed to initialize gateway: {}", e))?;
    let state = AppState {
        gateway: Arc::new(gateway),
    };

    info!("🌐 Starting Explore Maharashtra translation gateway");

    let addr = std::env::var("EXPLORE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 Server running at http://{}", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route(TRANSLATE_PATH, get(usage).post(translate_text))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

async fn usage() -> Json<UsageResponse> {
    Json(UsageResponse::default())
}

// The body is read as JSON whatever the Content-Type header says.
async fn translate_text(State(state): State<AppState>, body: Bytes) -> Response {
    let request: TranslateRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            error!("🔥 Translation API error: invalid JSON body: {}", e);
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Invalid JSON body: {}", e),
            );
        }
    };

    let (text, target_lang) = match (request.text.as_deref(), request.target_lang.as_deref()) {
        (Some(text), Some(lang)) if !text.trim().is_empty() && !lang.trim().is_empty() => {
            (text, lang)
        }
        (text, lang) => {
            warn!("⚠️ Missing required parameters (text: {:?}, targetLang: {:?})", text, lang);
            return error_response(StatusCode::BAD_REQUEST, MISSING_PARAMETERS);
        }
    };

    match state.gateway.translate(text, target_lang).await {
        Ok(translated) => Json(TranslateResponse {
            translated_text: Some(translated),
        })
        .into_response(),
        Err(e @ (MtError::InvalidRequest(_) | MtError::InvalidLocale(_))) => {
            warn!("⚠️ Rejected translation request: {}", e);
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(e) => {
            error!("🔥 Translation API error: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
