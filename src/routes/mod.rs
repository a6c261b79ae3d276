use axum::{
    extract::{Host, Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::force::ForceClient;
use crate::views;

/// Application version from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub force: Arc<ForceClient>,
}

#[derive(Debug, Deserialize)]
pub struct IndexParams {
    pub code: Option<String>,
}

/// Health check routes (no Salesforce access required)
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

/// Application routes
pub fn app_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/setup", get(setup_handler))
        .with_state(state)
}

/// GET /health - Health check
///
/// Returns status and version information.
/// This endpoint does not require configuration (for load balancers).
async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "version": VERSION
    }))
}

/// GET / - OAuth entry point and account list
///
/// Without credentials every request lands on the setup page. With
/// credentials but no `code` parameter, the user is sent to the
/// Salesforce authorize endpoint. Once Salesforce redirects back with a
/// code, it is exchanged for a token and the account list is rendered.
/// A provider-reported auth error restarts the flow via the error's
/// redirect conversion; any other failure becomes a 500.
async fn index_handler(
    State(state): State<AppState>,
    Host(host): Host,
    headers: HeaderMap,
    Query(params): Query<IndexParams>,
) -> Result<Response, AppError> {
    if !state.config.credentials.is_configured() {
        return Ok(Redirect::to("/setup").into_response());
    }

    let callback_url = oauth_callback_url(&headers, &host);

    match params.code {
        None => {
            let url = state.force.authorize_url(&callback_url)?;
            tracing::info!("Starting OAuth flow, redirecting to authorize endpoint");
            Ok(Redirect::to(&url).into_response())
        }
        Some(code) => {
            let auth = state.force.get_token(&code, &callback_url).await?;
            let accounts = state.force.get_accounts(&auth).await?;
            tracing::info!("Rendering {} account(s)", accounts.len());
            Ok(Html(views::render_index(&accounts)).into_response())
        }
    }
}

/// GET /setup - Connected App setup instructions
///
/// Redirects home once credentials are configured.
async fn setup_handler(State(state): State<AppState>, Host(host): Host) -> Response {
    if state.config.credentials.is_configured() {
        return Redirect::to("/").into_response();
    }

    let app_name = heroku_app_name(&host);
    Html(views::render_setup(&app_name)).into_response()
}

/// Reconstruct the externally visible URL of the app root. This must
/// match the callback URL registered on the Connected App, so the
/// scheme honors `x-forwarded-proto` set by the routing layer.
fn oauth_callback_url(headers: &HeaderMap, host: &str) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("http");

    format!("{}://{}", scheme, host)
}

/// Guess the Heroku app name from the request host, for the setup page.
/// Returns an empty string when the host is not a herokuapp.com domain.
fn heroku_app_name(host: &str) -> String {
    host.strip_suffix(".herokuapp.com")
        .map(str::to_string)
        .unwrap_or_default()
}
