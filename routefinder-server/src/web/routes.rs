//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::domain::{DomainError, FeatureKind, LatLng};
use crate::interaction::InteractionError;
use crate::view::InfoPanel;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/api/datasets", get(list_datasets))
        .route("/api/datasets/select", post(select_dataset))
        .route("/api/click", post(click))
        .route("/api/view", get(current_view))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Map page with the dataset dropdown.
async fn index_page(State(state): State<AppState>) -> impl IntoResponse {
    let info = state.view.lock().await.info_panel();
    Html(
        IndexTemplate {
            options: state.catalog.options().to_vec(),
            info,
        }
        .render()
        .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

fn render_info_panel(info: InfoPanel) -> Result<Response, AppError> {
    let html = InfoPanelTemplate { info }
        .render()
        .map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;
    Ok(Html(html).into_response())
}

/// The dataset catalog.
async fn list_datasets(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.catalog.as_ref().clone())
}

/// Replace both layers with the selected dataset.
///
/// The view is always cleared. Each layer that loads is set; a layer that
/// fails is left empty and reported in `errors`.
async fn select_dataset(
    State(state): State<AppState>,
    Json(req): Json<SelectDatasetRequest>,
) -> Result<Response, AppError> {
    let option = state
        .catalog
        .get(&req.key)
        .ok_or_else(|| AppError::NotFound {
            message: format!("Unknown dataset: {}", req.key),
        })?
        .clone();

    let zone_source = option.zone();
    let points_source = option.points();
    let (zone, points) = tokio::join!(
        state.loader.load_zone(&zone_source),
        state.loader.load_points(&points_source),
    );

    let mut errors = Vec::new();
    let zone = zone
        .inspect_err(|e| {
            error!(dataset = %option.key, error = %e, "zone load failed");
            errors.push(LayerError::new(FeatureKind::Zone, e));
        })
        .ok();
    let points = points
        .inspect_err(|e| {
            error!(dataset = %option.key, error = %e, "points load failed");
            errors.push(LayerError::new(FeatureKind::Points, e));
        })
        .ok();

    let response = DatasetResponse::new(
        option.key.clone(),
        option.label.clone(),
        zone.as_ref(),
        points.as_ref(),
        errors,
    );

    let mut view = state.view.lock().await;
    view.clear_for_dataset(Some(option.key.clone()));
    if let Some(zone) = zone {
        view.set_zone(zone.into());
    }
    if let Some(points) = points {
        view.set_points(points.into());
    }
    info!(
        dataset = %option.key,
        failed_layers = response.errors.len(),
        "dataset selected"
    );

    Ok(Json(response).into_response())
}

/// Run the click pipeline and write its outcome into the view.
async fn click(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ClickRequest>,
) -> Result<Response, AppError> {
    let location = LatLng::parse(req.lat, req.lng)?;

    let (token, points) = {
        let mut view = state.view.lock().await;
        (view.begin_interaction(location), view.candidate_points())
    };

    let outcome = state
        .pipeline
        .run_interaction(&token, location, &points)
        .await?;

    let mut view = state.view.lock().await;
    view.apply_outcome(&outcome)?;

    if accepts_html(&headers) {
        render_info_panel(view.info_panel())
    } else {
        Ok(Json(view.snapshot()).into_response())
    }
}

/// The current view, or its info panel for HTML clients.
async fn current_view(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let view = state.view.lock().await;
    if accepts_html(&headers) {
        render_info_panel(view.info_panel())
    } else {
        Ok(Json(view.snapshot()).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    Internal { message: String },
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<InteractionError> for AppError {
    fn from(e: InteractionError) -> Self {
        AppError::Conflict {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
