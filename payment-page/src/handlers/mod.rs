//! HTTP handlers for the payment page.

pub mod actions;
pub mod page;
pub mod upi;

use crate::models::ViewState;
use crate::services::{get_metrics, ChannelDispatcher};
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;
use tower_sessions::Session;

/// Session key of the visitor's [`ViewState`].
pub const VIEW_STATE_KEY: &str = "view_state";

pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "payment-page",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

pub async fn readiness_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ready" })))
}

pub async fn metrics() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}

/// The visitor's view state, or a fresh one on their first visit.
pub async fn load_view(
    session: &Session,
    dispatcher: &ChannelDispatcher,
) -> Result<ViewState, AppError> {
    let stored = session
        .get::<ViewState>(VIEW_STATE_KEY)
        .await
        .map_err(|e| {
            tracing::error!("Failed to read view state from session: {}", e);
            AppError::InternalError(anyhow::Error::new(e))
        })?;

    Ok(stored
        .filter(|view| dispatcher.is_enabled(view.channel))
        .unwrap_or_else(|| dispatcher.initial_state()))
}

pub async fn store_view(session: &Session, view: &ViewState) -> Result<(), AppError> {
    session.insert(VIEW_STATE_KEY, view).await.map_err(|e| {
        tracing::error!("Failed to write view state to session: {}", e);
        AppError::InternalError(anyhow::Error::new(e))
    })
}
