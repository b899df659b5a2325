//! Channel actions triggered from the page.
//!
//! Each handler runs one dispatcher operation against the visitor's view
//! state with a [`ClientSurface`], stores the result, and answers with the
//! side effect the browser should carry out.

use crate::handlers::{load_view, store_view};
use crate::services::checkout::{CheckoutOptions, CheckoutOutcome};
use crate::services::{ClientSurface, ClipboardReport, Device};
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use chrono::Utc;
use serde::Deserialize;
use service_core::error::AppError;
use tower_sessions::Session;

#[derive(Deserialize)]
pub struct CopyForm {
    pub outcome: ClipboardReport,
}

#[derive(Deserialize)]
pub struct CheckoutOpenRequest {
    /// Whether `window.Razorpay` exists in the page.
    #[serde(default = "widget_loaded_default")]
    pub widget_loaded: bool,
}

fn widget_loaded_default() -> bool {
    true
}

pub async fn direct_link(
    State(state): State<AppState>,
    session: Session,
    device: Device,
) -> Result<Response, AppError> {
    let mut view = load_view(&session, &state.dispatcher).await?;
    let mut surface = ClientSurface::new();

    state
        .dispatcher
        .direct_link(&mut view, &mut surface, device.is_mobile, Utc::now())?;
    store_view(&session, &view).await?;

    Ok(surface.into_redirect())
}

pub async fn copy_link(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CopyForm>,
) -> Result<Response, AppError> {
    let mut view = load_view(&session, &state.dispatcher).await?;
    let mut surface = ClientSurface::with_clipboard(form.outcome);

    state
        .dispatcher
        .copy_link(&mut view, &mut surface, Utc::now());
    store_view(&session, &view).await?;

    Ok(surface.into_redirect())
}

pub async fn share_whatsapp(
    State(state): State<AppState>,
    session: Session,
    device: Device,
) -> Result<Response, AppError> {
    let mut view = load_view(&session, &state.dispatcher).await?;
    let mut surface = ClientSurface::new();

    state
        .dispatcher
        .whatsapp(&mut view, &mut surface, device.is_mobile, Utc::now())?;
    store_view(&session, &view).await?;

    Ok(surface.into_redirect())
}

/// Open the checkout widget. Answers with the options it is opened with, or
/// 400 when the page reports the widget script is missing; the failure is
/// kept in the view state either way.
pub async fn open_checkout(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<CheckoutOpenRequest>,
) -> Result<Json<CheckoutOptions>, AppError> {
    let mut view = load_view(&session, &state.dispatcher).await?;
    let mut surface = if request.widget_loaded {
        ClientSurface::new()
    } else {
        ClientSurface::without_checkout()
    };

    let options = state
        .dispatcher
        .checkout(&mut view, &mut surface, Utc::now())?;
    store_view(&session, &view).await?;

    if surface.effects().is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "checkout widget is not available"
        )));
    }

    Ok(Json(options))
}

pub async fn checkout_outcome(
    State(state): State<AppState>,
    session: Session,
    Json(outcome): Json<CheckoutOutcome>,
) -> Result<impl IntoResponse, AppError> {
    let mut view = load_view(&session, &state.dispatcher).await?;
    state
        .dispatcher
        .checkout_outcome(&mut view, outcome, Utc::now());
    store_view(&session, &view).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// `visibilitychange` reported the page as hidden.
pub async fn page_hidden(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let mut view = load_view(&session, &state.dispatcher).await?;
    let was_loading = view.status.is_loading();

    state.dispatcher.page_hidden(&mut view, Utc::now());
    if was_loading {
        store_view(&session, &view).await?;
    }

    Ok(StatusCode::NO_CONTENT)
}
