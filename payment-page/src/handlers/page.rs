use crate::handlers::{load_view, store_view};
use crate::models::{Amount, Channel, ViewState};
use crate::services::Device;
use crate::AppState;
use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
    Form,
};
use chrono::Utc;
use serde::Deserialize;
use service_core::error::AppError;
use tower_sessions::Session;

pub struct ChannelTab {
    pub value: &'static str,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub amount: String,
    pub tabs: Vec<ChannelTab>,
    pub is_mobile: bool,
    pub show_direct_link: bool,
    pub show_qr: bool,
    pub show_whatsapp: bool,
    pub show_checkout: bool,
    pub upi_link: String,
    pub qr_image: Option<String>,
    pub payee_name: String,
    pub payee_handle: String,
    pub info: Option<String>,
    pub error: Option<String>,
    pub loading: bool,
    /// Milliseconds until the loading indicator's fallback deadline.
    pub loading_remaining_ms: i64,
    pub checkout_script_url: Option<String>,
}

#[derive(Deserialize)]
pub struct AmountForm {
    pub amount: String,
}

#[derive(Deserialize)]
pub struct ChannelForm {
    pub channel: String,
}

pub async fn index(
    State(state): State<AppState>,
    session: Session,
    device: Device,
) -> Result<IndexTemplate, AppError> {
    let mut view = load_view(&session, &state.dispatcher).await?;
    let now = Utc::now();

    let before = view.status.clone();
    view.settle(now);
    if view.status != before {
        store_view(&session, &view).await?;
    }

    render(&state, &view, device.is_mobile, now)
}

fn render(
    state: &AppState,
    view: &ViewState,
    is_mobile: bool,
    now: chrono::DateTime<Utc>,
) -> Result<IndexTemplate, AppError> {
    let dispatcher = &state.dispatcher;
    let upi_link = dispatcher.payment_link(view.amount);

    let qr_image = if view.channel == Channel::Qr {
        Some(state.upi.generate_qr_base64(&upi_link)?)
    } else {
        None
    };

    let loading_remaining_ms = match &view.status {
        crate::models::Status::Loading { deadline, .. } => {
            (*deadline - now).num_milliseconds().max(0)
        }
        _ => 0,
    };

    let tabs = dispatcher
        .channels()
        .iter()
        .map(|channel| ChannelTab {
            value: channel.as_str(),
            label: channel.label(),
            active: *channel == view.channel,
        })
        .collect();

    Ok(IndexTemplate {
        amount: view.amount.to_string(),
        tabs,
        is_mobile,
        show_direct_link: view.channel == Channel::DirectLink,
        show_qr: view.channel == Channel::Qr,
        show_whatsapp: view.channel == Channel::Whatsapp,
        show_checkout: view.channel == Channel::Checkout,
        upi_link,
        qr_image,
        payee_name: dispatcher.payee().name.clone(),
        payee_handle: dispatcher.payee().handle.clone(),
        info: view.status.info_message().map(str::to_string),
        error: view.status.error_message().map(str::to_string),
        loading: view.status.is_loading(),
        loading_remaining_ms,
        checkout_script_url: dispatcher
            .is_enabled(Channel::Checkout)
            .then(|| state.settings.checkout.script_url.clone()),
    })
}

pub async fn set_amount(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AmountForm>,
) -> Result<impl IntoResponse, AppError> {
    let amount = Amount::parse(&form.amount)
        .map_err(|e| AppError::BadRequest(anyhow::Error::new(e)))?;

    let mut view = load_view(&session, &state.dispatcher).await?;
    state.dispatcher.set_amount(&mut view, amount, Utc::now());
    store_view(&session, &view).await?;

    tracing::debug!(amount = %amount, "Amount updated");
    Ok(Redirect::to("/"))
}

pub async fn select_channel(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ChannelForm>,
) -> Result<impl IntoResponse, AppError> {
    let channel: Channel = form
        .channel
        .parse()
        .map_err(|e| AppError::BadRequest(anyhow::Error::new(e)))?;

    let mut view = load_view(&session, &state.dispatcher).await?;
    state
        .dispatcher
        .select_channel(&mut view, channel, Utc::now())?;
    store_view(&session, &view).await?;

    tracing::debug!(channel = %channel, "Channel selected");
    Ok(Redirect::to("/"))
}
