//! Application startup and lifecycle management.

use crate::config::Settings;
use crate::handlers::{self, actions, page};
use crate::services::{ChannelDispatcher, UpiService};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use std::sync::Arc;
use time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, SessionManagerLayer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub dispatcher: Arc<ChannelDispatcher>,
    pub upi: UpiService,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let dispatcher = ChannelDispatcher::new(&settings);
        let upi = UpiService::new(settings.payee.clone());

        Self {
            settings: Arc::new(settings),
            dispatcher: Arc::new(dispatcher),
            upi,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    // View state lives only in memory; a restart starts every visitor afresh.
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::hours(24)));

    Router::new()
        .route("/", get(page::index))
        .route("/amount", post(page::set_amount))
        .route("/channel", post(page::select_channel))
        .route("/pay/link", post(actions::direct_link))
        .route("/copy", post(actions::copy_link))
        .route("/share/whatsapp", post(actions::share_whatsapp))
        .route("/checkout/open", post(actions::open_checkout))
        .route("/checkout/outcome", post(actions::checkout_outcome))
        .route("/events/hidden", post(actions::page_hidden))
        .route("/api/qr", post(handlers::upi::generate_qr))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Bind the listener and build the router. Port 0 binds a random port.
    pub async fn build(settings: Settings) -> Result<Self, AppError> {
        let address = format!("{}:{}", settings.server.host, settings.server.port);
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            payee = %settings.payee.handle,
            channels = ?settings.channels,
            checkout_configured = settings.checkout.is_configured(),
            "Payment page configured"
        );

        let router = build_router(AppState::new(settings));

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        tracing::info!("Payment page listening on port {}", self.port);
        axum::serve(self.listener, self.router).await
    }
}
