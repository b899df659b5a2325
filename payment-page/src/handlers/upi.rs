use crate::{
    dtos::{QrGenerateRequest, QrGenerateResponse},
    models::Amount,
    AppState,
};
use axum::{extract::State, Json};
use service_core::error::AppError;

pub async fn generate_qr(
    State(state): State<AppState>,
    Json(payload): Json<QrGenerateRequest>,
) -> Result<Json<QrGenerateResponse>, AppError> {
    let amount =
        Amount::new(payload.amount).map_err(|e| AppError::BadRequest(anyhow::Error::new(e)))?;

    let upi_link = state.upi.payment_link(amount);
    let qr_image = state.upi.generate_qr_base64(&upi_link).map_err(|e| {
        tracing::error!("Failed to generate QR code: {}", e);
        AppError::InternalError(e)
    })?;

    Ok(Json(QrGenerateResponse {
        upi_link,
        qr_image_base64: qr_image,
    }))
}
