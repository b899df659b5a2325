use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct QrGenerateRequest {
    pub amount: f64,
}

#[derive(Serialize)]
pub struct QrGenerateResponse {
    pub upi_link: String,
    pub qr_image_base64: String,
}
