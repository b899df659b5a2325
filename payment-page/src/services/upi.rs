//! UPI deep links and their QR rendering.

use crate::config::{parse_hex_color, PayeeSettings};
use crate::models::Amount;
use anyhow::Result;
use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, Rgb};
use qrcode::QrCode;
use std::io::Cursor;

/// Smallest edge of the rendered QR image, in pixels.
pub const QR_MIN_DIMENSION: u32 = 180;

const DEFAULT_QR_COLOR: [u8; 3] = [0x25, 0x63, 0xeb];

/// Build a UPI deep link.
///
/// Field order is fixed (`pa`, `pn`, `am`, `tn`) because payment apps match on
/// it. The handle goes out verbatim; name and note are percent-encoded.
pub fn build_upi_link(amount: Amount, payee_handle: &str, payee_name: &str, note: &str) -> String {
    format!(
        "upi://pay?pa={}&pn={}&am={}&tn={}",
        payee_handle,
        urlencoding::encode(payee_name),
        amount,
        urlencoding::encode(note)
    )
}

#[derive(Clone, Debug)]
pub struct UpiService {
    payee: PayeeSettings,
}

impl UpiService {
    pub fn new(payee: PayeeSettings) -> Self {
        Self { payee }
    }

    /// Deep link for `amount` to the configured payee.
    pub fn payment_link(&self, amount: Amount) -> String {
        build_upi_link(amount, &self.payee.handle, &self.payee.name, &self.payee.note)
    }

    /// Render `upi_link` as a PNG QR code and return it base64 encoded.
    pub fn generate_qr_base64(&self, upi_link: &str) -> Result<String> {
        let dark = parse_hex_color(&self.payee.qr_color).unwrap_or(DEFAULT_QR_COLOR);

        let code = QrCode::new(upi_link)?;
        let image = code
            .render::<Rgb<u8>>()
            .dark_color(Rgb(dark))
            .light_color(Rgb([255, 255, 255]))
            .min_dimensions(QR_MIN_DIMENSION, QR_MIN_DIMENSION)
            .build();

        let dynamic_image = DynamicImage::ImageRgb8(image);
        let mut buffer = Cursor::new(Vec::new());
        dynamic_image.write_to(&mut buffer, image::ImageOutputFormat::Png)?;

        Ok(general_purpose::STANDARD.encode(buffer.get_ref()))
    }
}
