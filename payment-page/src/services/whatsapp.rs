//! WhatsApp payment requests (`wa.me` share links).

use crate::config::PayeeSettings;
use crate::models::Amount;

pub const SHARE_BASE_URL: &str = "https://wa.me/";

/// Message asking the recipient to pay `amount` through `payment_link`.
pub fn payment_request_message(amount: Amount, payee: &PayeeSettings, payment_link: &str) -> String {
    format!(
        "Please pay ₹{} to {} (UPI ID: {}).\nPay using this link: {}",
        amount, payee.name, payee.handle, payment_link
    )
}

/// `wa.me` target that opens WhatsApp with `message` pre-filled and lets the
/// sender pick the chat.
pub fn share_url(message: &str) -> String {
    format!("{}?text={}", SHARE_BASE_URL, urlencoding::encode(message))
}
