//! Razorpay checkout widget: the options it is opened with and the outcomes
//! it reports back.

use crate::config::CheckoutSettings;
use crate::models::Amount;
use serde::{Deserialize, Serialize};

/// Options record passed to `new Razorpay(options)`.
///
/// `handler` and `modal.ondismiss` are functions and are attached by the page
/// script; they report back as a [`CheckoutOutcome`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutOptions {
    /// Merchant public key id.
    pub key: String,
    /// Amount in the smallest currency unit (paise for INR).
    pub amount: u64,
    pub currency: String,
    /// Payee display name.
    pub name: String,
    pub description: String,
    pub image: String,
    pub prefill: Prefill,
    pub theme: Theme,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub color: String,
}

impl CheckoutOptions {
    pub fn new(settings: &CheckoutSettings, payee_name: &str, amount: Amount) -> Self {
        Self {
            key: settings.key_id.clone(),
            amount: amount.to_minor_units(),
            currency: settings.currency.clone(),
            name: payee_name.to_string(),
            description: settings.description.clone(),
            image: settings.image.clone(),
            prefill: Prefill::default(),
            theme: Theme {
                color: settings.theme_color.clone(),
            },
        }
    }
}

/// What the widget reported.
///
/// Wire form, as posted by the page script:
/// `{"status":"success","razorpay_payment_id":"pay_..."}`,
/// `{"status":"failed","code":"BAD_REQUEST_ERROR","description":"..."}`,
/// `{"status":"cancelled"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckoutOutcome {
    Success {
        #[serde(rename = "razorpay_payment_id")]
        payment_id: String,
    },
    Failed {
        #[serde(default)]
        code: Option<String>,
        #[serde(default)]
        description: Option<String>,
    },
    Cancelled,
}

impl CheckoutOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutOutcome::Success { .. } => "success",
            CheckoutOutcome::Failed { .. } => "failed",
            CheckoutOutcome::Cancelled => "cancelled",
        }
    }
}

/// Status applied for a failed or cancelled checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeAction {
    /// Show the message as an error.
    Error,
    /// Show the message as information.
    Info,
    /// Clear the status without a message.
    Idle,
}
