use crate::models::Channel;
use crate::services::checkout::OutcomeAction;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use service_core::config::{config_directory, load_layered};
use service_core::error::AppError;
use validator::{Validate, ValidationError};

/// Settings for the payment page, loaded once at startup.
#[derive(Deserialize, Clone, Debug, Validate)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[validate(nested)]
    pub payee: PayeeSettings,
    /// Enabled channels, in tab order. The first one is active on a fresh page.
    #[serde(default = "default_channels")]
    #[validate(length(min = 1, message = "at least one channel must be enabled"))]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub dispatch: DispatchSettings,
    #[serde(default)]
    #[validate(nested)]
    pub checkout: CheckoutSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    /// Port 0 binds a random port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Who gets paid. Fixed for the lifetime of the process.
#[derive(Deserialize, Clone, Debug, Validate)]
pub struct PayeeSettings {
    /// UPI virtual payment address, e.g. `merchant@ybl`.
    #[validate(custom(function = "validate_vpa"))]
    pub handle: String,
    /// Display name sent as `pn`.
    #[validate(length(min = 1, message = "payee name must not be empty"))]
    pub name: String,
    /// Transaction note sent as `tn`.
    #[serde(default = "default_note")]
    pub note: String,
    #[serde(default = "default_color")]
    #[validate(custom(function = "validate_hex_color"))]
    pub qr_color: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DispatchSettings {
    /// Fallback for clearing the loading indicator after handing a link to
    /// another app.
    #[serde(default = "default_reset_after_ms")]
    pub reset_after_ms: u64,
    /// Fallback for clearing the loading indicator while the checkout widget
    /// is open and has not reported back.
    #[serde(default = "default_checkout_fallback_ms")]
    pub checkout_fallback_ms: u64,
    /// When set, info and error messages disappear after this long.
    #[serde(default)]
    pub message_ttl_ms: Option<u64>,
}

impl DispatchSettings {
    pub fn reset_after(&self) -> chrono::Duration {
        millis(self.reset_after_ms)
    }

    pub fn checkout_fallback(&self) -> chrono::Duration {
        millis(self.checkout_fallback_ms)
    }

    pub fn message_ttl(&self) -> Option<chrono::Duration> {
        self.message_ttl_ms.map(millis)
    }
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            reset_after_ms: default_reset_after_ms(),
            checkout_fallback_ms: default_checkout_fallback_ms(),
            message_ttl_ms: None,
        }
    }
}

/// Razorpay checkout widget settings.
#[derive(Deserialize, Clone, Debug, Validate)]
pub struct CheckoutSettings {
    /// Public key id (`rzp_test_...` / `rzp_live_...`).
    #[serde(default)]
    pub key_id: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_description")]
    pub description: String,
    /// Logo URL shown in the widget.
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_color")]
    #[validate(custom(function = "validate_hex_color"))]
    pub theme_color: String,
    #[serde(default = "default_script_url")]
    pub script_url: String,
    /// Status applied when the widget reports a failed payment.
    #[serde(default = "default_on_failure")]
    pub on_failure: OutcomeAction,
    /// Status applied when the visitor dismisses the widget.
    #[serde(default = "default_on_cancel")]
    pub on_cancel: OutcomeAction,
}

impl CheckoutSettings {
    pub fn is_configured(&self) -> bool {
        !self.key_id.trim().is_empty()
    }
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            key_id: String::new(),
            currency: default_currency(),
            description: default_description(),
            image: String::new(),
            theme_color: default_color(),
            script_url: default_script_url(),
            on_failure: default_on_failure(),
            on_cancel: default_on_cancel(),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct TelemetrySettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

fn millis(ms: u64) -> chrono::Duration {
    chrono::Duration::milliseconds(i64::try_from(ms).unwrap_or(i64::MAX))
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_channels() -> Vec<Channel> {
    vec![Channel::DirectLink, Channel::Qr, Channel::Checkout]
}

fn default_note() -> String {
    "Payment".to_string()
}

fn default_color() -> String {
    "#2563eb".to_string()
}

fn default_reset_after_ms() -> u64 {
    1_000
}

fn default_checkout_fallback_ms() -> u64 {
    600_000
}

fn default_currency() -> String {
    "INR".to_string()
}

fn default_description() -> String {
    "UPI Payment".to_string()
}

fn default_script_url() -> String {
    "https://checkout.razorpay.com/v1/checkout.js".to_string()
}

fn default_on_failure() -> OutcomeAction {
    OutcomeAction::Error
}

fn default_on_cancel() -> OutcomeAction {
    OutcomeAction::Info
}

fn default_log_level() -> String {
    "info,payment_page=debug".to_string()
}

/// Characters a UPI virtual payment address is made of. The handle goes into
/// the deep link unescaped, so nothing else is allowed.
static VPA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._-]+@[A-Za-z0-9.-]+$").expect("VPA pattern is valid")
});

fn validate_vpa(handle: &str) -> Result<(), ValidationError> {
    if VPA.is_match(handle) {
        Ok(())
    } else {
        let mut err = ValidationError::new("vpa");
        err.message = Some("payee handle must look like name@provider".into());
        Err(err)
    }
}

/// Parse `#rrggbb` into its channels.
pub fn parse_hex_color(color: &str) -> Option<[u8; 3]> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    match parse_hex_color(color) {
        Some(_) => Ok(()),
        None => {
            let mut err = ValidationError::new("hex_color");
            err.message = Some("colour must be written as #rrggbb".into());
            Err(err)
        }
    }
}

impl Settings {
    /// Field validation plus the checks that span sections.
    pub fn check(&self) -> Result<(), AppError> {
        self.validate()?;

        if self.channels.contains(&Channel::Checkout) && !self.checkout.is_configured() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "checkout channel is enabled but checkout.key_id is not set"
            )));
        }

        Ok(())
    }
}

/// Load settings from `payment-page/config/base.yaml` and `APP_*` variables.
pub fn get_configuration() -> Result<Settings, AppError> {
    let configuration_directory = config_directory("payment-page")?;
    let settings: Settings = load_layered(&configuration_directory, "APP", &["channels"])?;
    settings.check()?;
    Ok(settings)
}
