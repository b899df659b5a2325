//! View-state model of the payment page.
//!
//! Everything here is per-visitor and in-memory: nothing outlives the session.

pub mod amount;
pub mod status;

pub use amount::{Amount, AmountError};
pub use status::{Pending, Status};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The ways a payment can be collected. One is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    DirectLink,
    Qr,
    Whatsapp,
    Checkout,
}

impl Channel {
    pub const ALL: [Channel; 4] = [
        Channel::DirectLink,
        Channel::Qr,
        Channel::Whatsapp,
        Channel::Checkout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::DirectLink => "direct_link",
            Channel::Qr => "qr",
            Channel::Whatsapp => "whatsapp",
            Channel::Checkout => "checkout",
        }
    }

    /// Tab caption shown on the page.
    pub fn label(&self) -> &'static str {
        match self {
            Channel::DirectLink => "Direct Link",
            Channel::Qr => "QR Code",
            Channel::Whatsapp => "WhatsApp",
            Channel::Checkout => "Razorpay",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown channel: {0}")]
pub struct UnknownChannel(pub String);

impl FromStr for Channel {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .into_iter()
            .find(|channel| channel.as_str() == s)
            .ok_or_else(|| UnknownChannel(s.to_string()))
    }
}

/// Amount, active channel and transient status of one visitor's page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub amount: Amount,
    pub channel: Channel,
    pub status: Status,
}

impl ViewState {
    pub fn new(amount: Amount, channel: Channel) -> Self {
        Self {
            amount,
            channel,
            status: Status::Idle,
        }
    }

    /// Expire loading indicators and timed messages that are past due.
    pub fn settle(&mut self, now: chrono::DateTime<chrono::Utc>) {
        self.status.settle(now);
    }
}
