use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a loading indicator is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pending {
    /// The device was asked to open a `upi://` link.
    Navigation,
    /// A share target was opened in a new context.
    Share,
    /// The checkout widget is open.
    Checkout,
}

/// Transient feedback shown to the visitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Status {
    Idle,
    Loading {
        pending: Pending,
        /// Upper bound on how long the indicator is shown without a signal.
        deadline: DateTime<Utc>,
    },
    Info {
        message: String,
        expires_at: Option<DateTime<Utc>>,
    },
    Error {
        message: String,
        expires_at: Option<DateTime<Utc>>,
    },
}

impl Status {
    pub fn is_loading(&self) -> bool {
        matches!(self, Status::Loading { .. })
    }

    pub fn info_message(&self) -> Option<&str> {
        match self {
            Status::Info { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Status::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Fall back to `Idle` once a deadline or expiry has passed.
    pub fn settle(&mut self, now: DateTime<Utc>) {
        let expired = match self {
            Status::Idle => false,
            Status::Loading { deadline, .. } => now >= *deadline,
            Status::Info { expires_at, .. } | Status::Error { expires_at, .. } => {
                expires_at.is_some_and(|at| now >= at)
            }
        };

        if expired {
            *self = Status::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn loading_settles_after_deadline() {
        let now = Utc::now();
        let mut status = Status::Loading {
            pending: Pending::Navigation,
            deadline: now + Duration::milliseconds(1000),
        };

        status.settle(now + Duration::milliseconds(999));
        assert!(status.is_loading());

        status.settle(now + Duration::milliseconds(1000));
        assert_eq!(status, Status::Idle);
    }

    #[test]
    fn messages_without_expiry_stay() {
        let now = Utc::now();
        let mut status = Status::Info {
            message: "UPI link copied! Paste it in your UPI app.".to_string(),
            expires_at: None,
        };

        status.settle(now + Duration::days(1));
        assert_eq!(
            status.info_message(),
            Some("UPI link copied! Paste it in your UPI app.")
        );
    }

    #[test]
    fn timed_errors_expire() {
        let now = Utc::now();
        let mut status = Status::Error {
            message: "Failed to open WhatsApp. Please try again.".to_string(),
            expires_at: Some(now + Duration::seconds(5)),
        };

        status.settle(now + Duration::seconds(6));
        assert_eq!(status, Status::Idle);
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(Status::Idle).unwrap();
        assert_eq!(json["kind"], "idle");
    }
}
