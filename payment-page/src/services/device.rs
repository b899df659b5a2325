//! Mobile device detection from the `User-Agent` header.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header::USER_AGENT, request::Parts};
use once_cell::sync::Lazy;
use regex::Regex;
use std::convert::Infallible;

static MOBILE_USER_AGENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Android|webOS|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini")
        .expect("mobile user-agent pattern is valid")
});

/// Whether the user agent belongs to a mobile platform that can resolve
/// `upi://` links.
///
/// A missing user agent is classified as not mobile.
pub fn is_mobile_runtime(user_agent: Option<&str>) -> bool {
    user_agent.is_some_and(|ua| MOBILE_USER_AGENT.is_match(ua))
}

/// Device classification of the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Device {
    pub is_mobile: bool,
}

#[async_trait]
impl<S> FromRequestParts<S> for Device
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_agent = parts
            .headers
            .get(USER_AGENT)
            .and_then(|value| value.to_str().ok());

        Ok(Self {
            is_mobile: is_mobile_runtime(user_agent),
        })
    }
}
