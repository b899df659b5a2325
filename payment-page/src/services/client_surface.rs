//! [`Surface`] backed by the visitor's browser.
//!
//! The server cannot touch the device directly. Navigation and new-context
//! opens are recorded and turned into a redirect; clipboard writes and the
//! checkout widget run in the page script, which reports how they went with
//! the request that triggered the action.

use crate::services::checkout::CheckoutOptions;
use crate::services::dispatcher::{Surface, SurfaceError};
use axum::http::{header::LOCATION, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

/// A side effect to be carried out by the browser.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Navigate(HeaderValue),
    OpenInNewContext(HeaderValue),
    OpenCheckout(CheckoutOptions),
}

/// Result of `navigator.clipboard.writeText`, as reported by the page script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipboardReport {
    Written,
    /// The browser refused the write (permissions, insecure context).
    Denied,
    /// No clipboard API in this browser.
    Unavailable,
}

#[derive(Debug, Default)]
pub struct ClientSurface {
    clipboard: Option<ClipboardReport>,
    checkout_unavailable: bool,
    effects: Vec<Effect>,
}

impl ClientSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clipboard(report: ClipboardReport) -> Self {
        Self {
            clipboard: Some(report),
            ..Self::default()
        }
    }

    /// The page could not load the checkout script.
    pub fn without_checkout() -> Self {
        Self {
            checkout_unavailable: true,
            ..Self::default()
        }
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Redirect to the last navigation target, or back to the page.
    pub fn into_redirect(self) -> Response {
        let target = self.effects.into_iter().rev().find_map(|effect| match effect {
            Effect::Navigate(location) | Effect::OpenInNewContext(location) => Some(location),
            Effect::OpenCheckout(_) => None,
        });

        match target {
            Some(location) => (StatusCode::SEE_OTHER, [(LOCATION, location)]).into_response(),
            None => Redirect::to("/").into_response(),
        }
    }
}

fn location(url: &str) -> Result<HeaderValue, String> {
    HeaderValue::from_str(url).map_err(|e| format!("{url:?} is not a valid location: {e}"))
}

impl Surface for ClientSurface {
    fn navigate(&mut self, url: &str) -> Result<(), SurfaceError> {
        let value = location(url).map_err(SurfaceError::Navigation)?;
        self.effects.push(Effect::Navigate(value));
        Ok(())
    }

    fn open_in_new_context(&mut self, url: &str) -> Result<(), SurfaceError> {
        let value = location(url).map_err(SurfaceError::Open)?;
        self.effects.push(Effect::OpenInNewContext(value));
        Ok(())
    }

    fn write_clipboard(&mut self, _text: &str) -> Result<(), SurfaceError> {
        match self.clipboard {
            Some(ClipboardReport::Written) => Ok(()),
            Some(ClipboardReport::Denied) => Err(SurfaceError::ClipboardDenied),
            Some(ClipboardReport::Unavailable) | None => Err(SurfaceError::ClipboardUnavailable),
        }
    }

    fn open_checkout(&mut self, options: &CheckoutOptions) -> Result<(), SurfaceError> {
        if self.checkout_unavailable {
            return Err(SurfaceError::Checkout(
                "checkout script is not loaded".to_string(),
            ));
        }
        self.effects.push(Effect::OpenCheckout(options.clone()));
        Ok(())
    }
}
