//! Channel dispatcher.
//!
//! Turns the visitor's actions into side effects on their device and keeps
//! the transient status in step. Side effects go through [`Surface`], so the
//! same transitions drive the HTTP page and the tests.
//!
//! Loading indicators are cleared by real signals where one exists (the
//! checkout widget's callbacks, the page being hidden when another app takes
//! over). The configured delays only bound how long an indicator can linger
//! when no signal arrives.

use crate::config::{CheckoutSettings, DispatchSettings, PayeeSettings, Settings};
use crate::models::{Amount, Channel, Pending, Status, ViewState};
use crate::services::checkout::{CheckoutOptions, CheckoutOutcome, OutcomeAction};
use crate::services::upi::build_upi_link;
use crate::services::whatsapp;
use chrono::{DateTime, Duration, Utc};
use service_core::error::AppError;
use thiserror::Error;

pub const MOBILE_ONLY: &str =
    "UPI payment links work only on mobile. Please scan the QR or copy the link below.";
pub const OPEN_APP_FAILED: &str = "Failed to open payment app. Please try manually.";
pub const LINK_COPIED: &str = "UPI link copied! Paste it in your UPI app.";
pub const COPY_FAILED: &str = "Could not copy the link. Please copy it manually.";
pub const WHATSAPP_WEB: &str = "WhatsApp Web will open in a new tab.";
pub const OPEN_WHATSAPP_FAILED: &str = "Failed to open WhatsApp. Please try again.";
pub const OPEN_CHECKOUT_FAILED: &str = "Failed to open checkout. Please try again.";
pub const PAYMENT_FAILED: &str = "Payment failed. Please try again.";
pub const PAYMENT_CANCELLED: &str = "Payment cancelled.";

/// Side effects the dispatcher can ask of the visitor's device.
pub trait Surface {
    /// Replace the current page with `url`.
    fn navigate(&mut self, url: &str) -> Result<(), SurfaceError>;

    /// Open `url` without replacing the current page.
    fn open_in_new_context(&mut self, url: &str) -> Result<(), SurfaceError>;

    fn write_clipboard(&mut self, text: &str) -> Result<(), SurfaceError>;

    fn open_checkout(&mut self, options: &CheckoutOptions) -> Result<(), SurfaceError>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("could not open new context: {0}")]
    Open(String),

    #[error("clipboard access denied")]
    ClipboardDenied,

    #[error("clipboard unavailable")]
    ClipboardUnavailable,

    #[error("checkout widget failed: {0}")]
    Checkout(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("channel {0} is not enabled")]
    ChannelDisabled(Channel),
}

impl From<DispatchError> for AppError {
    fn from(err: DispatchError) -> Self {
        AppError::BadRequest(anyhow::Error::new(err))
    }
}

#[derive(Clone, Debug)]
pub struct ChannelDispatcher {
    payee: PayeeSettings,
    channels: Vec<Channel>,
    dispatch: DispatchSettings,
    checkout: CheckoutSettings,
}

impl ChannelDispatcher {
    pub fn new(settings: &Settings) -> Self {
        Self {
            payee: settings.payee.clone(),
            channels: settings.channels.clone(),
            dispatch: settings.dispatch.clone(),
            checkout: settings.checkout.clone(),
        }
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn is_enabled(&self, channel: Channel) -> bool {
        self.channels.contains(&channel)
    }

    pub fn payee(&self) -> &PayeeSettings {
        &self.payee
    }

    /// State of a page nobody has touched yet.
    pub fn initial_state(&self) -> ViewState {
        let channel = self
            .channels
            .first()
            .copied()
            .unwrap_or(Channel::DirectLink);
        ViewState::new(Amount::DEFAULT, channel)
    }

    pub fn payment_link(&self, amount: Amount) -> String {
        build_upi_link(amount, &self.payee.handle, &self.payee.name, &self.payee.note)
    }

    pub fn set_amount(&self, state: &mut ViewState, amount: Amount, now: DateTime<Utc>) {
        state.settle(now);
        state.amount = amount;
    }

    /// Switch tabs. Any message from the previous tab is dropped.
    pub fn select_channel(
        &self,
        state: &mut ViewState,
        channel: Channel,
        now: DateTime<Utc>,
    ) -> Result<(), DispatchError> {
        self.ensure_enabled(channel)?;
        state.settle(now);
        state.channel = channel;
        state.status = Status::Idle;
        Ok(())
    }

    /// Hand the payment link to whichever app the device resolves `upi://` to.
    ///
    /// Only attempted on mobile; elsewhere the visitor is pointed at the QR
    /// code and the copy button.
    pub fn direct_link(
        &self,
        state: &mut ViewState,
        surface: &mut impl Surface,
        is_mobile: bool,
        now: DateTime<Utc>,
    ) -> Result<(), DispatchError> {
        self.ensure_enabled(Channel::DirectLink)?;
        state.settle(now);

        if !is_mobile {
            state.status = self.info(MOBILE_ONLY, now);
            record_action(Channel::DirectLink, "mobile_only");
            return Ok(());
        }

        let link = self.payment_link(state.amount);
        state.status = Status::Loading {
            pending: Pending::Navigation,
            deadline: after(now, self.dispatch.reset_after()),
        };

        match surface.navigate(&link) {
            Ok(()) => {
                tracing::info!(amount = %state.amount, "Handing payment link to UPI app");
                record_action(Channel::DirectLink, "opened");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to open payment app");
                state.status = self.error(OPEN_APP_FAILED, now);
                record_action(Channel::DirectLink, "failed");
            }
        }

        Ok(())
    }

    /// Put the payment link on the clipboard. Amount and tab are left alone.
    pub fn copy_link(&self, state: &mut ViewState, surface: &mut impl Surface, now: DateTime<Utc>) {
        state.settle(now);
        let link = self.payment_link(state.amount);

        match surface.write_clipboard(&link) {
            Ok(()) => {
                state.status = self.info(LINK_COPIED, now);
                record_action(state.channel, "copied");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to copy payment link");
                state.status = self.error(COPY_FAILED, now);
                record_action(state.channel, "copy_failed");
            }
        }
    }

    /// Send a payment request through WhatsApp.
    pub fn whatsapp(
        &self,
        state: &mut ViewState,
        surface: &mut impl Surface,
        is_mobile: bool,
        now: DateTime<Utc>,
    ) -> Result<(), DispatchError> {
        self.ensure_enabled(Channel::Whatsapp)?;
        state.settle(now);

        let link = self.payment_link(state.amount);
        let message = whatsapp::payment_request_message(state.amount, &self.payee, &link);
        let url = whatsapp::share_url(&message);

        state.status = if is_mobile {
            Status::Loading {
                pending: Pending::Share,
                deadline: after(now, self.dispatch.reset_after()),
            }
        } else {
            self.info(WHATSAPP_WEB, now)
        };

        match surface.open_in_new_context(&url) {
            Ok(()) => {
                tracing::info!(amount = %state.amount, is_mobile, "Opening WhatsApp payment request");
                record_action(Channel::Whatsapp, "opened");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to open WhatsApp");
                state.status = self.error(OPEN_WHATSAPP_FAILED, now);
                record_action(Channel::Whatsapp, "failed");
            }
        }

        Ok(())
    }

    /// Open the checkout widget for the current amount.
    ///
    /// The status stays loading until the widget reports back through
    /// [`checkout_outcome`](Self::checkout_outcome) or the fallback elapses.
    pub fn checkout(
        &self,
        state: &mut ViewState,
        surface: &mut impl Surface,
        now: DateTime<Utc>,
    ) -> Result<CheckoutOptions, DispatchError> {
        self.ensure_enabled(Channel::Checkout)?;
        state.settle(now);

        let options = CheckoutOptions::new(&self.checkout, &self.payee.name, state.amount);
        state.status = Status::Loading {
            pending: Pending::Checkout,
            deadline: after(now, self.dispatch.checkout_fallback()),
        };

        match surface.open_checkout(&options) {
            Ok(()) => {
                tracing::info!(
                    amount = options.amount,
                    currency = %options.currency,
                    "Opening checkout widget"
                );
                record_action(Channel::Checkout, "opened");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to open checkout widget");
                state.status = self.error(OPEN_CHECKOUT_FAILED, now);
                record_action(Channel::Checkout, "failed");
            }
        }

        Ok(options)
    }

    /// Apply what the checkout widget reported.
    pub fn checkout_outcome(&self, state: &mut ViewState, outcome: CheckoutOutcome, now: DateTime<Utc>) {
        state.settle(now);
        record_action(Channel::Checkout, outcome.as_str());

        state.status = match outcome {
            CheckoutOutcome::Success { payment_id } => {
                tracing::info!(payment_id = %payment_id, "Checkout reported success");
                self.info(&format!("Payment successful! Payment ID: {}", payment_id), now)
            }
            CheckoutOutcome::Failed { code, description } => {
                tracing::warn!(code = ?code, description = ?description, "Checkout reported failure");
                let message = description
                    .filter(|d| !d.trim().is_empty())
                    .map(|d| format!("Payment failed: {}", d))
                    .unwrap_or_else(|| PAYMENT_FAILED.to_string());
                self.outcome_status(self.checkout.on_failure, &message, now)
            }
            CheckoutOutcome::Cancelled => {
                tracing::info!("Checkout dismissed");
                self.outcome_status(self.checkout.on_cancel, PAYMENT_CANCELLED, now)
            }
        };
    }

    /// The page went to the background: another app has taken over, so a
    /// pending hand-off is complete.
    pub fn page_hidden(&self, state: &mut ViewState, now: DateTime<Utc>) {
        state.settle(now);
        if let Status::Loading {
            pending: Pending::Navigation | Pending::Share,
            ..
        } = state.status
        {
            state.status = Status::Idle;
        }
    }

    fn ensure_enabled(&self, channel: Channel) -> Result<(), DispatchError> {
        if self.is_enabled(channel) {
            Ok(())
        } else {
            Err(DispatchError::ChannelDisabled(channel))
        }
    }

    fn message_expiry(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.dispatch.message_ttl().map(|ttl| after(now, ttl))
    }

    fn info(&self, message: &str, now: DateTime<Utc>) -> Status {
        Status::Info {
            message: message.to_string(),
            expires_at: self.message_expiry(now),
        }
    }

    fn error(&self, message: &str, now: DateTime<Utc>) -> Status {
        Status::Error {
            message: message.to_string(),
            expires_at: self.message_expiry(now),
        }
    }

    fn outcome_status(&self, action: OutcomeAction, message: &str, now: DateTime<Utc>) -> Status {
        match action {
            OutcomeAction::Error => self.error(message, now),
            OutcomeAction::Info => self.info(message, now),
            OutcomeAction::Idle => Status::Idle,
        }
    }
}

fn after(now: DateTime<Utc>, delay: Duration) -> DateTime<Utc> {
    now.checked_add_signed(delay)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

fn record_action(channel: Channel, outcome: &'static str) {
    metrics::counter!(
        "payment_page_actions_total",
        "channel" => channel.as_str(),
        "outcome" => outcome
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::sample;

    /// Records every side effect; fails the ones it is told to.
    #[derive(Default)]
    struct FakeSurface {
        navigations: Vec<String>,
        opened: Vec<String>,
        clipboard: Vec<String>,
        checkouts: Vec<CheckoutOptions>,
        fail_navigation: bool,
        fail_open: bool,
        deny_clipboard: bool,
        fail_checkout: bool,
    }

    impl Surface for FakeSurface {
        fn navigate(&mut self, url: &str) -> Result<(), SurfaceError> {
            if self.fail_navigation {
                return Err(SurfaceError::Navigation("blocked".to_string()));
            }
            self.navigations.push(url.to_string());
            Ok(())
        }

        fn open_in_new_context(&mut self, url: &str) -> Result<(), SurfaceError> {
            if self.fail_open {
                return Err(SurfaceError::Open("popup blocked".to_string()));
            }
            self.opened.push(url.to_string());
            Ok(())
        }

        fn write_clipboard(&mut self, text: &str) -> Result<(), SurfaceError> {
            if self.deny_clipboard {
                return Err(SurfaceError::ClipboardDenied);
            }
            self.clipboard.push(text.to_string());
            Ok(())
        }

        fn open_checkout(&mut self, options: &CheckoutOptions) -> Result<(), SurfaceError> {
            if self.fail_checkout {
                return Err(SurfaceError::Checkout("Razorpay is not defined".to_string()));
            }
            self.checkouts.push(options.clone());
            Ok(())
        }
    }

    fn dispatcher() -> ChannelDispatcher {
        ChannelDispatcher::new(&sample())
    }

    fn dispatcher_with(channels: Vec<Channel>) -> ChannelDispatcher {
        let mut settings = sample();
        settings.channels = channels;
        ChannelDispatcher::new(&settings)
    }

    fn info(message: &str) -> Status {
        Status::Info {
            message: message.to_string(),
            expires_at: None,
        }
    }

    fn error(message: &str) -> Status {
        Status::Error {
            message: message.to_string(),
            expires_at: None,
        }
    }

    #[test]
    fn fresh_page_starts_on_first_channel() {
        let state = dispatcher_with(vec![Channel::Qr, Channel::DirectLink]).initial_state();
        assert_eq!(state.channel, Channel::Qr);
        assert_eq!(state.amount, Amount::DEFAULT);
        assert_eq!(state.status, Status::Idle);
    }

    #[test]
    fn desktop_direct_link_never_navigates() {
        let dispatcher = dispatcher();
        let mut state = dispatcher.initial_state();
        let mut surface = FakeSurface::default();

        dispatcher
            .direct_link(&mut state, &mut surface, false, Utc::now())
            .unwrap();

        assert!(surface.navigations.is_empty());
        assert_eq!(state.status, info(MOBILE_ONLY));
    }

    #[test]
    fn mobile_direct_link_navigates_once_to_the_built_link() {
        let dispatcher = dispatcher();
        let mut state = dispatcher.initial_state();
        let now = Utc::now();
        dispatcher.set_amount(&mut state, Amount::new(349.5).unwrap(), now);
        let mut surface = FakeSurface::default();

        dispatcher
            .direct_link(&mut state, &mut surface, true, now)
            .unwrap();

        assert_eq!(
            surface.navigations,
            vec![build_upi_link(
                Amount::new(349.5).unwrap(),
                "9981171354@ybl",
                "Payment Receiver",
                "Payment"
            )]
        );
        assert_eq!(
            state.status,
            Status::Loading {
                pending: Pending::Navigation,
                deadline: now + Duration::milliseconds(1000),
            }
        );
    }

    #[test]
    fn navigation_failure_shows_error_instead_of_loading() {
        let dispatcher = dispatcher();
        let mut state = dispatcher.initial_state();
        let mut surface = FakeSurface {
            fail_navigation: true,
            ..FakeSurface::default()
        };

        dispatcher
            .direct_link(&mut state, &mut surface, true, Utc::now())
            .unwrap();

        assert_eq!(state.status, error(OPEN_APP_FAILED));
    }

    #[test]
    fn loading_falls_back_to_idle_after_the_delay() {
        let dispatcher = dispatcher();
        let mut state = dispatcher.initial_state();
        let now = Utc::now();

        dispatcher
            .direct_link(&mut state, &mut FakeSurface::default(), true, now)
            .unwrap();
        assert!(state.status.is_loading());

        state.settle(now + Duration::milliseconds(1000));
        assert_eq!(state.status, Status::Idle);
    }

    #[test]
    fn hidden_page_completes_a_pending_hand_off() {
        let dispatcher = dispatcher();
        let mut state = dispatcher.initial_state();
        let now = Utc::now();

        dispatcher
            .direct_link(&mut state, &mut FakeSurface::default(), true, now)
            .unwrap();
        dispatcher.page_hidden(&mut state, now + Duration::milliseconds(200));

        assert_eq!(state.status, Status::Idle);
    }

    #[test]
    fn hidden_page_does_not_close_checkout() {
        let dispatcher = dispatcher();
        let mut state = dispatcher.initial_state();
        let now = Utc::now();

        dispatcher
            .checkout(&mut state, &mut FakeSurface::default(), now)
            .unwrap();
        dispatcher.page_hidden(&mut state, now);

        assert!(state.status.is_loading());
    }

    #[test]
    fn switching_channel_clears_messages() {
        let dispatcher = dispatcher();
        let mut state = dispatcher.initial_state();
        let now = Utc::now();

        dispatcher
            .direct_link(&mut state, &mut FakeSurface::default(), false, now)
            .unwrap();
        assert!(state.status.info_message().is_some());

        dispatcher
            .select_channel(&mut state, Channel::Qr, now)
            .unwrap();
        assert_eq!(state.channel, Channel::Qr);
        assert_eq!(state.status, Status::Idle);

        state.status = error(OPEN_APP_FAILED);
        dispatcher
            .select_channel(&mut state, Channel::DirectLink, now)
            .unwrap();
        assert_eq!(state.status, Status::Idle);
    }

    #[test]
    fn disabled_channels_are_rejected() {
        let dispatcher = dispatcher();
        let mut state = dispatcher.initial_state();
        let now = Utc::now();

        assert_eq!(
            dispatcher.select_channel(&mut state, Channel::Whatsapp, now),
            Err(DispatchError::ChannelDisabled(Channel::Whatsapp))
        );
        assert_eq!(
            dispatcher.whatsapp(&mut state, &mut FakeSurface::default(), true, now),
            Err(DispatchError::ChannelDisabled(Channel::Whatsapp))
        );
        assert_eq!(state.channel, Channel::DirectLink);
    }

    #[test]
    fn copy_sets_info_and_keeps_amount_and_channel() {
        let dispatcher = dispatcher();
        let mut state = dispatcher.initial_state();
        let now = Utc::now();
        dispatcher
            .select_channel(&mut state, Channel::Qr, now)
            .unwrap();
        dispatcher.set_amount(&mut state, Amount::new(75.0).unwrap(), now);
        let mut surface = FakeSurface::default();

        dispatcher.copy_link(&mut state, &mut surface, now);

        assert_eq!(state.status, info(LINK_COPIED));
        assert_eq!(state.amount, Amount::new(75.0).unwrap());
        assert_eq!(state.channel, Channel::Qr);
        assert_eq!(
            surface.clipboard,
            vec!["upi://pay?pa=9981171354@ybl&pn=Payment%20Receiver&am=75&tn=Payment".to_string()]
        );
    }

    #[test]
    fn clipboard_denial_is_reported() {
        let dispatcher = dispatcher();
        let mut state = dispatcher.initial_state();
        let mut surface = FakeSurface {
            deny_clipboard: true,
            ..FakeSurface::default()
        };

        dispatcher.copy_link(&mut state, &mut surface, Utc::now());

        assert_eq!(state.status, error(COPY_FAILED));
        assert_eq!(state.amount, Amount::DEFAULT);
    }

    #[test]
    fn whatsapp_opens_wa_me_in_new_context() {
        let dispatcher = dispatcher_with(vec![Channel::DirectLink, Channel::Qr, Channel::Whatsapp]);
        let mut state = dispatcher.initial_state();
        let now = Utc::now();
        let mut surface = FakeSurface::default();

        dispatcher
            .whatsapp(&mut state, &mut surface, true, now)
            .unwrap();

        assert_eq!(surface.opened.len(), 1);
        assert!(surface.navigations.is_empty());
        let text = surface.opened[0]
            .strip_prefix("https://wa.me/?text=")
            .unwrap();
        let message = urlencoding::decode(text).unwrap();
        assert!(message.contains("₹100"));
        assert!(message.contains(&dispatcher.payment_link(Amount::DEFAULT)));
        assert!(matches!(
            state.status,
            Status::Loading {
                pending: Pending::Share,
                ..
            }
        ));
    }

    #[test]
    fn whatsapp_on_desktop_mentions_web_client() {
        let dispatcher = dispatcher_with(vec![Channel::Whatsapp]);
        let mut state = dispatcher.initial_state();
        let mut surface = FakeSurface::default();

        dispatcher
            .whatsapp(&mut state, &mut surface, false, Utc::now())
            .unwrap();

        assert_eq!(surface.opened.len(), 1);
        assert_eq!(state.status, info(WHATSAPP_WEB));
    }

    #[test]
    fn whatsapp_failure_is_reported() {
        let dispatcher = dispatcher_with(vec![Channel::Whatsapp]);
        let mut state = dispatcher.initial_state();
        let mut surface = FakeSurface {
            fail_open: true,
            ..FakeSurface::default()
        };

        dispatcher
            .whatsapp(&mut state, &mut surface, true, Utc::now())
            .unwrap();

        assert_eq!(state.status, error(OPEN_WHATSAPP_FAILED));
    }

    #[test]
    fn checkout_sends_minor_units_and_waits_for_the_widget() {
        let dispatcher = dispatcher();
        let mut state = dispatcher.initial_state();
        let now = Utc::now();
        dispatcher.set_amount(&mut state, Amount::new(250.0).unwrap(), now);
        let mut surface = FakeSurface::default();

        let options = dispatcher.checkout(&mut state, &mut surface, now).unwrap();

        assert_eq!(options.amount, 25000);
        assert_eq!(surface.checkouts, vec![options]);

        // Still waiting well past the link hand-off delay.
        state.settle(now + Duration::seconds(5));
        assert!(matches!(
            state.status,
            Status::Loading {
                pending: Pending::Checkout,
                ..
            }
        ));
    }

    #[test]
    fn checkout_open_failure_is_reported() {
        let dispatcher = dispatcher();
        let mut state = dispatcher.initial_state();
        let mut surface = FakeSurface {
            fail_checkout: true,
            ..FakeSurface::default()
        };

        dispatcher.checkout(&mut state, &mut surface, Utc::now()).unwrap();

        assert_eq!(state.status, error(OPEN_CHECKOUT_FAILED));
    }

    #[test]
    fn checkout_success_shows_payment_id() {
        let dispatcher = dispatcher();
        let mut state = dispatcher.initial_state();
        let now = Utc::now();
        dispatcher
            .checkout(&mut state, &mut FakeSurface::default(), now)
            .unwrap();

        dispatcher.checkout_outcome(
            &mut state,
            CheckoutOutcome::Success {
                payment_id: "pay_29QQoUBi66xm2f".to_string(),
            },
            now,
        );

        assert_eq!(
            state.status,
            info("Payment successful! Payment ID: pay_29QQoUBi66xm2f")
        );
    }

    #[test]
    fn checkout_failure_and_cancel_follow_configured_actions() {
        let dispatcher = dispatcher();
        let mut state = dispatcher.initial_state();
        let now = Utc::now();

        dispatcher.checkout_outcome(
            &mut state,
            CheckoutOutcome::Failed {
                code: Some("BAD_REQUEST_ERROR".to_string()),
                description: Some("Payment declined by bank".to_string()),
            },
            now,
        );
        assert_eq!(state.status, error("Payment failed: Payment declined by bank"));

        dispatcher.checkout_outcome(&mut state, CheckoutOutcome::Cancelled, now);
        assert_eq!(state.status, info(PAYMENT_CANCELLED));

        let mut settings = sample();
        settings.checkout.on_failure = OutcomeAction::Idle;
        settings.checkout.on_cancel = OutcomeAction::Error;
        let dispatcher = ChannelDispatcher::new(&settings);

        dispatcher.checkout_outcome(
            &mut state,
            CheckoutOutcome::Failed {
                code: None,
                description: None,
            },
            now,
        );
        assert_eq!(state.status, Status::Idle);

        dispatcher.checkout_outcome(&mut state, CheckoutOutcome::Cancelled, now);
        assert_eq!(state.status, error(PAYMENT_CANCELLED));
    }

    #[test]
    fn messages_expire_when_ttl_is_configured() {
        let mut settings = sample();
        settings.dispatch.message_ttl_ms = Some(5_000);
        let dispatcher = ChannelDispatcher::new(&settings);
        let mut state = dispatcher.initial_state();
        let now = Utc::now();

        dispatcher.copy_link(&mut state, &mut FakeSurface::default(), now);
        assert_eq!(
            state.status,
            Status::Info {
                message: LINK_COPIED.to_string(),
                expires_at: Some(now + Duration::seconds(5)),
            }
        );

        state.settle(now + Duration::seconds(5));
        assert_eq!(state.status, Status::Idle);
    }

    #[test]
    fn actions_can_be_repeated() {
        let dispatcher = dispatcher();
        let mut state = dispatcher.initial_state();
        let mut surface = FakeSurface::default();
        let now = Utc::now();

        for _ in 0..3 {
            dispatcher
                .direct_link(&mut state, &mut surface, true, now)
                .unwrap();
        }

        assert_eq!(surface.navigations.len(), 3);
    }
}
