//! Donation dispatch.
//!
//! A donation attempt checks the bounds, builds a payment identifier, notifies the host, tells the user how to reconcile the payment and finally opens the payment page.

use std::time::Duration;

use serde::Serialize;

use crate::config::DonationConfig;
use crate::error::DonationError;
use crate::host::{Browser, Host};

const GUEST_USER: &str = "guest";
const INIT_PAYMENT_ACTION: &str = "init_payment";

/// The number of payment page units needed to cover `amount`.
///
/// A zero `base_price` is treated as one.
#[inline]
pub fn unit_count(amount: u32, base_price: u32) -> u32 {
    amount.div_ceil(base_price.max(1))
}

/// Build the identifier the user copies to the payment page.
///
/// Uniqueness is only as good as the timestamp resolution.
pub fn payment_id(user_id: Option<&str>, timestamp: u64) -> String {
    format!("{}_{}", user_id.unwrap_or(GUEST_USER), timestamp)
}

/// Where the payment page lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// A dedicated link configured for this exact amount.
    Override(String),
    /// The generic profile page.
    Profile(String),
}

impl Destination {
    /// The URL to open.
    #[inline]
    pub fn url(&self) -> &str {
        match self {
            Self::Override(x) => x,
            Self::Profile(x) => x,
        }
    }
}

/// Find the destination for `amount`.
///
/// Only an exact override match is used, otherwise the generic profile page is built.
pub fn resolve_destination(config: &DonationConfig, amount: u32) -> Destination {
    match config.override_for(amount) {
        Some(url) => Destination::Override(url.to_string()),
        None => Destination::Profile(format!(
            "{}/{}?amount={}",
            config.profile_base_url,
            config.destination,
            unit_count(amount, config.base_price),
        )),
    }
}

/// The message forwarded to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DonationPayload {
    /// The message kind, always `init_payment`.
    pub action: &'static str,
    /// The donated amount.
    pub amount: u32,
    /// The configured currency label.
    pub currency: String,
    /// The identifier the user copies to the payment page.
    pub payment_id: String,
    /// The host user, `null` for guests.
    pub user_id: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl DonationPayload {
    /// Serialize as JSON.
    pub fn to_json(&self) -> String {
        // a struct of plain fields always serializes
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// A dispatched donation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// The page that was opened.
    pub destination: Destination,
    /// The message forwarded to the host.
    pub payload: DonationPayload,
    /// The delay before the destination is opened.
    pub delay: Duration,
}

/// The text telling the user how to link the payment to `payment_id`.
pub fn reconciliation_message(payment_id: &str) -> String {
    format!(
        "Your payment ID:\n{}\n\nCopy it into the \"Say something nice\" field on the payment page, so that the donation can be matched to your account.",
        payment_id
    )
}

/// Dispatch a donation of `amount`.
///
/// Nothing happens if the amount is rejected.
pub fn dispatch<H: Host + ?Sized, B: Browser + ?Sized>(
    config: &DonationConfig,
    amount: u32,
    host: &H,
    browser: &B,
) -> Result<Submission, DonationError> {
    if !config.accepts(amount) {
        return Err(config.out_of_range(amount));
    }
    let destination = resolve_destination(config, amount);
    let timestamp = browser.now_ms();
    let user_id = host.user_id();
    let payload = DonationPayload {
        action: INIT_PAYMENT_ACTION,
        amount,
        currency: config.currency.clone(),
        payment_id: payment_id(user_id.as_deref(), timestamp),
        user_id,
        timestamp,
    };
    log::info!(
        "Donation of {} {} ({}) to {}",
        amount,
        config.currency,
        payload.payment_id,
        destination.url(),
    );
    host.send_data(&payload.to_json());
    if payload.user_id.is_some() {
        host.show_alert(&reconciliation_message(&payload.payment_id));
    }
    let delay = if host.defers_navigation() {
        Duration::from_millis(config.navigation_delay_ms)
    } else {
        Duration::ZERO
    };
    browser.open(destination.url(), delay);
    Ok(Submission {
        destination,
        payload,
        delay,
    })
}
