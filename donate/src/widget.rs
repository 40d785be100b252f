//! The widget controller.

use crate::amount::{ActiveChoice, AmountSelector, InputChange};
use crate::config::DonationConfig;
use crate::dispatch::{dispatch, Submission};
use crate::error::DonationError;
use crate::host::{Browser, Host, MainButton};

/// What the widget should currently display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetView {
    /// The selected amount as text.
    pub amount_text: String,
    /// The currency label.
    pub currency: String,
    /// Whether the confirmation control accepts clicks.
    pub confirm_enabled: bool,
    /// The preset button to highlight.
    pub active_preset: Option<u32>,
}

/// Owns the selection and connects it to the host and the browser.
///
/// Every state change refreshes the host main button.
/// The backend should re-render with `view` after each call.
pub struct DonationWidget<H: Host, B: Browser> {
    config: DonationConfig,
    selector: AmountSelector,
    host: H,
    browser: B,
}

impl<H: Host, B: Browser> DonationWidget<H, B> {
    /// Create the widget and signal the host that it is ready.
    pub fn new(config: DonationConfig, host: H, browser: B) -> Self {
        host.ready();
        let this = Self {
            config,
            selector: AmountSelector::new(),
            host,
            browser,
        };
        this.refresh();
        this
    }

    /// The widget configuration.
    #[inline]
    pub fn config(&self) -> &DonationConfig {
        &self.config
    }

    /// The hosting chat client.
    #[inline]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The page environment.
    #[inline]
    pub fn browser(&self) -> &B {
        &self.browser
    }

    /// The selected amount.
    #[inline]
    pub fn amount(&self) -> u32 {
        self.selector.amount()
    }

    /// Set the amount without any validation.
    pub fn select_amount(&mut self, amount: u32) {
        self.selector.select_amount(amount);
        self.refresh();
    }

    /// Handle a preset button click.
    pub fn choose_preset(&mut self, amount: u32) -> InputChange {
        let ret = self.selector.choose_preset(amount);
        self.refresh();
        ret
    }

    /// Handle an edit of the free-text field.
    pub fn edit_custom(&mut self, text: &str) -> InputChange {
        let ret = self.selector.edit_custom(text, &self.config);
        self.refresh();
        ret
    }

    /// Handle the free-text field losing focus.
    pub fn blur_custom(&mut self, text: &str) -> InputChange {
        let ret = self.selector.blur_custom(text, &self.config);
        if ret != InputChange::Keep {
            self.refresh();
        }
        ret
    }

    /// Dispatch a donation of the current amount.
    ///
    /// A rejected amount is reported to the user before the error is returned.
    pub fn confirm(&self) -> Result<Submission, DonationError> {
        dispatch(&self.config, self.amount(), &self.host, &self.browser).map_err(|err| {
            log::warn!("Donation rejected: {:?}", err);
            let message = self.config.range_message();
            if !self.host.show_alert(&message) {
                self.browser.alert(&message);
            }
            err
        })
    }

    /// What the backend should display now.
    pub fn view(&self) -> WidgetView {
        let amount = self.amount();
        WidgetView {
            amount_text: amount.to_string(),
            currency: self.config.currency.clone(),
            confirm_enabled: self.config.accepts(amount),
            active_preset: match self.selector.active() {
                ActiveChoice::Preset(x) => Some(x),
                ActiveChoice::Nothing | ActiveChoice::Custom => None,
            },
        }
    }

    fn refresh(&self) {
        let amount = self.amount();
        let state = if self.config.accepts(amount) {
            MainButton::Visible(main_button_label(amount, &self.config.currency))
        } else {
            MainButton::Hidden
        };
        self.host.set_main_button(state);
    }
}

/// The main button label for a valid `amount`.
pub fn main_button_label(amount: u32, currency: &str) -> String {
    format!("💝 Support {} {}", amount, currency)
}
