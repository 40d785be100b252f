//! Amount selection.

use crate::config::DonationConfig;

/// Parse the leading integer of a free-text amount.
///
/// Leading whitespace and an optional sign are accepted and anything after the digits is ignored.
/// Text without leading digits and negative numbers both result in `0`.
/// Values too large for `u32` saturate.
pub fn parse_amount(text: &str) -> u32 {
    let s = text.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let mut ret: u32 = 0;
    for c in s.bytes().take_while(|c| c.is_ascii_digit()) {
        ret = ret.saturating_mul(10).saturating_add((c - b'0') as u32);
    }
    if negative {
        0
    } else {
        ret
    }
}

/// The currently selected amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmountSelection {
    amount: u32,
}

impl AmountSelection {
    /// The selected amount.
    #[inline]
    pub fn get(&self) -> u32 {
        self.amount
    }

    /// Replace the selected amount.
    #[inline]
    pub fn set(&mut self, amount: u32) {
        self.amount = amount;
    }
}

/// Which control the current amount came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveChoice {
    /// Nothing has been chosen yet, or the amount was set programmatically.
    Nothing,
    /// The preset button with this amount.
    Preset(u32),
    /// The free-text field.
    Custom,
}

/// What should happen to the free-text field after an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputChange {
    /// Leave the field as the user typed it.
    Keep,
    /// Rewrite the field with the clamped value.
    Replace(String),
    /// Empty the field.
    Clear,
}

/// Holds the selection and applies the bound rules of the free-text field.
///
/// The upper bound is enforced on every edit, the lower bound only on blur.
/// Programmatic selection is never validated here.
#[derive(Debug, Clone)]
pub struct AmountSelector {
    selection: AmountSelection,
    active: ActiveChoice,
}

impl Default for AmountSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl AmountSelector {
    /// Create a selector with amount `0`.
    pub fn new() -> Self {
        Self {
            selection: AmountSelection::default(),
            active: ActiveChoice::Nothing,
        }
    }

    /// The selected amount.
    #[inline]
    pub fn amount(&self) -> u32 {
        self.selection.get()
    }

    /// The control the amount came from.
    #[inline]
    pub fn active(&self) -> ActiveChoice {
        self.active
    }

    /// Set the amount unconditionally.
    pub fn select_amount(&mut self, amount: u32) {
        log::debug!("Amount selected: {}", amount);
        self.selection.set(amount);
    }

    /// Select a preset button amount.
    pub fn choose_preset(&mut self, amount: u32) -> InputChange {
        self.select_amount(amount);
        self.active = ActiveChoice::Preset(amount);
        InputChange::Clear
    }

    /// Handle an edit of the free-text field.
    pub fn edit_custom(&mut self, text: &str, config: &DonationConfig) -> InputChange {
        let value = parse_amount(text);
        self.active = ActiveChoice::Custom;
        if value > config.max_amount {
            self.select_amount(config.max_amount);
            InputChange::Replace(config.max_amount.to_string())
        } else {
            self.select_amount(value);
            InputChange::Keep
        }
    }

    /// Handle the free-text field losing focus.
    pub fn blur_custom(&mut self, text: &str, config: &DonationConfig) -> InputChange {
        let value = parse_amount(text);
        if value > 0 && value < config.min_amount {
            self.select_amount(config.min_amount);
            InputChange::Replace(config.min_amount.to_string())
        } else {
            InputChange::Keep
        }
    }
}
