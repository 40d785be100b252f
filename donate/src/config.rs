//! The widget configuration.
//!
//! The configuration is loaded once at startup and never changes afterwards.
//! It is usually written in TOML:
//!
//! ```toml
//! destination = "fwdr"
//! min_amount = 1
//! max_amount = 1000
//! currency = "USD"
//! presets = [5, 10, 25]
//!
//! [[override]]
//! amount = 10
//! url = "https://www.buymeacoffee.com/fwdr/e/1"
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{DonationError, Error};

const DEFAULT_DESTINATION: &str = "fwdr";
const DEFAULT_PROFILE_BASE_URL: &str = "https://www.buymeacoffee.com";
const DEFAULT_CURRENCY: &str = "USD";
const DEFAULT_NAVIGATION_DELAY_MS: u64 = 2000;

/// The immutable widget configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawConfig")]
pub struct DonationConfig {
    /// The payment profile name on the payment page.
    pub destination: String,
    /// The payment page origin, without a trailing slash.
    pub profile_base_url: String,
    /// The price of one unit on the payment page.
    pub base_price: u32,
    /// The smallest accepted amount, at least `1`.
    pub min_amount: u32,
    /// The largest accepted amount.
    pub max_amount: u32,
    /// The currency label shown next to amounts.
    pub currency: String,
    /// The amounts offered as preset buttons.
    pub presets: Vec<u32>,
    /// How long to wait before navigating when a host is present.
    pub navigation_delay_ms: u64,
    /// Dedicated payment links for exact amounts.
    pub overrides: BTreeMap<u32, String>,
}

impl Default for DonationConfig {
    fn default() -> Self {
        Self {
            destination: DEFAULT_DESTINATION.into(),
            profile_base_url: DEFAULT_PROFILE_BASE_URL.into(),
            base_price: 1,
            min_amount: 1,
            max_amount: 1000,
            currency: DEFAULT_CURRENCY.into(),
            presets: vec![1, 5, 10, 25, 50, 100],
            navigation_delay_ms: DEFAULT_NAVIGATION_DELAY_MS,
            overrides: BTreeMap::new(),
        }
    }
}

impl DonationConfig {
    /// Parse and validate a TOML config.
    ///
    /// Keys not present in `src` take their default values.
    pub fn from_toml_str(src: &str) -> Result<Self, Error> {
        toml::from_str(src).map_err(|err| Error::config(err.to_string()))
    }

    /// Check the invariants between fields.
    pub fn validate(&self) -> Result<(), Error> {
        self.check().map_err(Error::config)
    }

    fn check(&self) -> Result<(), String> {
        if self.base_price == 0 {
            return Err("`base_price` must be positive".into());
        }
        if self.min_amount == 0 {
            return Err("`min_amount` must be positive".into());
        }
        if self.min_amount > self.max_amount {
            return Err(format!(
                "`min_amount` ({}) is greater than `max_amount` ({})",
                self.min_amount, self.max_amount
            ));
        }
        if self.destination.trim().is_empty() {
            return Err("`destination` is empty".into());
        }
        if self.currency.trim().is_empty() {
            return Err("`currency` is empty".into());
        }
        if let Some((amount, _)) = self.overrides.iter().find(|(_, url)| url.trim().is_empty()) {
            return Err(format!("the override for {} has an empty url", amount));
        }
        Ok(())
    }

    /// Whether `amount` lies within `[min_amount, max_amount]`.
    #[inline]
    pub fn accepts(&self, amount: u32) -> bool {
        amount >= self.min_amount && amount <= self.max_amount
    }

    /// The dedicated payment link for exactly `amount`, if configured.
    #[inline]
    pub fn override_for(&self, amount: u32) -> Option<&str> {
        self.overrides.get(&amount).map(|x| x.as_str())
    }

    /// The error for a rejected `amount`.
    pub fn out_of_range(&self, amount: u32) -> DonationError {
        DonationError::OutOfRangeAmount {
            amount,
            min: self.min_amount,
            max: self.max_amount,
            currency: self.currency.clone(),
        }
    }

    /// The message shown when an amount is rejected.
    pub fn range_message(&self) -> String {
        self.out_of_range(0).to_string()
    }
}

#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    destination: String,
    profile_base_url: String,
    base_price: u32,
    min_amount: u32,
    max_amount: u32,
    currency: String,
    presets: Vec<u32>,
    navigation_delay_ms: u64,
    #[serde(rename = "override")]
    overrides: Vec<RawOverride>,
}

impl Default for RawConfig {
    fn default() -> Self {
        let DonationConfig {
            destination,
            profile_base_url,
            base_price,
            min_amount,
            max_amount,
            currency,
            presets,
            navigation_delay_ms,
            overrides: _,
        } = DonationConfig::default();
        Self {
            destination,
            profile_base_url,
            base_price,
            min_amount,
            max_amount,
            currency,
            presets,
            navigation_delay_ms,
            overrides: Vec::new(),
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOverride {
    amount: u32,
    url: String,
}

impl TryFrom<RawConfig> for DonationConfig {
    type Error = String;

    fn try_from(raw: RawConfig) -> Result<Self, String> {
        let RawConfig {
            destination,
            profile_base_url,
            base_price,
            min_amount,
            max_amount,
            currency,
            presets,
            navigation_delay_ms,
            overrides: raw_overrides,
        } = raw;
        let mut overrides = BTreeMap::new();
        for RawOverride { amount, url } in raw_overrides {
            if overrides.insert(amount, url).is_some() {
                return Err(format!("duplicated override for {}", amount));
            }
        }
        let ret = Self {
            destination,
            profile_base_url: profile_base_url.trim_end_matches('/').to_string(),
            base_price,
            min_amount,
            max_amount,
            currency,
            presets,
            navigation_delay_ms,
            overrides,
        };
        ret.check()?;
        for amount in ret.presets.iter().filter(|x| !ret.accepts(**x)) {
            log::warn!("Preset amount {} is outside the accepted range", amount);
        }
        Ok(ret)
    }
}
