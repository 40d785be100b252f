//! donate: a donation widget for chat mini apps
//!
//! This is the backend-agnostic part of the widget.
//! It holds the selected amount, enforces the configured bounds and dispatches donations to the host and the payment page.
//!
//! ### Quick Start
//!
//! ```rust
//! use donate::prelude::*;
//! use std::time::Duration;
//!
//! struct PrintBrowser;
//!
//! impl Browser for PrintBrowser {
//!     fn now_ms(&self) -> u64 { 1000 }
//!     fn alert(&self, message: &str) { println!("{}", message) }
//!     fn open(&self, url: &str, _delay: Duration) { println!("open {}", url) }
//! }
//!
//! let mut widget = DonationWidget::new(DonationConfig::default(), NoHost, PrintBrowser);
//! widget.choose_preset(5);
//! let submission = widget.confirm().unwrap();
//! assert_eq!(submission.destination.url(), "https://www.buymeacoffee.com/fwdr?amount=5");
//! assert_eq!(submission.payload.payment_id, "guest_1000");
//! ```

#![warn(missing_docs)]

pub mod amount;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod host;
pub mod widget;

/// The types that should usually be imported.
pub mod prelude {
    pub use crate::amount::InputChange;
    pub use crate::config::DonationConfig;
    pub use crate::error::DonationError;
    pub use crate::host::{Browser, Host, MainButton, NoHost};
    pub use crate::widget::{DonationWidget, WidgetView};
}
