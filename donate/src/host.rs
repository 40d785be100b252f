//! The environments the widget runs in.
//!
//! A `Host` is the chat client embedding the widget.
//! All of its capabilities are optional, so every method has a no-op default and `NoHost` is simply the trait with nothing overridden.
//! A `Browser` is the plain page environment, which is always available.

use std::time::Duration;

/// The state of the host-provided primary action control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MainButton {
    /// The amount is not accepted.
    Hidden,
    /// The amount is accepted; shown with this label.
    Visible(String),
}

/// The capabilities of the hosting chat client.
pub trait Host {
    /// Expand the hosting surface and signal that the widget is ready.
    fn ready(&self) {}

    /// The authenticated user identifier supplied by the host.
    fn user_id(&self) -> Option<String> {
        None
    }

    /// Mirror the confirmation state into the host primary action control.
    fn set_main_button(&self, _state: MainButton) {}

    /// Register the handler of the host primary action control.
    fn on_main_button_click(&self, _handler: Box<dyn Fn()>) {}

    /// Forward a serialized payload to the host.
    ///
    /// This is fire-and-forget.
    fn send_data(&self, _data: &str) {}

    /// Show a blocking message through the host.
    ///
    /// Returns `false` if the host cannot display it, so the caller should fall back to the browser.
    fn show_alert(&self, _message: &str) -> bool {
        false
    }

    /// Whether navigation should be delayed so that host messages can be read.
    fn defers_navigation(&self) -> bool {
        false
    }
}

impl<T: Host + ?Sized> Host for Box<T> {
    fn ready(&self) {
        (**self).ready()
    }

    fn user_id(&self) -> Option<String> {
        (**self).user_id()
    }

    fn set_main_button(&self, state: MainButton) {
        (**self).set_main_button(state)
    }

    fn on_main_button_click(&self, handler: Box<dyn Fn()>) {
        (**self).on_main_button_click(handler)
    }

    fn send_data(&self, data: &str) {
        (**self).send_data(data)
    }

    fn show_alert(&self, message: &str) -> bool {
        (**self).show_alert(message)
    }

    fn defers_navigation(&self) -> bool {
        (**self).defers_navigation()
    }
}

/// The host used when the widget is not embedded in a chat client.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHost;

impl Host for NoHost {}

/// The page environment.
pub trait Browser {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> u64;

    /// Show a native blocking alert.
    fn alert(&self, message: &str);

    /// Open `url` in a new browsing context.
    ///
    /// A zero `delay` opens it immediately.
    /// Otherwise a timer is started which cannot be cancelled.
    fn open(&self, url: &str, delay: Duration);
}

impl<T: Browser + ?Sized> Browser for Box<T> {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }

    fn alert(&self, message: &str) {
        (**self).alert(message)
    }

    fn open(&self, url: &str, delay: Duration) {
        (**self).open(url, delay)
    }
}
