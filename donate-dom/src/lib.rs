//! donate: a donation widget for chat mini apps
//!
//! This is the *DOM binding* of the widget.
//!
//! ### Quick Start
//!
//! Add an element to the page and load the wasm module.
//!
//! ```html
//! <script src="https://telegram.org/js/telegram-web-app.js"></script>
//! <div id="donation-widget"></div>
//! ```
//!
//! The widget is rendered into `#donation-widget` when the module starts.
//! Inside a Telegram mini app the host main button mirrors the widget state,
//! otherwise the page falls back to plain browser behavior.

#![warn(missing_docs)]

use std::cell::RefCell;

use donate::{error::Error, prelude::*};
use wasm_bindgen::{prelude::*, JsCast, JsValue};

mod browser;
pub use browser::WindowBrowser;
mod mount;
pub use mount::DonationMount;
mod telegram;
pub use telegram::{TelegramHost, WebApp};

/// The types that should usually be imported.
pub mod prelude {
    pub use crate::{DonationMount, TelegramHost, WindowBrowser};
    pub use donate::prelude::*;
}

const CONFIG_SRC: &str = include_str!("../widget.toml");
const MOUNT_ELEMENT_ID: &str = "donation-widget";

thread_local! {
    pub(crate) static WINDOW: web_sys::Window = web_sys::window().expect("Cannot init DOM binding outside web page environment");
    pub(crate) static DOCUMENT: web_sys::Document = {
        WINDOW.with(|window| {
            window.document().expect("Cannot init DOM binding when document is not ready")
        })
    };
    static MOUNT: RefCell<Option<DonationMount<WindowBrowser>>> = RefCell::new(None);
}

fn log_js_error(err: &JsValue) {
    if let Some(err) = err.dyn_ref::<js_sys::Error>() {
        log::error!("{}", err.message());
    } else {
        log::error!("(JavaScript Error)");
    }
}

/// Log a JavaScript exception and wrap it.
pub(crate) fn js_error(msg: &str) -> impl FnOnce(JsValue) -> Error + '_ {
    move |err| {
        log_js_error(&err);
        Error::BackendError {
            msg: msg.to_string(),
            err: None,
        }
    }
}

/// A common async runner for DOM environment
#[inline]
pub fn async_task(fut: impl 'static + std::future::Future<Output = ()>) {
    wasm_bindgen_futures::spawn_local(fut);
}

/// The host for the current page.
///
/// Falls back to `NoHost` outside a chat client.
pub fn detect_host() -> Box<dyn Host> {
    match TelegramHost::detect() {
        Some(host) => {
            log::info!("Telegram Web App initialized");
            Box::new(host)
        }
        None => {
            log::info!("Running in browser mode (not in Telegram)");
            Box::new(NoHost)
        }
    }
}

fn start() -> Result<(), Error> {
    let config = DonationConfig::from_toml_str(CONFIG_SRC)?;
    let mount =
        DonationMount::new_with_element_id(MOUNT_ELEMENT_ID, config, detect_host(), WindowBrowser)?;
    MOUNT.with(|x| *x.borrow_mut() = Some(mount));
    Ok(())
}

/// The module entry point.
///
/// Sets up logging and mounts the widget on `#donation-widget`.
/// Calling it again replaces the current mount.
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::warn!("Logger already initialized");
    }
    if let Err(err) = start() {
        log::error!("Cannot start the donation widget: {}", err);
    }
}

fn with_mount<R>(f: impl FnOnce(&DonationMount<WindowBrowser>) -> R) -> Option<R> {
    MOUNT.with(|x| x.borrow().as_ref().map(f))
}

/// Select an amount from other page scripts.
#[wasm_bindgen]
pub fn select_amount(amount: u32) {
    with_mount(|mount| mount.select_amount(amount));
}

/// Start a donation from other page scripts.
#[wasm_bindgen]
pub fn handle_donate() {
    with_mount(|mount| mount.confirm());
}

/// The currently selected amount.
#[wasm_bindgen]
pub fn selected_amount() -> u32 {
    with_mount(|mount| mount.amount()).unwrap_or(0)
}
